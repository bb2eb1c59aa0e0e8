//! Ripeness scoring — weighted measurements plus bounded jitter.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::characteristics::Characteristics;
use crate::seeded::seeded_range;

/// Characteristic weights. Color dominates, size barely matters. These are
/// fixed constants of the verdict mapping, not tunables: changing any of
/// them (or the jitter offset below) re-scores every previously analyzed
/// image.
const REDNESS_WEIGHT: f64 = 0.4;
const ROUNDNESS_WEIGHT: f64 = 0.2;
const TEXTURE_WEIGHT: f64 = 0.3;
const SIZE_WEIGHT: f64 = 0.1;

/// Seed offset for the jitter draw; offsets +1..+4 belong to the
/// characteristic estimator.
const JITTER_OFFSET: i64 = 5;

/// Floor and ceiling of the final ripeness percentage.
pub const MIN_RIPENESS: u8 = 45;
pub const MAX_RIPENESS: u8 = 100;

/// Score a set of characteristics as a ripeness percentage in
/// [`MIN_RIPENESS`]..=[`MAX_RIPENESS`].
///
/// Weighted sum of the four measurements, nudged by a deterministic ±5
/// jitter drawn from the characteristic seed, rounded to the nearest
/// integer, then clamped.
pub fn ripeness(characteristics: &Characteristics) -> u8 {
    let weighted = f64::from(characteristics.redness) * REDNESS_WEIGHT
        + f64::from(characteristics.roundness) * ROUNDNESS_WEIGHT
        + f64::from(characteristics.texture) * TEXTURE_WEIGHT
        + f64::from(characteristics.size) * SIZE_WEIGHT;
    let jitter = seeded_range(i64::from(characteristics.seed) + JITTER_OFFSET, -5, 5);
    let score = (weighted + jitter as f64).round() as i64;
    score.clamp(i64::from(MIN_RIPENESS), i64::from(MAX_RIPENESS)) as u8
}
