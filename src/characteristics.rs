//! Pseudo-measurements derived from a fingerprint.
//!
//! No pixels are inspected anywhere in this crate. The four
//! "measurements" — redness, roundness, texture, size — are bounded
//! deterministic draws keyed off the fingerprint's seed, so a given image
//! always measures the same while different images spread plausibly
//! across the ranges.

use crate::fingerprint::Fingerprint;
use crate::seeded::seeded_range;
use serde::{Deserialize, Serialize};

/// Bounded pseudo-measurements for one image.
///
/// Immutable once computed; a pure function of the fingerprint. Each field
/// lives in its own fixed range, drawn from consecutive seed offsets:
///
/// | Field | Offset | Range |
/// |---|---|---|
/// | `redness` | seed+1 | 30–95 |
/// | `roundness` | seed+2 | 40–90 |
/// | `texture` | seed+3 | 35–85 |
/// | `size` | seed+4 | 50–100 |
///
/// The offset order is load-bearing: each offset selects a distinct
/// deterministic stream, so reordering the draws changes every verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristics {
    pub fingerprint: Fingerprint,
    pub seed: u32,
    pub redness: u8,
    pub roundness: u8,
    pub texture: u8,
    pub size: u8,
}

impl Characteristics {
    /// Derive the measurements for a fingerprint.
    pub fn estimate(fingerprint: Fingerprint) -> Self {
        let seed = fingerprint.seed();
        let base = i64::from(seed);
        Self {
            fingerprint,
            seed,
            redness: seeded_range(base + 1, 30, 95) as u8,
            roundness: seeded_range(base + 2, 40, 90) as u8,
            texture: seeded_range(base + 3, 35, 85) as u8,
            size: seeded_range(base + 4, 50, 100) as u8,
        }
    }
}
