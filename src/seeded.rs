//! Deterministic bounded integers from an integer seed.
//!
//! The whole analysis pipeline needs "random-looking" numbers that are a
//! pure function of the image fingerprint, so the same photo always gets
//! the same verdict. This generator trades statistical quality for that
//! reproducibility:
//!
//! ```text
//! x    = sin(seed) * 10000
//! frac = x - floor(x)
//! out  = floor(frac * (max - min + 1)) + min
//! ```
//!
//! Consecutive seeds select independent-enough streams for the handful of
//! draws the pipeline makes. The output is identical on any platform whose
//! `f64::sin` rounds the same way (IEEE-754 with the usual libm); a target
//! with a different `sin` precision would shift verdicts, which is the one
//! portability caveat of this crate.

/// Deterministic integer in `[min, max]` inclusive for the given seed.
///
/// Negative seeds are fine (sine is defined for all reals). `min` must not
/// exceed `max`; the pipeline only calls this with fixed literal bounds.
pub fn seeded_range(seed: i64, min: i64, max: i64) -> i64 {
    debug_assert!(min <= max);
    let x = (seed as f64).sin() * 10000.0;
    let frac = x - x.floor();
    (frac * (max - min + 1) as f64).floor() as i64 + min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_calls() {
        for seed in [-9_999, -1, 0, 1, 42, 96_355, 19_341_272] {
            assert_eq!(seeded_range(seed, 0, 100), seeded_range(seed, 0, 100));
        }
    }

    #[test]
    fn stays_inside_inclusive_bounds() {
        for seed in -500..500 {
            let v = seeded_range(seed, 30, 95);
            assert!((30..=95).contains(&v), "seed {seed} produced {v}");
        }
    }

    #[test]
    fn negative_bounds() {
        for seed in 0..200 {
            let v = seeded_range(seed, -5, 5);
            assert!((-5..=5).contains(&v), "seed {seed} produced {v}");
        }
    }

    #[test]
    fn degenerate_range_is_constant() {
        for seed in 0..50 {
            assert_eq!(seeded_range(seed, 7, 7), 7);
        }
    }

    #[test]
    fn nearby_seeds_diverge() {
        // Not a statistical claim, just that the streams aren't glued
        // together for the seeds the estimator actually uses.
        let a: Vec<i64> = (1..=5).map(|off| seeded_range(96_354 + off, 0, 1000)).collect();
        let mut b = a.clone();
        b.dedup();
        assert!(b.len() > 1, "all offset draws identical: {a:?}");
    }

    #[test]
    fn golden_draws() {
        // Reference values for the seed derived from fingerprint(b"abc").
        assert_eq!(seeded_range(96_355, 30, 95), 56);
        assert_eq!(seeded_range(96_356, 40, 90), 68);
        assert_eq!(seeded_range(96_357, 35, 85), 74);
        assert_eq!(seeded_range(96_358, 50, 100), 79);
        assert_eq!(seeded_range(96_359, -5, 5), 2);
    }
}
