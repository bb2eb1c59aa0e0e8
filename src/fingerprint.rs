//! Content fingerprinting for analysis memoization.
//!
//! A [`Fingerprint`] collapses an image's bytes into a small stable integer.
//! It is deliberately weak — a rolling multiply-add over at most the first
//! 1000 bytes — because it only has to be *stable*, not collision-free:
//! the same image must always map to the same cached verdict, and a rare
//! collision between two images merely makes them share a verdict.
//!
//! ## Scheme
//!
//! ```text
//! h = (h << 5) - h + byte        (wrapping 32-bit signed, i.e. h*31 + byte)
//! fingerprint = |h|
//! ```
//!
//! The 1000-byte prefix cap bounds hashing cost on large photos; two files
//! that share their first kilobyte intentionally collide. Empty input hashes
//! to 0 (the [`Analyzer`](crate::analyzer::Analyzer) rejects empty input
//! before ever hashing it).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading bytes that participate in the hash.
const HASH_PREFIX_LEN: usize = 1000;

/// Number of leading decimal digits of the fingerprint used as the
/// characteristic seed.
const SEED_DIGITS: usize = 8;

/// Stable integer identity of an image's byte content.
///
/// Derived from a bounded prefix of the bytes; identical prefixes always
/// yield identical fingerprints. Not cryptographic — collisions are
/// possible and accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(u32);

impl Fingerprint {
    /// Wrap a raw fingerprint value (tests and collision fixtures).
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// The raw 32-bit fingerprint value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Derive the characteristic seed: the fingerprint's leading decimal
    /// digits (at most [`SEED_DIGITS`]) parsed back as an integer.
    ///
    /// Eight digits keep the seed below 10^8, so seed plus the small
    /// per-characteristic offsets never overflows anything downstream.
    pub fn seed(self) -> u32 {
        let digits = self.0.to_string();
        let prefix = &digits[..digits.len().min(SEED_DIGITS)];
        // Unreachable failure: prefix is 1-8 ASCII digits of a u32.
        prefix.parse().unwrap_or(0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash image bytes into a [`Fingerprint`].
///
/// Folds at most the first [`HASH_PREFIX_LEN`] bytes with the rolling
/// `h*31 + byte` scheme in wrapping 32-bit signed arithmetic, then takes
/// the absolute value. Total over any byte slice; empty input yields 0.
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    let mut h: i32 = 0;
    for &byte in bytes.iter().take(HASH_PREFIX_LEN) {
        h = h
            .wrapping_shl(5)
            .wrapping_sub(h)
            .wrapping_add(i32::from(byte));
    }
    Fingerprint(h.unsigned_abs())
}
