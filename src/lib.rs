//! # ripecheck
//!
//! Deterministic pomegranate ripeness verdicts from image bytes. Point it
//! at a photo and it reports a ripeness percentage, a quality tier, a
//! metric breakdown, and handling advice — the same verdict every time for
//! the same photo.
//!
//! # Honesty Note
//!
//! No pixel is ever inspected. The "analysis" is an intentionally fake but
//! stable mapping from the image's bytes to a verdict; the engineering
//! substance is in keeping that mapping deterministic, cacheable, and
//! reproducible across runs. Treat the output as a party trick with
//! excellent repeatability, not produce science.
//!
//! # Architecture: Pure Pipeline Behind a Cache
//!
//! ```text
//! bytes → fingerprint → [cache] → characteristics → score → verdict record
//! ```
//!
//! Every stage is a pure function of the previous one, which buys:
//!
//! - **Reproducibility**: a fingerprint fully determines the score, so
//!   verdicts survive restarts and are identical on every machine with
//!   IEEE-754 `f64::sin`.
//! - **Idempotence**: records are memoized by fingerprint; the two
//!   genuinely random text fields are frozen at first computation.
//! - **Testability**: each stage has golden values pinned in unit tests,
//!   and the one random seam is a trait that tests script.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fingerprint`] | Rolling content hash over the first KB of the image |
//! | [`seeded`] | Deterministic bounded integers from an integer seed |
//! | [`characteristics`] | Bounded pseudo-measurements drawn from the fingerprint |
//! | [`scoring`] | Weighted ripeness score with seeded jitter |
//! | [`verdict`] | Tiers, display metrics, text pools, the composed record |
//! | [`cache`] | Fingerprint-keyed memoization, optional LRU bound |
//! | [`analyzer`] | Engine façade: validation, pipeline, cache wiring |
//! | [`config`] | Optional `ripecheck.toml` (cache capacity) |
//! | [`output`] | Information-first CLI rendering of verdicts |
//! | [`report`] | Self-contained HTML result card via Maud |
//!
//! # Design Decisions
//!
//! ## A Deliberately Weak Hash
//!
//! The fingerprint is `h*31 + byte` over at most the first 1000 bytes.
//! It only keys a session cache, so stability matters and collision
//! resistance does not; a collision makes two images share a verdict,
//! which the cache treats as working as intended.
//!
//! ## `sin`-Based Seeded Randomness
//!
//! "Measurements" come from the fractional part of `sin(seed) * 10000` —
//! a pocket-sized deterministic generator with no RNG state to carry
//! around. The cost is a portability caveat: a libm whose `sin` rounds
//! differently would shift verdicts (see [`seeded`]).
//!
//! ## One Random Seam
//!
//! Recommendation phrasing and the "wait N days" figure are true random
//! draws behind the [`verdict::TextPicker`] trait. Everything else is
//! deterministic, so tests pin exact golden verdicts while production
//! still varies its prose.

pub mod analyzer;
pub mod cache;
pub mod characteristics;
pub mod config;
pub mod fingerprint;
pub mod output;
pub mod report;
pub mod scoring;
pub mod seeded;
pub mod verdict;
