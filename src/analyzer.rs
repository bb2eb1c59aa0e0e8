//! The analysis engine — bytes in, cached verdict out.
//!
//! [`Analyzer`] ties the pipeline together:
//!
//! ```text
//! bytes → fingerprint → [cache lookup] → estimate → score → compose → record
//! ```
//!
//! Every stage after hashing is pure CPU work with no I/O and no error
//! cases; the engine's only validation duty is rejecting empty input
//! before it silently hashes to the degenerate fingerprint 0. The engine
//! is `Sync`: the cache is internally locked and the text picker is
//! shared, so one instance can serve rayon workers directly.
//!
//! ```
//! use ripecheck::analyzer::Analyzer;
//!
//! let engine = Analyzer::new();
//! let verdict = engine.analyze(b"raw image bytes").unwrap();
//! assert!((45..=100).contains(&verdict.ripeness));
//! // Same bytes, same record — text fields included.
//! assert_eq!(engine.analyze(b"raw image bytes").unwrap(), verdict);
//! ```

use crate::cache::{CacheStats, ResultCache};
use crate::characteristics::Characteristics;
use crate::config::AnalyzerConfig;
use crate::fingerprint::fingerprint;
use crate::scoring;
use crate::verdict::{AnalysisRecord, TextPicker, ThreadRngPicker, compose};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("image data is empty")]
    EmptyImage,
}

/// Session-scoped analysis engine: verdict pipeline plus result cache.
pub struct Analyzer {
    cache: ResultCache,
    picker: Box<dyn TextPicker>,
}

impl Analyzer {
    /// Engine with an unbounded cache and thread-RNG text picker.
    pub fn new() -> Self {
        Self::with_config(&AnalyzerConfig::default())
    }

    /// Engine configured from a loaded [`AnalyzerConfig`].
    pub fn with_config(config: &AnalyzerConfig) -> Self {
        Self {
            cache: ResultCache::with_capacity(config.cache.capacity),
            picker: Box::new(ThreadRngPicker),
        }
    }

    /// Replace the text picker (tests script the random draws this way).
    pub fn with_picker(mut self, picker: impl TextPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Analyze image bytes into a verdict record.
    ///
    /// Deterministic per byte content: the fingerprint keys the cache, so
    /// repeated calls for the same bytes return the same `Arc`, freezing
    /// the randomly chosen recommendation and tips at first computation.
    pub fn analyze(&self, bytes: &[u8]) -> Result<Arc<AnalysisRecord>, AnalyzeError> {
        if bytes.is_empty() {
            return Err(AnalyzeError::EmptyImage);
        }
        let fp = fingerprint(bytes);
        let record = self.cache.get_or_compute(fp, || {
            let characteristics = Characteristics::estimate(fp);
            let score = scoring::ripeness(&characteristics);
            compose(fp, &characteristics, score, self.picker.as_ref())
        });
        Ok(record)
    }

    /// Forget every cached verdict (session reset).
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of distinct images analyzed so far this session.
    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    /// Cache hit/miss counters for batch summaries.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::QualityTier;
    use crate::verdict::tests::MockPicker;

    #[test]
    fn empty_input_is_rejected_before_caching() {
        let engine = Analyzer::new();
        assert_eq!(engine.analyze(b"").unwrap_err(), AnalyzeError::EmptyImage);
        assert_eq!(engine.cached_results(), 0);
    }

    #[test]
    fn golden_verdict_for_abc() {
        let engine = Analyzer::new().with_picker(MockPicker::default());
        let r = engine.analyze(b"abc").unwrap();
        assert_eq!(r.fingerprint.value(), 96354);
        assert_eq!(r.ripeness, 68);
        assert!(!r.ripe);
        assert_eq!(r.tier, QualityTier::Good);
    }

    #[test]
    fn golden_verdict_for_kilobyte_of_a() {
        let engine = Analyzer::new().with_picker(MockPicker::default());
        let r = engine.analyze(&b"AAAA".repeat(300)).unwrap();
        assert_eq!(r.fingerprint.value(), 1934126720);
        assert_eq!(r.ripeness, 58);
        assert_eq!(r.tier, QualityTier::Average);
    }

    #[test]
    fn repeat_analysis_returns_the_cached_record() {
        let engine = Analyzer::new();
        let a = engine.analyze(b"same photo").unwrap();
        let b = engine.analyze(b"same photo").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(engine.cached_results(), 1);
    }

    #[test]
    fn clear_cache_allows_fresh_text() {
        let engine = Analyzer::new().with_picker(MockPicker::scripted(vec![0, 2], vec![2, 3]));
        let first = engine.analyze(b"photo").unwrap();
        engine.clear_cache();
        let second = engine.analyze(b"photo").unwrap();
        // Deterministic fields identical, text redrawn from the pool.
        assert_eq!(first.ripeness, second.ripeness);
        assert_eq!(first.tier, second.tier);
        assert_eq!(first.metrics, second.metrics);
        assert_ne!(first.recommendation, second.recommendation);
    }

    #[test]
    fn colliding_inputs_share_a_record() {
        // [1, 32] and [2, 1] both hash to 63.
        let engine = Analyzer::new();
        let a = engine.analyze(&[0x01, 0x20]).unwrap();
        let b = engine.analyze(&[0x02, 0x01]).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(engine.cache_stats().hits, 1);
    }

    #[test]
    fn shared_engine_across_rayon_workers() {
        use rayon::prelude::*;

        let engine = Analyzer::new();
        let inputs: Vec<Vec<u8>> = (0u8..16).map(|n| vec![n; 64]).collect();
        let ripeness: Vec<u8> = inputs
            .par_iter()
            .map(|bytes| engine.analyze(bytes).unwrap().ripeness)
            .collect();
        // Re-analysis sequentially agrees with the parallel pass.
        for (bytes, &score) in inputs.iter().zip(&ripeness) {
            assert_eq!(engine.analyze(bytes).unwrap().ripeness, score);
        }
    }
}
