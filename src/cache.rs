//! Result memoization keyed by fingerprint.
//!
//! A verdict contains two randomly chosen text fields, so recomputing it
//! for the same image could visibly change the output. The cache makes
//! analysis idempotent: the first composed record for a fingerprint is the
//! one every later request sees, text included.
//!
//! # Design
//!
//! - **Unbounded by default.** One entry per distinct image per session;
//!   for an interactive tool that is a handful of small records.
//! - **Optional LRU bound.** A configured capacity turns the map into a
//!   least-recently-used cache (recency bumped on hit) for long-lived
//!   batch runs.
//! - **First write wins.** The record is composed *outside* the lock; if
//!   two threads race on a new fingerprint, the second insert is discarded
//!   and both callers get the first thread's record. Everything except the
//!   text fields is deterministic, so the discarded work was identical
//!   anyway.
//!
//! Records are handed out as `Arc` clones; entries are never mutated.

use crate::fingerprint::Fingerprint;
use crate::verdict::AnalysisRecord;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex};

/// In-memory verdict cache. Interior mutability so a shared engine can be
/// used from rayon workers.
#[derive(Debug)]
pub struct ResultCache {
    inner: Mutex<CacheInner>,
}

#[derive(Debug)]
struct CacheInner {
    entries: HashMap<Fingerprint, Arc<AnalysisRecord>>,
    /// Recency order, least recent at the front. Only maintained when a
    /// capacity is set.
    recency: VecDeque<Fingerprint>,
    capacity: Option<usize>,
    stats: CacheStats,
}

impl ResultCache {
    /// Unbounded cache (the session-scoped default).
    pub fn unbounded() -> Self {
        Self::with_capacity(None)
    }

    /// Cache holding at most `capacity` records, evicting the least
    /// recently used. `None` means unbounded.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                recency: VecDeque::new(),
                capacity,
                stats: CacheStats::default(),
            }),
        }
    }

    /// Fetch the record for `fingerprint`, composing it with `compute` on
    /// a miss.
    ///
    /// `compute` runs without the lock held. On a race the first stored
    /// record wins and later computations are discarded, so every caller
    /// observes the same record for a given fingerprint.
    pub fn get_or_compute(
        &self,
        fingerprint: Fingerprint,
        compute: impl FnOnce() -> AnalysisRecord,
    ) -> Arc<AnalysisRecord> {
        {
            let mut inner = self.inner.lock().unwrap();
            if let Some(record) = inner.entries.get(&fingerprint).cloned() {
                inner.stats.hits += 1;
                inner.touch(fingerprint);
                return record;
            }
        }

        let fresh = Arc::new(compute());

        let mut inner = self.inner.lock().unwrap();
        if let Some(existing) = inner.entries.get(&fingerprint).cloned() {
            // Lost the race; keep the first writer's record.
            inner.stats.hits += 1;
            inner.touch(fingerprint);
            return existing;
        }
        inner.stats.misses += 1;
        inner.insert(fingerprint, Arc::clone(&fresh));
        fresh
    }

    /// Stored record for `fingerprint`, if any. Does not bump recency or
    /// count as a hit.
    pub fn peek(&self, fingerprint: Fingerprint) -> Option<Arc<AnalysisRecord>> {
        self.inner.lock().unwrap().entries.get(&fingerprint).cloned()
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every record (session reset). Stats are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.recency.clear();
    }

    /// Hit/miss counters accumulated since construction.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().unwrap().stats
    }
}

impl CacheInner {
    fn insert(&mut self, fingerprint: Fingerprint, record: Arc<AnalysisRecord>) {
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            if self.entries.len() >= capacity
                && let Some(oldest) = self.recency.pop_front()
            {
                self.entries.remove(&oldest);
            }
            self.recency.push_back(fingerprint);
        }
        self.entries.insert(fingerprint, record);
    }

    /// Move a fingerprint to the most-recent end. No-op when unbounded.
    fn touch(&mut self, fingerprint: Fingerprint) {
        if self.capacity.is_some()
            && let Some(pos) = self.recency.iter().position(|&fp| fp == fingerprint)
        {
            self.recency.remove(pos);
            self.recency.push_back(fingerprint);
        }
    }
}

/// Summary of cache performance for a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} analyzed ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} analyzed", self.misses)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristics::Characteristics;
    use crate::scoring;
    use crate::verdict::tests::MockPicker;
    use crate::verdict::compose;

    fn record(fp: Fingerprint) -> AnalysisRecord {
        let c = Characteristics::estimate(fp);
        compose(fp, &c, scoring::ripeness(&c), &MockPicker::default())
    }

    fn fp(n: u32) -> Fingerprint {
        Fingerprint::from_raw(n)
    }

    // =========================================================================
    // get_or_compute
    // =========================================================================

    #[test]
    fn miss_computes_then_hit_replays_same_arc() {
        let cache = ResultCache::unbounded();
        let a = cache.get_or_compute(fp(1), || record(fp(1)));
        let b = cache.get_or_compute(fp(1), || panic!("should not recompute"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_fingerprints_get_distinct_entries() {
        let cache = ResultCache::unbounded();
        cache.get_or_compute(fp(1), || record(fp(1)));
        cache.get_or_compute(fp(2), || record(fp(2)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn random_text_is_frozen_by_the_cache() {
        let cache = ResultCache::unbounded();
        let picker_a = MockPicker::scripted(vec![0], vec![2]);
        let picker_b = MockPicker::scripted(vec![3], vec![4]);
        let c = Characteristics::estimate(fp(5));
        let first = cache.get_or_compute(fp(5), || compose(fp(5), &c, 50, &picker_a));
        let replay = cache.get_or_compute(fp(5), || compose(fp(5), &c, 50, &picker_b));
        assert_eq!(first.recommendation, replay.recommendation);
        assert_eq!(first.tips, replay.tips);
    }

    #[test]
    fn stats_count_hits_and_misses() {
        let cache = ResultCache::unbounded();
        cache.get_or_compute(fp(1), || record(fp(1)));
        cache.get_or_compute(fp(1), || record(fp(1)));
        cache.get_or_compute(fp(2), || record(fp(2)));
        let stats = cache.stats();
        assert_eq!(stats, CacheStats { hits: 1, misses: 2 });
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ResultCache::unbounded();
        cache.get_or_compute(fp(1), || record(fp(1)));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.peek(fp(1)).is_none());
    }

    #[test]
    fn peek_does_not_count_as_hit() {
        let cache = ResultCache::unbounded();
        cache.get_or_compute(fp(1), || record(fp(1)));
        cache.peek(fp(1));
        assert_eq!(cache.stats().hits, 0);
    }

    // =========================================================================
    // LRU bound
    // =========================================================================

    #[test]
    fn capacity_evicts_least_recently_used() {
        let cache = ResultCache::with_capacity(Some(2));
        cache.get_or_compute(fp(1), || record(fp(1)));
        cache.get_or_compute(fp(2), || record(fp(2)));
        // Touch 1 so 2 becomes the eviction candidate.
        cache.get_or_compute(fp(1), || panic!("cached"));
        cache.get_or_compute(fp(3), || record(fp(3)));

        assert_eq!(cache.len(), 2);
        assert!(cache.peek(fp(1)).is_some());
        assert!(cache.peek(fp(2)).is_none());
        assert!(cache.peek(fp(3)).is_some());
    }

    #[test]
    fn evicted_entry_is_recomputed() {
        let cache = ResultCache::with_capacity(Some(1));
        cache.get_or_compute(fp(1), || record(fp(1)));
        cache.get_or_compute(fp(2), || record(fp(2)));
        let misses_before = cache.stats().misses;
        cache.get_or_compute(fp(1), || record(fp(1)));
        assert_eq!(cache.stats().misses, misses_before + 1);
    }

    #[test]
    fn zero_capacity_never_stores() {
        let cache = ResultCache::with_capacity(Some(0));
        cache.get_or_compute(fp(1), || record(fp(1)));
        assert!(cache.is_empty());
    }

    // =========================================================================
    // Concurrency
    // =========================================================================

    #[test]
    fn parallel_requests_for_one_fingerprint_agree() {
        use rayon::prelude::*;

        let cache = ResultCache::unbounded();
        let picker = MockPicker::default();
        let records: Vec<Arc<AnalysisRecord>> = (0..32)
            .into_par_iter()
            .map(|_| {
                let c = Characteristics::estimate(fp(7));
                cache.get_or_compute(fp(7), || compose(fp(7), &c, scoring::ripeness(&c), &picker))
            })
            .collect();

        let first = &records[0];
        for r in &records {
            assert!(Arc::ptr_eq(first, r));
        }
        assert_eq!(cache.len(), 1);
    }
}
