//! Memoization of full scans.
//!
//! A scan is a pure function of its inputs, so its result can be reused for
//! as long as the corpus, term list and configuration stay the same. Entries
//! are keyed by [`scan_fingerprint`]; changing any input produces a new key,
//! which is the only invalidation a caller normally needs. Old entries are
//! evicted in insertion order once the capacity is reached.

use std::collections::VecDeque;
use std::sync::Arc;

use flagscan_types::{Analysis, Document, Fingerprint};
use log::debug;
use rustc_hash::FxHashMap;

use crate::fingerprint::scan_fingerprint;
use crate::scan::Scanner;

/// Default number of cached analyses.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Bounded cache of scan results.
#[derive(Debug)]
pub struct ReportCache {
    entries: FxHashMap<Fingerprint, Arc<Analysis>>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<Fingerprint>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportCache {
    /// Creates a cache holding up to [`DEFAULT_CACHE_CAPACITY`] analyses.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache holding up to `capacity` analyses (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: FxHashMap::default(),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached analysis of `corpus`, scanning it on a miss.
    pub fn get_or_scan(&mut self, scanner: &Scanner, corpus: &[Document]) -> Arc<Analysis> {
        let key = scan_fingerprint(corpus, scanner.terms(), scanner.config());

        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            debug!("scan cache hit {}", key);
            return Arc::clone(hit);
        }

        self.misses += 1;
        debug!("scan cache miss {}", key);

        let analysis = Arc::new(scanner.scan(corpus));
        self.insert(key, Arc::clone(&analysis));
        analysis
    }

    /// Returns the analysis stored under `key`, if any.
    pub fn get(&self, key: Fingerprint) -> Option<Arc<Analysis>> {
        self.entries.get(&key).cloned()
    }

    fn insert(&mut self, key: Fingerprint, analysis: Arc<Analysis>) {
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.entries.insert(key, analysis);
        self.order.push_back(key);
    }

    /// Drops the entry stored under `key`. Returns `true` if one existed.
    pub fn invalidate(&mut self, key: Fingerprint) -> bool {
        if self.entries.remove(&key).is_some() {
            self.order.retain(|k| *k != key);
            true
        } else {
            false
        }
    }

    /// Drops every entry. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Number of cached analyses.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache.
    #[inline(always)]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that required a scan.
    #[inline(always)]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::TermList;

    fn corpus(text: &str) -> Vec<Document> {
        vec![Document::new("1", "A", text), Document::new("2", "B", "other")]
    }

    #[test]
    fn second_lookup_hits() {
        let scanner = Scanner::new(TermList::normalize(["women"]));
        let mut cache = ReportCache::new();
        let docs = corpus("women in STEM");

        let first = cache.get_or_scan(&scanner, &docs);
        let second = cache.get_or_scan(&scanner, &docs);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_corpus_misses() {
        let scanner = Scanner::new(TermList::normalize(["women"]));
        let mut cache = ReportCache::new();

        let a = cache.get_or_scan(&scanner, &corpus("women in STEM"));
        let b = cache.get_or_scan(&scanner, &corpus("men in STEM"));

        assert_eq!(a.stats.flagged_documents, 1);
        assert_eq!(b.stats.flagged_documents, 0);
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn changed_terms_miss() {
        let docs = corpus("women in STEM");
        let mut cache = ReportCache::new();

        cache.get_or_scan(&Scanner::new(TermList::normalize(["women"])), &docs);
        let other = cache.get_or_scan(&Scanner::new(TermList::normalize(["stem"])), &docs);

        assert_eq!(cache.misses(), 2);
        assert_eq!(other.frequencies[0].term, "stem");
    }

    #[test]
    fn evicts_oldest_entry() {
        let scanner = Scanner::new(TermList::normalize(["women"]));
        let mut cache = ReportCache::with_capacity(2);

        let first = corpus("one");
        cache.get_or_scan(&scanner, &first);
        cache.get_or_scan(&scanner, &corpus("two"));
        cache.get_or_scan(&scanner, &corpus("three"));

        assert_eq!(cache.len(), 2);
        let key = scan_fingerprint(&first, scanner.terms(), scanner.config());
        assert!(cache.get(key).is_none());
    }

    #[test]
    fn invalidate_and_clear() {
        let scanner = Scanner::new(TermList::normalize(["women"]));
        let mut cache = ReportCache::new();
        let docs = corpus("women");

        cache.get_or_scan(&scanner, &docs);
        let key = scan_fingerprint(&docs, scanner.terms(), scanner.config());
        assert!(cache.get(key).is_some());

        assert!(cache.invalidate(key));
        assert!(!cache.invalidate(key));
        assert!(cache.is_empty());

        cache.get_or_scan(&scanner, &docs);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 2);
    }
}
