//! In-process suggestion cache using moka.
//!
//! Entries expire a fixed time after insertion; capacity is bounded by entry count.

use std::time::Duration;

use moka::sync::Cache;

use super::BaseSuggestionCache;
use crate::domains::suggestions::SuggestionResult;

pub struct MokaSuggestionCache {
    cache: Cache<String, SuggestionResult>,
    ttl: Duration,
}

impl MokaSuggestionCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self { cache, ttl }
    }
}

impl BaseSuggestionCache for MokaSuggestionCache {
    fn get(&self, key: &str) -> Option<SuggestionResult> {
        self.cache.get(key)
    }

    fn insert(&self, key: String, value: SuggestionResult) {
        self.cache.insert(key, value);
    }

    fn clear(&self) {
        self.cache.invalidate_all();
    }

    fn entry_count(&self) -> u64 {
        // moka updates its counters lazily
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}
