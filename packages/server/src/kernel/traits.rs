// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
//
// Naming convention: Base* for trait names (e.g., BaseSuggestionCache)

use std::time::Duration;

use crate::domains::suggestions::SuggestionResult;

// =============================================================================
// Suggestion Cache Trait (Infrastructure - TTL key/value store)
// =============================================================================

/// Expiring store for AI ranking results, keyed by a content hash.
///
/// Injected through `ServerDeps` so it can be swapped for a shared cache or
/// a fresh instance per test.
pub trait BaseSuggestionCache: Send + Sync {
    fn get(&self, key: &str) -> Option<SuggestionResult>;

    fn insert(&self, key: String, value: SuggestionResult);

    /// Drop every entry
    fn clear(&self);

    /// Approximate number of live entries
    fn entry_count(&self) -> u64;

    fn ttl(&self) -> Duration;
}
