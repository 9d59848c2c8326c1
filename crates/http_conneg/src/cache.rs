//! I implement [`MatcherCache`], a bounded, recency-ordered cache from raw
//! `Accept` header strings to [`crate::Matcher::select`] answers.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

/// Default cache bound, per §4.6.
pub const DEFAULT_CAPACITY: usize = 50;

/// A bounded mapping from a raw header string to the matcher's answer for
/// it, evicting least-recently-used entries on overflow.
///
/// The cached value is `Option<String>` — `None` is a valid, cacheable
/// answer (no acceptable representation), distinct from the key being
/// altogether absent from the cache. Lookups update recency.
///
/// Safe for concurrent use: per §5 strategy 1, all cache operations run
/// inside a single mutex; callers are expected to do any parsing *before*
/// calling [`Self::insert`] so the critical section stays O(1). [`Self::get`]
/// and [`Self::insert`] are separate calls rather than a single
/// fetch-or-compute method because parsing is fallible
/// ([`crate::parser::MalformedAccept`]) and a failed parse must never be
/// cached — see [`crate::Matcher::select`].
pub struct MatcherCache {
    inner: Mutex<LruCache<String, Option<String>>>,
}

impl MatcherCache {
    /// Builds a cache bounded at `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Looks up `key`. `Some(_)` means present in the cache (whose payload
    /// may itself be `None`, a cached "no match"); `None` means a miss.
    /// Updates recency on a hit.
    pub fn get(&self, key: &str) -> Option<Option<String>> {
        self.inner.lock().get(key).cloned()
    }

    /// Inserts `value` for `key`, evicting the least-recently-used entry if
    /// the cache is at capacity.
    pub fn insert(&self, key: &str, value: Option<String>) {
        self.inner.lock().put(key.to_string(), value);
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache currently holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MatcherCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
