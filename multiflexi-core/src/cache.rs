//! Time-bounded fetch cache
//!
//! Entries are keyed by a canonical [`RequestSignature`] and hold an owned
//! value. Reads hand out clones, so callers can never mutate what the next
//! hit returns. The map sits behind a reader/writer lock shared by all
//! concurrent fetches; writers always replace whole entries.
//!
//! `clear` and `invalidate_noun` bump a generation counter. A fetch takes a
//! [`Generation`] before calling out and stores its result through
//! [`FetchCache::insert_if_current`], so a result computed before an
//! invalidation is never written back after it.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Canonical key of a fetch: `noun:operation:fmt=..:ord=..:lim=..:off=..`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestSignature(String);

impl RequestSignature {
    #[must_use]
    pub fn new(
        noun: &str,
        operation: &str,
        format: &str,
        order: &str,
        limit: usize,
        offset: usize,
    ) -> Self {
        Self(format!(
            "{noun}:{operation}:fmt={format}:ord={order}:lim={limit}:off={offset}"
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The entity noun the signature was built for
    #[must_use]
    pub fn noun(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }
}

impl fmt::Display for RequestSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entry counts at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total: usize,
    pub expired: usize,
    pub active: usize,
}

struct CacheEntry<T> {
    value: T,
    created: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) < self.ttl
    }
}

/// Point in the cache's invalidation history, see [`FetchCache::generation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    epoch: u64,
    noun: u64,
}

struct Store<T> {
    entries: HashMap<RequestSignature, CacheEntry<T>>,
    /// Bumped by `clear`
    epoch: u64,
    /// Bumped per noun by `invalidate_noun`
    nouns: HashMap<String, u64>,
}

impl<T> Store<T> {
    fn generation(&self, noun: &str) -> Generation {
        Generation {
            epoch: self.epoch,
            noun: self.nouns.get(noun).copied().unwrap_or_default(),
        }
    }
}

/// Shared TTL cache
pub struct FetchCache<T> {
    store: RwLock<Store<T>>,
}

impl<T: Clone + Send + Sync> FetchCache<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                entries: HashMap::new(),
                epoch: 0,
                nouns: HashMap::new(),
            }),
        }
    }

    /// Clone of the live entry for `signature`, if any.
    ///
    /// Expired entries are ignored here and left for [`Self::sweep_expired`].
    pub async fn get(&self, signature: &RequestSignature) -> Option<T> {
        let now = Instant::now();
        self.store
            .read()
            .await
            .entries
            .get(signature)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Store `value`, replacing any previous entry for `signature`.
    pub async fn insert(&self, signature: RequestSignature, value: T, ttl: Duration) {
        let entry = CacheEntry {
            value,
            created: Instant::now(),
            ttl,
        };
        self.store.write().await.entries.insert(signature, entry);
    }

    /// Current generation of `noun`; take it before fetching.
    pub async fn generation(&self, noun: &str) -> Generation {
        self.store.read().await.generation(noun)
    }

    /// Store `value` unless the cache was cleared or its noun invalidated
    /// since `since` was taken. Returns whether the value was stored.
    pub async fn insert_if_current(
        &self,
        signature: RequestSignature,
        value: T,
        ttl: Duration,
        since: Generation,
    ) -> bool {
        let mut store = self.store.write().await;
        if store.generation(signature.noun()) != since {
            return false;
        }
        let entry = CacheEntry {
            value,
            created: Instant::now(),
            ttl,
        };
        store.entries.insert(signature, entry);
        true
    }

    /// Drop every entry, returning how many were removed.
    pub async fn clear(&self) -> usize {
        let mut store = self.store.write().await;
        let removed = store.entries.len();
        store.entries.clear();
        store.epoch += 1;
        removed
    }

    /// Drop the entries of one noun.
    pub async fn invalidate_noun(&self, noun: &str) -> usize {
        let mut store = self.store.write().await;
        let before = store.entries.len();
        store.entries.retain(|signature, _| signature.noun() != noun);
        *store.nouns.entry(noun.to_string()).or_default() += 1;
        before - store.entries.len()
    }

    /// Drop only the entries whose TTL has elapsed.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut store = self.store.write().await;
        let before = store.entries.len();
        store.entries.retain(|_, entry| entry.is_live(now));
        before - store.entries.len()
    }

    pub async fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let store = self.store.read().await;
        let entries = &store.entries;
        let total = entries.len();
        let expired = entries.values().filter(|entry| !entry.is_live(now)).count();
        CacheStats {
            total,
            expired,
            active: total - expired,
        }
    }
}

impl<T: Clone + Send + Sync> Default for FetchCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(noun: &str, offset: usize) -> RequestSignature {
        RequestSignature::new(noun, "list", "json", "D", 10, offset)
    }

    #[test]
    fn signature_is_canonical() {
        let signature = sig("job", 20);
        assert_eq!(signature.as_str(), "job:list:fmt=json:ord=D:lim=10:off=20");
        assert_eq!(signature.noun(), "job");
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = FetchCache::new();
        cache
            .insert(sig("job", 0), vec![1, 2, 3], Duration::from_secs(30))
            .await;

        tokio::time::advance(Duration::from_secs(29)).await;
        assert_eq!(cache.get(&sig("job", 0)).await, Some(vec![1, 2, 3]));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get(&sig("job", 0)).await, None);
    }

    #[tokio::test]
    async fn returned_values_are_independent_copies() {
        let cache = FetchCache::new();
        cache
            .insert(sig("job", 0), vec!["a".to_string()], Duration::from_secs(30))
            .await;

        let mut first = cache.get(&sig("job", 0)).await.unwrap();
        first.push("mutated".to_string());
        first[0].push('!');

        assert_eq!(cache.get(&sig("job", 0)).await.unwrap(), vec!["a".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_keeps_live_entries() {
        let cache = FetchCache::new();
        cache.insert(sig("job", 0), 1, Duration::from_secs(5)).await;
        cache.insert(sig("job", 10), 2, Duration::from_secs(60)).await;

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(
            cache.stats().await,
            CacheStats {
                total: 2,
                expired: 1,
                active: 1
            }
        );

        assert_eq!(cache.sweep_expired().await, 1);
        assert_eq!(cache.get(&sig("job", 10)).await, Some(2));
        assert_eq!(cache.stats().await.total, 1);
    }

    #[tokio::test]
    async fn clear_and_invalidate_noun() {
        let cache = FetchCache::new();
        let ttl = Duration::from_secs(60);
        cache.insert(sig("job", 0), 1, ttl).await;
        cache.insert(sig("job", 10), 2, ttl).await;
        cache.insert(sig("company", 0), 3, ttl).await;

        assert_eq!(cache.invalidate_noun("job").await, 2);
        assert_eq!(cache.get(&sig("company", 0)).await, Some(3));
        assert_eq!(cache.clear().await, 1);
        assert_eq!(cache.stats().await, CacheStats::default());
    }

    #[tokio::test]
    async fn stale_generation_is_not_stored() {
        let cache = FetchCache::new();
        let ttl = Duration::from_secs(60);

        let before = cache.generation("job").await;
        cache.invalidate_noun("job").await;
        assert!(!cache.insert_if_current(sig("job", 0), 1, ttl, before).await);
        assert_eq!(cache.get(&sig("job", 0)).await, None);

        // other nouns are unaffected by a job invalidation
        let company = cache.generation("company").await;
        cache.invalidate_noun("job").await;
        assert!(cache.insert_if_current(sig("company", 0), 2, ttl, company).await);

        let before = cache.generation("company").await;
        cache.clear().await;
        assert!(!cache.insert_if_current(sig("company", 0), 3, ttl, before).await);
        assert_eq!(cache.stats().await.total, 0);

        let current = cache.generation("job").await;
        assert!(cache.insert_if_current(sig("job", 0), 4, ttl, current).await);
        assert_eq!(cache.get(&sig("job", 0)).await, Some(4));
    }
}
