// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory cache with a fixed freshness window per entry

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::{CacheState, CacheStats};

/// A cached value and the instant it stops being fresh
///
/// Entries are replaced wholesale on refresh and never mutated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(value: T, window: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + window,
        }
    }

    /// The cached value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// When this entry becomes stale
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug)]
struct TimedCacheState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    stats: CacheStats,
}

impl<K, V> Default for TimedCacheState<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }
}

/// Keyed cache whose entries expire a fixed window after they were fetched
///
/// The lock is held across a fetch, so concurrent readers of a stale key wait
/// for the first fetch instead of issuing their own. Fetch closures must not
/// read the same cache.
///
/// Time is measured with [`tokio::time::Instant`], which makes expiry
/// testable under `tokio::time::pause`.
#[derive(Debug)]
pub struct TimedCache<K, V> {
    name: &'static str,
    window: Duration,
    state: Mutex<TimedCacheState<K, V>>,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Creates an empty cache whose entries stay fresh for `window`
    pub fn new(name: &'static str, window: Duration) -> Self {
        Self {
            name,
            window,
            state: Mutex::new(TimedCacheState::default()),
        }
    }

    /// Freshness window applied to every entry
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Name used in log events
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the cached value when fresh, otherwise fetches and stores it
    ///
    /// Performs at most one fetch per call. A failed fetch leaves the
    /// previous entry untouched and returns the error.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        let cached = state
            .entries
            .get(key)
            .map(|entry| entry.is_fresh(now).then(|| entry.value.clone()));

        match cached {
            Some(Some(value)) => {
                state.stats.hits += 1;
                debug!(cache = self.name, key = ?key, "Cache hit");
                return Ok(value);
            }
            Some(None) => {
                state.stats.expirations += 1;
                debug!(cache = self.name, key = ?key, "Cache entry stale, refetching");
            }
            None => {
                state.stats.misses += 1;
                debug!(cache = self.name, key = ?key, "Cache miss, fetching");
            }
        }

        let value = fetch().await?;
        state
            .entries
            .insert(key.clone(), CacheEntry::new(value.clone(), self.window));
        state.stats.fetches += 1;
        state.stats.entries = state.entries.len();
        Ok(value)
    }

    /// Returns the cached value only if it is fresh
    pub async fn get(&self, key: &K) -> Option<V> {
        let state = self.state.lock().await;
        let now = Instant::now();
        state
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone())
    }

    /// Stores a value obtained elsewhere, starting a new window
    pub async fn insert(&self, key: K, value: V) {
        let mut state = self.state.lock().await;
        debug!(cache = self.name, key = ?key, "Replacing cache entry");
        state
            .entries
            .insert(key, CacheEntry::new(value, self.window));
        state.stats.entries = state.entries.len();
    }

    /// Forces a key back to empty so the next read fetches
    ///
    /// Invalidating an empty key is a no-op.
    pub async fn invalidate(&self, key: &K) {
        let mut state = self.state.lock().await;
        if state.entries.remove(key).is_some() {
            debug!(cache = self.name, key = ?key, "Invalidated cache entry");
            state.stats.invalidations += 1;
            state.stats.entries = state.entries.len();
        }
    }

    /// Forces every key back to empty
    pub async fn invalidate_all(&self) {
        let mut state = self.state.lock().await;
        let removed = state.entries.len() as u64;
        if removed > 0 {
            debug!(cache = self.name, entries = removed, "Invalidated all cache entries");
        }
        state.entries.clear();
        state.stats.invalidations += removed;
        state.stats.entries = 0;
    }

    /// Current lifecycle state of a key
    pub async fn state(&self, key: &K) -> CacheState {
        let state = self.state.lock().await;
        match state.entries.get(key) {
            None => CacheState::Empty,
            Some(entry) if entry.is_fresh(Instant::now()) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }

    /// Returns current cache statistics
    pub async fn stats(&self) -> CacheStats {
        self.state.lock().await.stats.clone()
    }
}
