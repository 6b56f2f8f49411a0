/*!
 * Statistics caching.
 *
 * Datasets are kept per (release, language) for a fixed time so that
 * switching back and forth between views does not hit the API again.
 * Entries are immutable: a stale entry is replaced by a fresh one, never
 * updated in place.
 */

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use parking_lot::RwLock;

use crate::errors::StatsError;
use crate::providers::StatsSource;
use crate::stats::Dataset;

/// Default time-to-live of a cached dataset, in seconds
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Source of wall-clock time for expiry decisions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cache key: one release in one language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Release identifier
    pub release: String,

    /// Language code
    pub language: String,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(release: &str, language: &str) -> Self {
        Self {
            release: release.to_string(),
            language: language.to_string(),
        }
    }
}

/// A fetched dataset and when it was fetched
#[derive(Debug)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub dataset: Dataset,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Age of the entry at `now`; negative if the clock went backwards
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.fetched_at
    }

    /// An entry is fresh while its age does not exceed the TTL
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) <= ttl
    }
}

/// Hit/miss counters, as returned by `StatsCache::stats`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Time-based cache of statistics datasets
///
/// Two concurrent misses for the same key both reach the source; the later
/// result replaces the earlier one.
pub struct StatsCache {
    /// Internal cache storage
    entries: Arc<RwLock<HashMap<CacheKey, Arc<CacheEntry>>>>,

    /// Hit and miss counters
    counters: Arc<RwLock<CacheStats>>,

    /// How long an entry stays valid
    ttl: Duration,

    clock: Arc<dyn Clock>,
}

impl StatsCache {
    /// Create a cache using the system clock
    pub fn new(ttl_secs: u64) -> Self {
        Self::with_clock(ttl_secs, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit clock
    pub fn with_clock(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        // chrono durations are bounded to i64 milliseconds
        let ttl_secs = ttl_secs.min((i64::MAX / 1000) as u64) as i64;
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            counters: Arc::new(RwLock::new(CacheStats::default())),
            ttl: Duration::seconds(ttl_secs),
            clock,
        }
    }

    /// The configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh entry without touching the source
    ///
    /// Stale entries are removed on the way.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<CacheEntry>> {
        let now = self.clock.now();

        let entry = self.entries.read().get(key).cloned();
        match entry {
            Some(entry) if entry.is_fresh(now, self.ttl) => {
                self.counters.write().hits += 1;
                debug!(
                    "Cache hit for {}/{} (age {}s)",
                    key.release,
                    key.language,
                    entry.age(now).num_seconds()
                );
                Some(entry)
            }
            Some(entry) => {
                self.counters.write().misses += 1;
                debug!(
                    "Cache entry for {}/{} expired (age {}s)",
                    key.release,
                    key.language,
                    entry.age(now).num_seconds()
                );
                let mut entries = self.entries.write();
                // Only drop the entry we judged stale; another task may have replaced it
                if entries.get(key).is_some_and(|current| Arc::ptr_eq(current, &entry)) {
                    entries.remove(key);
                }
                None
            }
            None => {
                self.counters.write().misses += 1;
                debug!("Cache miss for {}/{}", key.release, key.language);
                None
            }
        }
    }

    /// Store a freshly fetched dataset, replacing any previous entry
    pub fn store(&self, key: CacheKey, dataset: Dataset) -> Arc<CacheEntry> {
        let entry = Arc::new(CacheEntry {
            key: key.clone(),
            dataset,
            fetched_at: self.clock.now(),
        });

        debug!(
            "Cached {} modules for {}/{}",
            entry.dataset.len(),
            key.release,
            key.language
        );
        self.entries.write().insert(key, entry.clone());
        entry
    }

    /// Return the cached dataset for `key`, fetching it from `source` when
    /// there is no fresh entry
    ///
    /// Fetch errors are returned unchanged and nothing is cached.
    pub async fn get_or_fetch<S>(&self, key: &CacheKey, source: &S) -> Result<Dataset, StatsError>
    where
        S: StatsSource + ?Sized,
    {
        if let Some(entry) = self.get(key) {
            return Ok(entry.dataset.clone());
        }

        let dataset = source.fetch(&key.release, &key.language).await?;
        let entry = self.store(key.clone(), dataset);
        Ok(entry.dataset.clone())
    }

    /// Drop the entry for one key so the next lookup refetches it
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        let removed = self.entries.write().remove(key).is_some();
        if removed {
            debug!("Invalidated cache entry for {}/{}", key.release, key.language);
        }
        removed
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        *self.counters.read()
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.entries.write().clear();
        *self.counters.write() = CacheStats::default();

        debug!("Statistics cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for StatsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}

impl Clone for StatsCache {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            counters: self.counters.clone(),
            ttl: self.ttl,
            clock: self.clock.clone(),
        }
    }
}

impl std::fmt::Debug for StatsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsCache")
            .field("entries", &self.len())
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish()
    }
}
