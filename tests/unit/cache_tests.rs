/*!
 * Tests for statistics cache functionality
 */

use gnome_l10n::errors::StatsError;
use gnome_l10n::providers::mock::MockSource;
use gnome_l10n::stats::StatsCache;
use gnome_l10n::stats::cache::{CacheKey, DEFAULT_TTL_SECS};

use crate::common::{ManualClock, init_logging};

fn cache_with_clock() -> (StatsCache, std::sync::Arc<ManualClock>) {
    let clock = ManualClock::new();
    (StatsCache::with_clock(DEFAULT_TTL_SECS, clock.clone()), clock)
}

#[tokio::test]
async fn test_getOrFetch_withinTtl_shouldNotFetchAgain() {
    init_logging();
    let (cache, clock) = cache_with_clock();
    let source = MockSource::working(MockSource::gedit_sample("sv"));
    let key = CacheKey::new("gnome-49", "sv");

    let first = cache.get_or_fetch(&key, &source).await.unwrap();
    clock.advance(3599);
    let second = cache.get_or_fetch(&key, &source).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(source.request_count(), 1);
}

#[tokio::test]
async fn test_getOrFetch_afterExpiry_shouldFetchExactlyOnce() {
    let (cache, clock) = cache_with_clock();
    let source = MockSource::working(MockSource::gedit_sample("sv"));
    let key = CacheKey::new("gnome-49", "sv");

    cache.get_or_fetch(&key, &source).await.unwrap();
    clock.advance(3601);

    cache.get_or_fetch(&key, &source).await.unwrap();
    assert_eq!(source.request_count(), 2);

    // The refetched entry is fresh again
    cache.get_or_fetch(&key, &source).await.unwrap();
    assert_eq!(source.request_count(), 2);
}

#[tokio::test]
async fn test_getOrFetch_atExactlyOneHour_shouldStillHit() {
    let (cache, clock) = cache_with_clock();
    let source = MockSource::working(MockSource::gedit_sample("sv"));
    let key = CacheKey::new("gnome-49", "sv");

    cache.get_or_fetch(&key, &source).await.unwrap();
    clock.advance(3600);
    cache.get_or_fetch(&key, &source).await.unwrap();

    assert_eq!(source.request_count(), 1);
}

#[tokio::test]
async fn test_getOrFetch_withDifferentKeys_shouldFetchEach() {
    let (cache, _clock) = cache_with_clock();
    let source = MockSource::working(MockSource::gedit_sample("sv"));

    let sv = cache.get_or_fetch(&CacheKey::new("gnome-49", "sv"), &source).await.unwrap();
    let de = cache.get_or_fetch(&CacheKey::new("gnome-49", "de"), &source).await.unwrap();
    let old = cache.get_or_fetch(&CacheKey::new("gnome-48", "sv"), &source).await.unwrap();

    assert_eq!(source.request_count(), 3);
    assert_eq!(cache.len(), 3);
    assert_eq!(sv.language, "sv");
    assert_eq!(de.language, "de");
    assert_eq!(old.modules[0].release, "gnome-48");
}

#[tokio::test]
async fn test_getOrFetch_withFailingSource_shouldNotCacheError() {
    let (cache, _clock) = cache_with_clock();
    let source = MockSource::not_found();
    let key = CacheKey::new("gnome-1", "sv");

    let result = cache.get_or_fetch(&key, &source).await;
    assert!(matches!(result, Err(StatsError::NotFound(_))));
    assert!(cache.is_empty());

    let _ = cache.get_or_fetch(&key, &source).await;
    assert_eq!(source.request_count(), 2);
}

#[tokio::test]
async fn test_getOrFetch_withIntermittentSource_shouldRecoverOnRetry() {
    let (cache, _clock) = cache_with_clock();
    let source = MockSource::intermittent(1, MockSource::gedit_sample("sv"));
    let key = CacheKey::new("gnome-49", "sv");

    // fail_every = 1 fails every request
    assert!(matches!(
        cache.get_or_fetch(&key, &source).await,
        Err(StatsError::Network(_))
    ));

    let flaky = MockSource::intermittent(2, MockSource::gedit_sample("sv"));
    assert!(cache.get_or_fetch(&key, &flaky).await.is_ok());
    // Served from cache, so the second (failing) request never happens
    assert!(cache.get_or_fetch(&key, &flaky).await.is_ok());
    assert_eq!(flaky.request_count(), 1);
}

#[tokio::test]
async fn test_invalidate_shouldForceRefetch() {
    let (cache, _clock) = cache_with_clock();
    let source = MockSource::working(MockSource::gedit_sample("sv"));
    let key = CacheKey::new("gnome-49", "sv");

    cache.get_or_fetch(&key, &source).await.unwrap();
    assert!(cache.invalidate(&key));
    cache.get_or_fetch(&key, &source).await.unwrap();

    assert_eq!(source.request_count(), 2);
}

#[tokio::test]
async fn test_stats_shouldCountHitsAndMisses() {
    let (cache, clock) = cache_with_clock();
    let source = MockSource::working(MockSource::gedit_sample("sv"));
    let key = CacheKey::new("gnome-49", "sv");

    cache.get_or_fetch(&key, &source).await.unwrap(); // miss
    cache.get_or_fetch(&key, &source).await.unwrap(); // hit
    clock.advance(7200);
    cache.get_or_fetch(&key, &source).await.unwrap(); // expired, miss

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert!((stats.hit_rate() - 1.0 / 3.0).abs() < 1e-9);

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.stats().hits, 0);
}

#[tokio::test]
async fn test_clone_shouldShareStorage() {
    let (cache1, _clock) = cache_with_clock();
    let cache2 = cache1.clone();
    let source = MockSource::working(MockSource::gedit_sample("sv"));
    let key = CacheKey::new("gnome-49", "sv");

    cache1.get_or_fetch(&key, &source).await.unwrap();
    cache2.get_or_fetch(&key, &source).await.unwrap();

    assert_eq!(source.request_count(), 1);
}

#[test]
fn test_default_shouldUseOneHourTtl() {
    let cache = StatsCache::default();
    assert_eq!(cache.ttl().num_seconds(), 3600);
}

#[tokio::test]
async fn test_getOrFetch_withMalformedResponse_shouldReturnParseAndCacheNothing() {
    let (cache, _clock) = cache_with_clock();
    let source = MockSource::malformed();
    let key = CacheKey::new("gnome-49", "sv");

    let result = cache.get_or_fetch(&key, &source).await;
    assert!(matches!(result, Err(StatsError::Parse(_))));
    assert!(cache.is_empty());

    // Nothing was stored, so the next call asks the source again
    assert!(cache.get_or_fetch(&key, &source).await.is_err());
    assert_eq!(source.request_count(), 2);
}
