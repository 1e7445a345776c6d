use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::entity::{Currency, DashboardError, NormalizedRow};
use crate::market::listings_service::ListingsService;
use crate::market::normalizer::normalize;

/// Source of "now" for cache freshness checks, injected so tests control time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheEntry {
    rows: Vec<NormalizedRow>,
    created_at: DateTime<Utc>,
}

type CacheKey = (u32, Currency);
type Slot = Arc<tokio::sync::Mutex<Option<CacheEntry>>>;

/// Time-boxed memoization of normalized listing tables, keyed by
/// `(limit, currency)`.
///
/// Each key owns an async mutex held for the whole fetch+normalize, so
/// concurrent requests for the same key during a miss collapse into a single
/// upstream call and all waiters read the entry it stored. Lookups for other
/// keys only contend on the brief outer map lock.
///
/// Entries are replaced wholesale on expiry, never partially mutated, and a
/// failed fetch stores nothing: the error propagates and a stale entry is
/// not served as a fallback.
pub struct ListingsCache {
    service: Arc<dyn ListingsService>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl ListingsCache {
    pub fn new(service: Arc<dyn ListingsService>, ttl: Duration) -> Self {
        Self::with_clock(service, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(
        service: Arc<dyn ListingsService>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            service,
            clock,
            // A TTL too large for chrono means the entry simply never expires
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the memoized table for `(limit, currency)` while it is fresh,
    /// otherwise fetches, normalizes, stores and returns a new one.
    pub async fn get_or_fetch(
        &self,
        limit: u32,
        currency: Currency,
    ) -> Result<Vec<NormalizedRow>, DashboardError> {
        let slot = self.slot(limit, currency);
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            if self.clock.now() - cached.created_at < self.ttl {
                debug!("Cache hit for limit={} currency={}", limit, currency);
                return Ok(cached.rows.clone());
            }
            debug!("Cache entry expired for limit={} currency={}", limit, currency);
        }

        let listings = self.service.fetch_listings(limit, currency).await?;
        let rows = normalize(&listings, currency)?;

        info!(
            "Cached {} rows for limit={} currency={}",
            rows.len(),
            limit,
            currency
        );
        *entry = Some(CacheEntry {
            rows: rows.clone(),
            created_at: self.clock.now(),
        });

        Ok(rows)
    }

    /// Drops the entry for one key so the next request refetches.
    pub fn invalidate(&self, limit: u32, currency: Currency) {
        self.slots.lock().unwrap().remove(&(limit, currency));
    }

    /// Drops every entry. The cache lives only in process memory anyway;
    /// this is the in-process equivalent of a restart.
    pub fn clear(&self) {
        self.slots.lock().unwrap().clear();
    }

    fn slot(&self, limit: u32, currency: Currency) -> Slot {
        self.slots
            .lock()
            .unwrap()
            .entry((limit, currency))
            .or_default()
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::models::{Listing, Quote};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(300);

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Utc::now()),
            }
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now = *now + chrono::Duration::from_std(by).unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    /// Counting stub that serves `limit` well-formed records per call.
    struct StubListingsService {
        calls: AtomicUsize,
        fail_first: bool,
        delay: Option<Duration>,
    }

    impl StubListingsService {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_first: false,
                delay: None,
            }
        }

        fn failing_first() -> Self {
            Self {
                fail_first: true,
                ..Self::new()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::new()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ListingsService for StubListingsService {
        async fn fetch_listings(
            &self,
            limit: u32,
            currency: Currency,
        ) -> Result<Vec<Listing>, DashboardError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_first && call == 0 {
                return Err(DashboardError::network("connection refused"));
            }

            Ok((1..=limit)
                .map(|rank| {
                    let mut quote = HashMap::new();
                    quote.insert(
                        currency.code().to_string(),
                        Quote {
                            price: rank as f64,
                            volume_24h: rank as f64 * 10.0,
                            percent_change_1h: 0.0,
                            percent_change_24h: 1.0,
                            percent_change_7d: 2.0,
                            market_cap: rank as f64 * 100.0,
                            last_updated: None,
                        },
                    );
                    Listing {
                        id: rank as u64,
                        name: format!("Coin {}", rank),
                        symbol: format!("C{}", rank),
                        slug: format!("coin-{}", rank),
                        cmc_rank: Some(rank as u64),
                        quote,
                    }
                })
                .collect())
        }
    }

    fn cache_with(
        service: Arc<StubListingsService>,
        clock: Arc<ManualClock>,
    ) -> ListingsCache {
        ListingsCache::with_clock(service, TTL, clock)
    }

    #[tokio::test]
    async fn second_request_within_ttl_skips_upstream() {
        let service = Arc::new(StubListingsService::new());
        let cache = cache_with(service.clone(), Arc::new(ManualClock::new()));

        let first = cache.get_or_fetch(5, Currency::USD).await.unwrap();
        let second = cache.get_or_fetch(5, Currency::USD).await.unwrap();

        assert_eq!(service.calls(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn entry_is_fresh_just_before_ttl_and_expired_just_after() {
        let service = Arc::new(StubListingsService::new());
        let clock = Arc::new(ManualClock::new());
        let cache = cache_with(service.clone(), clock.clone());

        cache.get_or_fetch(3, Currency::USD).await.unwrap();

        clock.advance(TTL - Duration::from_secs(1));
        cache.get_or_fetch(3, Currency::USD).await.unwrap();
        assert_eq!(service.calls(), 1, "entry at TTL-1s must still be served");

        clock.advance(Duration::from_secs(2));
        cache.get_or_fetch(3, Currency::USD).await.unwrap();
        assert_eq!(service.calls(), 2, "entry past TTL must be refetched");
    }

    #[tokio::test]
    async fn distinct_keys_do_not_share_entries() {
        let service = Arc::new(StubListingsService::new());
        let cache = cache_with(service.clone(), Arc::new(ManualClock::new()));

        cache.get_or_fetch(5, Currency::USD).await.unwrap();
        cache.get_or_fetch(5, Currency::BTC).await.unwrap();
        cache.get_or_fetch(10, Currency::USD).await.unwrap();

        assert_eq!(service.calls(), 3);
    }

    #[tokio::test]
    async fn failed_fetch_stores_nothing() {
        let service = Arc::new(StubListingsService::failing_first());
        let cache = cache_with(service.clone(), Arc::new(ManualClock::new()));

        let err = cache.get_or_fetch(5, Currency::USD).await.unwrap_err();
        assert!(matches!(err, DashboardError::Fetch { .. }));

        // The failure was not cached: the next request goes upstream again.
        let rows = cache.get_or_fetch(5, Currency::USD).await.unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn concurrent_misses_for_one_key_collapse_into_one_fetch() {
        let service = Arc::new(StubListingsService::slow(Duration::from_millis(50)));
        let cache = Arc::new(cache_with(service.clone(), Arc::new(ManualClock::new())));

        let a = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get_or_fetch(5, Currency::USD).await })
        };
        let b = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get_or_fetch(5, Currency::USD).await })
        };

        let rows_a = a.await.unwrap().unwrap();
        let rows_b = b.await.unwrap().unwrap();

        assert_eq!(service.calls(), 1);
        assert_eq!(rows_a, rows_b);
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let service = Arc::new(StubListingsService::new());
        let cache = cache_with(service.clone(), Arc::new(ManualClock::new()));

        cache.get_or_fetch(5, Currency::USD).await.unwrap();
        cache.invalidate(5, Currency::USD);
        cache.get_or_fetch(5, Currency::USD).await.unwrap();

        assert_eq!(service.calls(), 2);
    }
}
