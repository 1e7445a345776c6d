//! End-to-end pipeline tests against a stub upstream: fetch -> normalize ->
//! cache -> table queries -> CSV export, exactly as the presenter consumes it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cryptopulse::{
    convert_amount, export, top_gainers, Currency, DashboardError, Listing, ListingsCache,
    ListingsInteractor, ListingsInteractorImpl, ListingsService, Quote,
};

/// Stub returning `limit` well-formed USD records, rank-ordered, and counting
/// upstream calls.
struct StubCmcService {
    calls: AtomicUsize,
}

impl StubCmcService {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ListingsService for StubCmcService {
    async fn fetch_listings(
        &self,
        limit: u32,
        currency: Currency,
    ) -> Result<Vec<Listing>, DashboardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok((1..=limit)
            .map(|rank| {
                let mut quote = HashMap::new();
                quote.insert(
                    currency.code().to_string(),
                    Quote {
                        price: 1000.0 / rank as f64,
                        volume_24h: 1e9 / rank as f64,
                        percent_change_1h: 0.01 * rank as f64,
                        percent_change_24h: 10.0 - rank as f64,
                        percent_change_7d: rank as f64,
                        market_cap: 1e12 / rank as f64,
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

fn pipeline() -> (Arc<StubCmcService>, ListingsInteractorImpl) {
    let service = Arc::new(StubCmcService::new());
    let cache = Arc::new(ListingsCache::new(
        service.clone(),
        Duration::from_secs(300),
    ));
    (service, ListingsInteractorImpl::new(cache))
}

#[tokio::test]
async fn ten_records_become_ten_rows_in_rank_order() {
    let (_, interactor) = pipeline();

    let rows = interactor.get_rows(10, Currency::USD).await.unwrap();

    assert_eq!(rows.len(), 10);
    for (i, row) in rows.iter().enumerate() {
        let rank = i + 1;
        assert_eq!(row.symbol, format!("C{}", rank));
        assert_eq!(row.name, format!("Coin {}", rank));
        assert_eq!(row.slug, format!("coin-{}", rank));
        assert!(row.price > 0.0);
        assert!(row.market_cap > 0.0);
        assert!(row.volume_24h > 0.0);
        assert_eq!(row.percent_change_7d, rank as f64);
    }
}

#[tokio::test]
async fn repeated_requests_within_ttl_hit_upstream_once() {
    let (service, interactor) = pipeline();

    let first = interactor.get_rows(10, Currency::USD).await.unwrap();
    let second = interactor.get_rows(10, Currency::USD).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn refresh_bypasses_the_cached_entry() {
    let (service, interactor) = pipeline();

    interactor.get_rows(10, Currency::USD).await.unwrap();
    interactor.refresh(10, Currency::USD).await.unwrap();

    assert_eq!(service.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn exported_csv_parses_back_to_the_same_table() {
    let (_, interactor) = pipeline();
    let rows = interactor.get_rows(25, Currency::USD).await.unwrap();

    let csv = export::to_csv(&rows).unwrap();
    let parsed = export::from_csv(&csv).unwrap();

    assert_eq!(parsed, rows);
}

#[tokio::test]
async fn table_queries_run_on_pipeline_output() {
    let (_, interactor) = pipeline();
    let rows = interactor.get_rows(10, Currency::USD).await.unwrap();

    // Rank 1 has the best 24h change in the stub data.
    let gainers = top_gainers(&rows, 3);
    assert_eq!(gainers[0].symbol, "C1");

    let conversion = convert_amount(&rows, 100.0, "C2").unwrap();
    assert_eq!(conversion.unit_price, 500.0);
    assert!((conversion.converted - 0.2).abs() < 1e-12);
}
