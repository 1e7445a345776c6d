use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Hard maximum for the `limit` parameter of the listings endpoint.
pub const MAX_LISTINGS_LIMIT: u32 = 5000;

/// Per-currency price block inside a listing's `quote` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub volume_24h: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    pub market_cap: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// One cryptocurrency's market snapshot as returned by `listings/latest`.
///
/// The response array is ordered by market-cap rank; that order is preserved
/// all the way to the rendered table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    #[serde(default)]
    pub cmc_rank: Option<u64>,
    pub quote: HashMap<String, Quote>,
}

/// `status` object attached to every CoinMarketCap response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub credit_count: Option<u64>,
}

/// Top-level body of `listings/latest`. `data` is absent on upstream errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsResponse {
    #[serde(default)]
    pub data: Option<Vec<Listing>>,
    #[serde(default)]
    pub status: Option<ApiStatus>,
}
