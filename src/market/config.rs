use std::env;
use std::time::Duration;

use crate::entity::DashboardError;

const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Market data configuration
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Base URL of the CoinMarketCap API
    pub base_url: String,

    /// API key, sent in the `X-CMC_PRO_API_KEY` header
    pub api_key: String,

    /// Per-request timeout; a slow upstream fails fast instead of hanging
    pub timeout: Duration,

    /// How long a cached table stays fresh
    pub cache_ttl: Duration,
}

impl MarketConfig {
    /// Creates a configuration with default endpoint and timings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }

    /// Creates a configuration from environment variables.
    ///
    /// The API key has no default and no fallback: credentials come from
    /// external configuration only.
    pub fn from_env() -> Result<Self, DashboardError> {
        let api_key =
            env::var("COINMARKETCAP_API_KEY").map_err(|_| DashboardError::MissingApiKey)?;

        Ok(Self {
            base_url: env::var("CMC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key,
            timeout: Duration::from_secs(
                env::var("CMC_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            cache_ttl: Duration::from_secs(
                env::var("CMC_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            ),
        })
    }
}
