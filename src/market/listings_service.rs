use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;

use crate::entity::{Currency, DashboardError};
use crate::market::config::MarketConfig;
use crate::market::models::{Listing, ListingsResponse, MAX_LISTINGS_LIMIT};

/// Upstream source of listing data.
#[async_trait]
pub trait ListingsService: Send + Sync {
    /// Fetch the top `limit` listings with quotes converted into `currency`.
    ///
    /// Exactly one attempt per invocation; a refresh is a new call.
    async fn fetch_listings(
        &self,
        limit: u32,
        currency: Currency,
    ) -> Result<Vec<Listing>, DashboardError>;
}

/// `ListingsService` backed by the CoinMarketCap `listings/latest` endpoint.
pub struct CmcListingsService {
    http_client: Client,
    config: MarketConfig,
}

impl CmcListingsService {
    pub fn new(config: MarketConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ListingsService for CmcListingsService {
    async fn fetch_listings(
        &self,
        limit: u32,
        currency: Currency,
    ) -> Result<Vec<Listing>, DashboardError> {
        if limit == 0 || limit > MAX_LISTINGS_LIMIT {
            return Err(DashboardError::InvalidLimit(limit));
        }

        let url = format!("{}/v1/cryptocurrency/listings/latest", self.config.base_url);
        debug!("Requesting top {} listings in {}", limit, currency);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("start", "1".to_string()),
                ("limit", limit.to_string()),
                ("convert", currency.code().to_string()),
            ])
            .header("X-CMC_PRO_API_KEY", &self.config.api_key)
            .header("Accepts", "application/json")
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach CoinMarketCap API: {}", e);
                DashboardError::network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::network(e.to_string()))?;

        if !status.is_success() {
            // The error body usually carries a status object with a readable
            // message; fall back to the HTTP reason when it does not parse.
            let message = serde_json::from_str::<ListingsResponse>(&body)
                .ok()
                .and_then(|r| r.status)
                .and_then(|s| s.error_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            error!(
                "CoinMarketCap API error [fetch_listings]: {} {}",
                status, message
            );
            return Err(DashboardError::Fetch {
                status: Some(status.as_u16()),
                message,
            });
        }

        let parsed: ListingsResponse =
            serde_json::from_str(&body).map_err(|e| DashboardError::Parse(e.to_string()))?;

        match parsed.data {
            Some(listings) => {
                info!("Fetched {} listings ({})", listings.len(), currency);
                Ok(listings)
            }
            None => {
                let message = parsed
                    .status
                    .and_then(|s| s.error_message)
                    .unwrap_or_else(|| "missing data".to_string());
                error!("CoinMarketCap response without data field: {}", message);
                Err(DashboardError::Fetch {
                    status: Some(status.as_u16()),
                    message,
                })
            }
        }
    }
}
