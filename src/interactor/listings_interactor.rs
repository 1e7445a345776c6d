use std::sync::Arc;

use async_trait::async_trait;

use crate::entity::{Currency, DashboardError, NormalizedRow};
use crate::market::ListingsCache;

#[async_trait]
pub trait ListingsInteractor: Send + Sync {
    /// Current table for `(limit, currency)`, served from cache while fresh.
    async fn get_rows(
        &self,
        limit: u32,
        currency: Currency,
    ) -> Result<Vec<NormalizedRow>, DashboardError>;

    /// User-triggered refresh: drops the cached entry and fetches anew.
    async fn refresh(
        &self,
        limit: u32,
        currency: Currency,
    ) -> Result<Vec<NormalizedRow>, DashboardError>;
}

pub struct ListingsInteractorImpl {
    cache: Arc<ListingsCache>,
}

impl ListingsInteractorImpl {
    pub fn new(cache: Arc<ListingsCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl ListingsInteractor for ListingsInteractorImpl {
    async fn get_rows(
        &self,
        limit: u32,
        currency: Currency,
    ) -> Result<Vec<NormalizedRow>, DashboardError> {
        self.cache.get_or_fetch(limit, currency).await
    }

    async fn refresh(
        &self,
        limit: u32,
        currency: Currency,
    ) -> Result<Vec<NormalizedRow>, DashboardError> {
        self.cache.invalidate(limit, currency);
        self.cache.get_or_fetch(limit, currency).await
    }
}
