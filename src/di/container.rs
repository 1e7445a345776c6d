use std::sync::Arc;

use crate::interactor::ListingsInteractorImpl;
use crate::market::{CmcListingsService, ListingsCache, ListingsService, MarketConfig};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Upstream client behind its trait so tests and alternative sources can
    // swap it out
    listings_service: Arc<dyn ListingsService>,

    // Shared TTL cache over the service
    listings_cache: Arc<ListingsCache>,

    // Concrete type so it can be used as a generic parameter of the presenter
    listings_interactor: Arc<ListingsInteractorImpl>,

    // Configuration
    market_config: MarketConfig,
}

impl ServiceContainer {
    /// Create a new service container with essential dependencies
    pub fn new(market_config: MarketConfig) -> Self {
        let listings_service = Arc::new(CmcListingsService::new(market_config.clone()))
            as Arc<dyn ListingsService>;

        let listings_cache = Arc::new(ListingsCache::new(
            listings_service.clone(),
            market_config.cache_ttl,
        ));

        let listings_interactor = Arc::new(ListingsInteractorImpl::new(listings_cache.clone()));

        Self {
            listings_service,
            listings_cache,
            listings_interactor,
            market_config,
        }
    }

    // Accessor methods

    pub fn listings_service(&self) -> Arc<dyn ListingsService> {
        self.listings_service.clone()
    }

    pub fn listings_cache(&self) -> Arc<ListingsCache> {
        self.listings_cache.clone()
    }

    pub fn listings_interactor(&self) -> Arc<ListingsInteractorImpl> {
        self.listings_interactor.clone()
    }

    pub fn market_config(&self) -> MarketConfig {
        self.market_config.clone()
    }
}
