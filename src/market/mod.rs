// src/market/mod.rs
pub mod cache;
pub mod config;
pub mod listings_service;
pub mod models;
pub mod normalizer;

pub use cache::{Clock, ListingsCache, SystemClock};
pub use config::MarketConfig;
pub use listings_service::{CmcListingsService, ListingsService};
pub use models::{ApiStatus, Listing, ListingsResponse, Quote, MAX_LISTINGS_LIMIT};
pub use normalizer::normalize;
