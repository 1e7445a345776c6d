use crate::entity::Currency;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("CoinMarketCap API error{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to parse listings response: {0}")]
    Parse(String),

    #[error("Quote for {currency} missing in listing {symbol}")]
    MissingCurrency { symbol: String, currency: Currency },

    #[error("No data available for the selected filters")]
    EmptyResult,

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid limit {0}: must be between 1 and 5000")]
    InvalidLimit(u32),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Amount and price must be greater than zero")]
    InvalidAmount,

    #[error("COINMARKETCAP_API_KEY must be set in environment variables")]
    MissingApiKey,

    #[error("CSV error: {0}")]
    Csv(String),
}

impl DashboardError {
    /// Error for a fetch failure that never produced an HTTP status
    /// (connect/timeout failures from the HTTP client).
    pub fn network(message: impl Into<String>) -> Self {
        Self::Fetch {
            status: None,
            message: message.into(),
        }
    }
}
