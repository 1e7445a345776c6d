mod currency;
mod dashboard_error;
mod normalized_row;

pub use currency::Currency;
pub use dashboard_error::DashboardError;
pub use normalized_row::NormalizedRow;
