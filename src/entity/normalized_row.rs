use serde::{Deserialize, Serialize};

/// One listing flattened for a single conversion currency.
///
/// Field order is the CSV column order, so keep new fields at the end.
/// Values are carried through from the upstream quote unmodified; the only
/// transformation on the way here is selecting the currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub symbol: String,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
}
