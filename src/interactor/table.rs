//! Pure reshaping of normalized rows for display: summaries, sorting,
//! filtering and the amount converter. No I/O here.

use std::fmt;

use crate::entity::{DashboardError, NormalizedRow};

/// Column the main table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Price,
    MarketCap,
    Volume24h,
    PercentChange24h,
}

impl SortKey {
    fn value(&self, row: &NormalizedRow) -> f64 {
        match self {
            Self::Price => row.price,
            Self::MarketCap => row.market_cap,
            Self::Volume24h => row.volume_24h,
            Self::PercentChange24h => row.percent_change_24h,
        }
    }
}

/// Percent-change window offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Hour,
    Day,
    Week,
}

impl Timeframe {
    pub fn percent_change(&self, row: &NormalizedRow) -> f64 {
        match self {
            Self::Hour => row.percent_change_1h,
            Self::Day => row.percent_change_24h,
            Self::Week => row.percent_change_7d,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Hour => write!(f, "1h"),
            Self::Day => write!(f, "24h"),
            Self::Week => write!(f, "7d"),
        }
    }
}

/// One bar of the percent-change chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentChangeRow {
    pub symbol: String,
    pub change: f64,
    pub positive: bool,
}

/// Result of converting a fiat amount into one coin.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub symbol: String,
    pub unit_price: f64,
    pub converted: f64,
}

/// Rows with the `n` best 24h percent changes, best first.
pub fn top_gainers(rows: &[NormalizedRow], n: usize) -> Vec<NormalizedRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.percent_change_24h.total_cmp(&a.percent_change_24h));
    sorted.truncate(n);
    sorted
}

/// Rows with the `n` worst 24h percent changes, worst first.
pub fn top_losers(rows: &[NormalizedRow], n: usize) -> Vec<NormalizedRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| a.percent_change_24h.total_cmp(&b.percent_change_24h));
    sorted.truncate(n);
    sorted
}

/// Sorts a table by one column.
pub fn sort_rows(mut rows: Vec<NormalizedRow>, key: SortKey, descending: bool) -> Vec<NormalizedRow> {
    rows.sort_by(|a, b| {
        let ord = key.value(a).total_cmp(&key.value(b));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    rows
}

/// Keeps only the rows whose symbol is in `symbols` (case-insensitive),
/// preserving table order.
pub fn filter_by_symbols(rows: &[NormalizedRow], symbols: &[String]) -> Vec<NormalizedRow> {
    rows.iter()
        .filter(|row| {
            symbols
                .iter()
                .any(|s| s.eq_ignore_ascii_case(&row.symbol))
        })
        .cloned()
        .collect()
}

/// First `n` rows of the table (rank order).
pub fn take_top(rows: &[NormalizedRow], n: usize) -> Vec<NormalizedRow> {
    rows.iter().take(n).cloned().collect()
}

/// Symbol + percent change for one timeframe, the data behind the bar chart.
///
/// Zero input rows short-circuits chart rendering with `EmptyResult`.
pub fn percent_change_table(
    rows: &[NormalizedRow],
    timeframe: Timeframe,
) -> Result<Vec<PercentChangeRow>, DashboardError> {
    if rows.is_empty() {
        return Err(DashboardError::EmptyResult);
    }

    Ok(rows
        .iter()
        .map(|row| {
            let change = timeframe.percent_change(row);
            PercentChangeRow {
                symbol: row.symbol.clone(),
                change,
                positive: change > 0.0,
            }
        })
        .collect())
}

/// Converts `amount` (in the table's conversion currency) into units of the
/// coin with the given symbol.
pub fn convert_amount(
    rows: &[NormalizedRow],
    amount: f64,
    symbol: &str,
) -> Result<Conversion, DashboardError> {
    if amount <= 0.0 {
        return Err(DashboardError::InvalidAmount);
    }

    let row = rows
        .iter()
        .find(|row| row.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| DashboardError::UnknownSymbol(symbol.to_string()))?;

    if row.price <= 0.0 {
        return Err(DashboardError::InvalidAmount);
    }

    Ok(Conversion {
        amount,
        symbol: row.symbol.clone(),
        unit_price: row.price,
        converted: amount / row.price,
    })
}
