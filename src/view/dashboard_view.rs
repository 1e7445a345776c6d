use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entity::{Currency, NormalizedRow};
use crate::interactor::{PercentChangeRow, Timeframe};
use crate::utils::{format_compact, format_percent, format_price};

/// Rendering surface for one dashboard cycle.
///
/// The core never prints or panics on its own; everything a user sees goes
/// through this trait, so a browser front end and the terminal demo share the
/// same presenter.
#[async_trait]
pub trait DashboardView: Send + Sync {
    async fn display_loading(&self, limit: u32, currency: Currency) -> Result<()>;

    async fn display_table(
        &self,
        rows: &[NormalizedRow],
        last_updated: DateTime<Utc>,
    ) -> Result<()>;

    async fn display_summary(
        &self,
        gainers: &[NormalizedRow],
        losers: &[NormalizedRow],
    ) -> Result<()>;

    async fn display_percent_change(
        &self,
        table: &[PercentChangeRow],
        timeframe: Timeframe,
    ) -> Result<()>;

    /// Shown when filtering left nothing to chart.
    async fn display_no_data(&self) -> Result<()>;

    async fn display_error(&self, error_message: String) -> Result<()>;
}

/// Plain-text rendering for the demo binary.
pub struct TerminalDashboardView;

#[async_trait]
impl DashboardView for TerminalDashboardView {
    async fn display_loading(&self, limit: u32, currency: Currency) -> Result<()> {
        println!("Fetching top {} listings in {}...", limit, currency);
        Ok(())
    }

    async fn display_table(
        &self,
        rows: &[NormalizedRow],
        last_updated: DateTime<Utc>,
    ) -> Result<()> {
        println!(
            "\nCryptocurrency Prices (last updated: {})",
            last_updated.format("%Y-%m-%d %H:%M:%S")
        );
        println!(
            "{:<8} {:<20} {:>14} {:>10} {:>10} {:>10} {:>8} {:>8}",
            "Symbol", "Name", "Price", "Mkt Cap", "Vol 24h", "1h", "24h", "7d"
        );
        for row in rows {
            println!(
                "{:<8} {:<20} {:>14} {:>10} {:>10} {:>10} {:>8} {:>8}",
                row.symbol,
                row.name,
                format_price(row.price),
                format_compact(row.market_cap),
                format_compact(row.volume_24h),
                format_percent(row.percent_change_1h),
                format_percent(row.percent_change_24h),
                format_percent(row.percent_change_7d),
            );
        }
        println!("({} rows)", rows.len());
        Ok(())
    }

    async fn display_summary(
        &self,
        gainers: &[NormalizedRow],
        losers: &[NormalizedRow],
    ) -> Result<()> {
        println!("\nTop Gainers (24h)");
        for row in gainers {
            println!("  {}: {}", row.symbol, format_percent(row.percent_change_24h));
        }
        println!("Top Losers (24h)");
        for row in losers {
            println!("  {}: {}", row.symbol, format_percent(row.percent_change_24h));
        }
        Ok(())
    }

    async fn display_percent_change(
        &self,
        table: &[PercentChangeRow],
        timeframe: Timeframe,
    ) -> Result<()> {
        println!("\n% Price Change ({} period)", timeframe);
        for entry in table {
            let marker = if entry.positive { "+" } else { "-" };
            println!("  [{}] {:<8} {}", marker, entry.symbol, format_percent(entry.change));
        }
        Ok(())
    }

    async fn display_no_data(&self) -> Result<()> {
        println!("No data available for the selected filters.");
        Ok(())
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        println!("❌ Error fetching data: {}", error_message);
        Ok(())
    }
}
