use crate::entity::{Currency, DashboardError, NormalizedRow};
use crate::market::models::Listing;

/// Flattens listings into display rows for one conversion currency.
///
/// Pure and order-preserving: output order equals input order (market-cap
/// rank). A listing whose quote map lacks `currency` fails the whole batch
/// rather than being skipped, so the caller never sees a silently
/// incomplete table.
pub fn normalize(
    listings: &[Listing],
    currency: Currency,
) -> Result<Vec<NormalizedRow>, DashboardError> {
    listings
        .iter()
        .map(|listing| {
            let quote = listing.quote.get(currency.code()).ok_or_else(|| {
                DashboardError::MissingCurrency {
                    symbol: listing.symbol.clone(),
                    currency,
                }
            })?;

            Ok(NormalizedRow {
                symbol: listing.symbol.clone(),
                name: listing.name.clone(),
                slug: listing.slug.clone(),
                price: quote.price,
                market_cap: quote.market_cap,
                volume_24h: quote.volume_24h,
                percent_change_1h: quote.percent_change_1h,
                percent_change_24h: quote.percent_change_24h,
                percent_change_7d: quote.percent_change_7d,
            })
        })
        .collect()
}
