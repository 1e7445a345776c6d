//! CryptoPulse - terminal demo for the dashboard core
//!
//! Fetches the top listings from CoinMarketCap, renders the price table with
//! gainer/loser summaries to the terminal, and leaves the fetch/normalize/
//! cache pipeline to the library. A browser front end would drive the same
//! presenter with its own `DashboardView`.
use std::env;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use cryptopulse::utils::parse_amount_and_symbol;
use cryptopulse::{
    convert_amount, Currency, DashboardPresenter, DashboardPresenterImpl, DashboardQuery,
    ListingsInteractor, MarketConfig, ServiceContainer, TerminalDashboardView,
};
use dotenv::dotenv;
use log::info;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting CryptoPulse dashboard v{}", cryptopulse::VERSION);

    // The API key comes from the environment only; there is no default.
    let market_config =
        MarketConfig::from_env().context("COINMARKETCAP_API_KEY must be set in environment")?;

    let query = query_from_env()?;
    info!(
        "Rendering dashboard: limit={} currency={}",
        query.limit, query.currency
    );

    // Wire the application components
    let container = ServiceContainer::new(market_config);
    let presenter = DashboardPresenterImpl::new(
        container.listings_interactor(),
        Arc::new(TerminalDashboardView),
    );

    presenter.show_dashboard(&query).await?;

    // Converter demo: DASHBOARD_CONVERT="100 BTC" converts an amount through
    // the already-cached table, so this costs no extra upstream call.
    if let Ok(input) = env::var("DASHBOARD_CONVERT") {
        match parse_amount_and_symbol(&input) {
            Some((amount, symbol)) => {
                let rows = container
                    .listings_interactor()
                    .get_rows(query.limit, query.currency)
                    .await?;
                match convert_amount(&rows, amount, symbol) {
                    Ok(conversion) => println!(
                        "\n{} {} = {:.8} {} (1 {} = {} {})",
                        conversion.amount,
                        query.currency,
                        conversion.converted,
                        conversion.symbol,
                        conversion.symbol,
                        conversion.unit_price,
                        query.currency,
                    ),
                    Err(e) => println!("❌ Conversion failed: {}", e),
                }
            }
            None => info!("Ignoring malformed DASHBOARD_CONVERT value: {}", input),
        }
    }

    Ok(())
}

/// Dashboard settings, with the same defaults the original UI starts with.
fn query_from_env() -> anyhow::Result<DashboardQuery> {
    let mut query = DashboardQuery::default();

    if let Ok(limit) = env::var("DASHBOARD_LIMIT") {
        query.limit = limit.parse().context("DASHBOARD_LIMIT must be a number")?;
    }
    if let Ok(currency) = env::var("DASHBOARD_CURRENCY") {
        query.currency = Currency::from_str(&currency)?;
    }
    if let Ok(top_n) = env::var("DASHBOARD_TOP_N") {
        query.top_n = Some(top_n.parse().context("DASHBOARD_TOP_N must be a number")?);
    }

    Ok(query)
}
