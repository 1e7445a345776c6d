use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::entity::{Currency, DashboardError};
use crate::interactor::{
    filter_by_symbols, percent_change_table, sort_rows, take_top, top_gainers, top_losers,
    ListingsInteractor, SortKey, Timeframe,
};
use crate::view::DashboardView;

/// What one render cycle should show.
#[derive(Debug, Clone)]
pub struct DashboardQuery {
    pub limit: u32,
    pub currency: Currency,
    /// Restrict the table to these symbols; `None` keeps every row.
    pub symbols: Option<Vec<String>>,
    /// Display only the first N rows of the (rank-ordered) table.
    pub top_n: Option<usize>,
    /// Optional re-sort of the displayed table, always descending.
    pub sort_key: Option<SortKey>,
    /// Timeframe of the percent-change chart.
    pub timeframe: Timeframe,
    /// How many coins each of the gainer/loser lists shows.
    pub summary_size: usize,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            limit: 100,
            currency: Currency::USD,
            symbols: None,
            top_n: Some(10),
            sort_key: None,
            timeframe: Timeframe::Day,
            summary_size: 3,
        }
    }
}

#[async_trait]
pub trait DashboardPresenter: Send + Sync {
    async fn show_dashboard(&self, query: &DashboardQuery) -> Result<()>;
    async fn refresh_dashboard(&self, query: &DashboardQuery) -> Result<()>;
}

pub struct DashboardPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> DashboardPresenterImpl<I, V>
where
    I: ListingsInteractor,
    V: DashboardView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }

    /// Renders one cycle from already-loaded rows. Every failure ends up as a
    /// view message; a bad cycle never takes the process down.
    async fn render(
        &self,
        query: &DashboardQuery,
        rows: Vec<crate::entity::NormalizedRow>,
    ) -> Result<()> {
        let mut table = match &query.symbols {
            Some(symbols) => filter_by_symbols(&rows, symbols),
            None => rows,
        };
        if let Some(n) = query.top_n {
            table = take_top(&table, n);
        }
        if let Some(key) = query.sort_key {
            table = sort_rows(table, key, true);
        }

        self.view.display_table(&table, Utc::now()).await?;
        self.view
            .display_summary(
                &top_gainers(&table, query.summary_size),
                &top_losers(&table, query.summary_size),
            )
            .await?;

        match percent_change_table(&table, query.timeframe) {
            Ok(changes) => {
                self.view
                    .display_percent_change(&changes, query.timeframe)
                    .await?
            }
            Err(DashboardError::EmptyResult) => self.view.display_no_data().await?,
            Err(e) => self.view.display_error(e.to_string()).await?,
        }

        Ok(())
    }
}

#[async_trait]
impl<I, V> DashboardPresenter for DashboardPresenterImpl<I, V>
where
    I: ListingsInteractor + Send + Sync,
    V: DashboardView + Send + Sync,
{
    async fn show_dashboard(&self, query: &DashboardQuery) -> Result<()> {
        self.view
            .display_loading(query.limit, query.currency)
            .await?;

        match self.interactor.get_rows(query.limit, query.currency).await {
            Ok(rows) => self.render(query, rows).await,
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
                Ok(())
            }
        }
    }

    async fn refresh_dashboard(&self, query: &DashboardQuery) -> Result<()> {
        self.view
            .display_loading(query.limit, query.currency)
            .await?;

        match self.interactor.refresh(query.limit, query.currency).await {
            Ok(rows) => self.render(query, rows).await,
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
                Ok(())
            }
        }
    }
}
