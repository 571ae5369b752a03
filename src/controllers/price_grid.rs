//! Price Grid Controller
//!
//! Loads a category's quotes into its grid and keeps the active category
//! fresh with a periodic refresh.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::normalize_symbol;
use crate::api::{ClientError, ClientResult, DashboardApi};
use crate::i18n::keys;
use crate::models::Category;
use crate::state::{GridContent, PriceCard, SharedState};

/// Default auto-refresh period of the active category
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct PriceGridController {
    api: Arc<dyn DashboardApi>,
    state: SharedState,
}

impl PriceGridController {
    pub fn new(api: Arc<dyn DashboardApi>, state: SharedState) -> Self {
        Self { api, state }
    }

    /// Fetch `category` into its own grid, returning the number of cards
    ///
    /// An empty result is not an error; the grid shows the "no data"
    /// placeholder instead.
    pub async fn load_category(&self, category: Category) -> ClientResult<usize> {
        let ticket = {
            let mut state = self.state.write().await;
            state.grid_mut(category).content = GridContent::Loading;
            state.grid_generation(category).issue()
        };

        let result = self.api.prices(category).await;

        let mut state = self.state.write().await;
        if !state.grid_generation(category).is_current(ticket) {
            tracing::debug!(category = category.id(), "Discarding superseded price response");
            return Err(ClientError::Superseded);
        }

        let l10n = state.localizer();
        let grid = state.grid_mut(category);
        grid.updated_at = Some(Utc::now());

        match result {
            Ok(quotes) if quotes.is_empty() => {
                grid.content = GridContent::Message(l10n.t(keys::ERROR_NO_DATA).to_string());
                Ok(0)
            }
            Ok(quotes) => {
                let cards: Vec<PriceCard> = quotes.iter().map(PriceCard::from_quote).collect();
                let count = cards.len();
                grid.content = GridContent::Cards(cards);
                tracing::debug!(category = category.id(), count, "Price grid updated");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(category = category.id(), error = %e, "Failed to load prices");
                grid.content = GridContent::Message(e.user_message(&l10n, keys::ERROR_LOADING_PRICES));
                Err(e)
            }
        }
    }

    /// Make `category` the active tab and load it
    pub async fn select_category(&self, category: Category) -> ClientResult<usize> {
        self.state.write().await.active_category = category;
        self.load_category(category).await
    }

    /// Reload whichever category is active right now
    pub async fn refresh_active(&self) -> ClientResult<usize> {
        let category = self.state.read().await.active_category;
        self.load_category(category).await
    }

    /// Spawn the periodic refresh of the active category
    ///
    /// The first tick is skipped; the caller loads the initial grid itself.
    /// The task runs until the returned handle is aborted.
    pub fn start_auto_refresh(&self, interval: Duration) -> JoinHandle<()> {
        tracing::info!(interval_secs = interval.as_secs(), "Starting price auto-refresh");

        let controller = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;

                match controller.refresh_active().await {
                    Ok(count) => tracing::debug!(count, "Scheduled price refresh completed"),
                    Err(ClientError::Superseded) => {}
                    Err(e) => tracing::warn!(error = %e, "Scheduled price refresh failed"),
                }
            }
        })
    }

    /// Quote card of a single symbol
    pub async fn lookup(&self, symbol: &str) -> ClientResult<PriceCard> {
        let symbol = normalize_symbol(symbol).ok_or(ClientError::validation(keys::ERROR_NO_SYMBOL))?;

        let mut quote = self.api.price(&symbol).await.map_err(|e| {
            tracing::warn!(symbol = %symbol, error = %e, "Quote lookup failed");
            e
        })?;
        if quote.symbol.is_empty() {
            quote.symbol = symbol;
        }

        Ok(PriceCard::from_quote(&quote))
    }
}
