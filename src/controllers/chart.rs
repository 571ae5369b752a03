//! Chart Controller
//!
//! Price history chart of the current symbol. Failures are logged and leave
//! the previous chart in place; they never reach the error banner.

use std::sync::Arc;

use crate::api::{ClientError, ClientResult, DashboardApi};
use crate::models::ChartPeriod;
use crate::state::{ChartInstance, SharedState};

#[derive(Clone)]
pub struct ChartController {
    api: Arc<dyn DashboardApi>,
    state: SharedState,
}

impl ChartController {
    pub fn new(api: Arc<dyn DashboardApi>, state: SharedState) -> Self {
        Self { api, state }
    }

    /// Fetch history for `symbol` and replace the chart with it
    pub async fn load_chart(&self, symbol: &str, period: ChartPeriod) -> ClientResult<ChartInstance> {
        let ticket = {
            let mut state = self.state.write().await;
            state.chart.active_period = period;
            state.chart_generation.issue()
        };

        let result = self.api.history(symbol, period).await;

        let mut state = self.state.write().await;
        if !state.chart_generation.is_current(ticket) {
            tracing::debug!(symbol = %symbol, period = %period, "Discarding superseded history response");
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(series) if series.is_empty() => {
                tracing::warn!(symbol = %symbol, period = %period, "History response has no data points");
                Err(ClientError::Api(format!("no price history for {}", symbol)))
            }
            Ok(series) => Ok(state.chart.replace(symbol, period, series).clone()),
            Err(e) => {
                tracing::warn!(symbol = %symbol, period = %period, error = %e, "Failed to load chart");
                Err(e)
            }
        }
    }

    /// Activate `period` and reload the chart of the current symbol
    ///
    /// Returns `Ok(None)` without a request when no symbol is active.
    pub async fn select_period(&self, period: ChartPeriod) -> ClientResult<Option<ChartInstance>> {
        let symbol = {
            let mut state = self.state.write().await;
            state.chart.active_period = period;
            state.current_symbol().map(str::to_string)
        };

        match symbol {
            Some(symbol) => self.load_chart(&symbol, period).await.map(Some),
            None => {
                tracing::debug!(period = %period, "No active symbol, chart not reloaded");
                Ok(None)
            }
        }
    }
}
