//! Analysis Controller
//!
//! Submits a symbol for AI analysis, installs the result as the current
//! analysis and points the chart at it. Also drives the news digest of the
//! current symbol.

use std::sync::Arc;

use super::chart::ChartController;
use super::normalize_symbol;
use crate::api::{AnalyzeRequest, ClientError, ClientResult, DashboardApi, NewsRequest};
use crate::format::format_analysis_text;
use crate::i18n::keys;
use crate::models::{AnalysisType, ChartPeriod};
use crate::state::{AnalysisView, NewsView, SharedState};

#[derive(Clone)]
pub struct AnalysisController {
    api: Arc<dyn DashboardApi>,
    state: SharedState,
    chart: ChartController,
}

impl AnalysisController {
    pub fn new(api: Arc<dyn DashboardApi>, state: SharedState, chart: ChartController) -> Self {
        Self { api, state, chart }
    }

    /// Analyze `symbol` (trimmed, upper-cased)
    ///
    /// On success the result replaces the current analysis, the question
    /// thread is cleared and the chart is loaded at the default period.
    pub async fn analyze(&self, symbol: &str, analysis_type: AnalysisType) -> ClientResult<AnalysisView> {
        self.analyze_with_period(symbol, analysis_type, ChartPeriod::default())
            .await
    }

    /// [`analyze`](Self::analyze) with the chart loaded at `period`
    pub async fn analyze_with_period(
        &self,
        symbol: &str,
        analysis_type: AnalysisType,
        period: ChartPeriod,
    ) -> ClientResult<AnalysisView> {
        let (ticket, request) = {
            let mut state = self.state.write().await;

            let Some(symbol) = normalize_symbol(symbol) else {
                let err = ClientError::validation(keys::ERROR_NO_SYMBOL);
                let message = err.user_message(&state.localizer(), keys::ERROR_NO_SYMBOL);
                state.show_error(message);
                return Err(err);
            };

            state.clear_error();
            state.analysis.view = None;
            state.analysis.loading = true;

            let request = AnalyzeRequest {
                symbol,
                analysis_type,
                language: state.language,
            };
            (state.analysis_generation.issue(), request)
        };

        tracing::info!(symbol = %request.symbol, analysis_type = %analysis_type, "Requesting analysis");
        let result = self.api.analyze(&request).await;

        let view = {
            let mut state = self.state.write().await;
            if !state.analysis_generation.is_current(ticket) {
                tracing::debug!(symbol = %request.symbol, "Discarding superseded analysis response");
                return Err(ClientError::Superseded);
            }
            state.analysis.loading = false;

            match result {
                Ok(result) => state.install_analysis(result),
                Err(e) => {
                    tracing::warn!(symbol = %request.symbol, error = %e, "Analysis failed");
                    let message = e.user_message(&state.localizer(), keys::ERROR_ANALYZING);
                    state.show_error(message);
                    return Err(e);
                }
            }
        };

        if let Err(e) = self.chart.load_chart(&view.symbol, period).await {
            if !e.is_superseded() {
                tracing::warn!(symbol = %view.symbol, error = %e, "Chart for new analysis unavailable");
            }
        }

        Ok(view)
    }

    /// AI digest of recent news about the current analysis' symbol
    pub async fn analyze_news(&self) -> ClientResult<NewsView> {
        let (ticket, request) = {
            let mut state = self.state.write().await;

            let Some(symbol) = state.current_analysis().map(|a| a.symbol.clone()) else {
                let err = ClientError::validation(keys::ERROR_NO_ANALYSIS);
                let message = err.user_message(&state.localizer(), keys::ERROR_NO_ANALYSIS);
                state.show_error(message);
                return Err(err);
            };

            state.news.loading = true;
            state.news.view = None;
            let request = NewsRequest {
                symbol,
                language: state.language,
            };
            (state.news_generation.issue(), request)
        };

        let result = self.api.analyze_news(&request).await;

        let mut state = self.state.write().await;
        if !state.news_generation.is_current(ticket) {
            tracing::debug!(symbol = %request.symbol, "Discarding superseded news response");
            return Err(ClientError::Superseded);
        }
        state.news.loading = false;
        let l10n = state.localizer();

        match result {
            Ok(text) => {
                let text = if text.trim().is_empty() {
                    l10n.t(keys::NO_NEWS_FOUND).to_string()
                } else {
                    text
                };
                let view = NewsView {
                    symbol: request.symbol,
                    html: format_analysis_text(&text),
                    text,
                };
                state.news.view = Some(view.clone());
                Ok(view)
            }
            Err(e) => {
                tracing::warn!(symbol = %request.symbol, error = %e, "News analysis failed");
                state.show_error(e.user_message(&l10n, keys::ERROR_ANALYZING_NEWS));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{analysis_body, history_body, settle, Endpoint, MockApi};
    use crate::format::Trend;
    use crate::i18n::Language;
    use crate::state::AppState;
    use serde_json::json;

    fn setup(api: &Arc<MockApi>) -> (AnalysisController, SharedState) {
        let state = AppState::new(Language::En).shared();
        let chart = ChartController::new(api.clone(), state.clone());
        (AnalysisController::new(api.clone(), state.clone(), chart), state)
    }

    #[tokio::test]
    async fn test_empty_symbol_fails_locally() {
        let api = Arc::new(MockApi::new());
        let (controller, state) = setup(&api);

        let err = controller.analyze("   ", AnalysisType::Daily).await.unwrap_err();
        assert_eq!(err, ClientError::validation(keys::ERROR_NO_SYMBOL));
        assert_eq!(api.total_calls(), 0);
        assert_eq!(state.read().await.error.as_deref(), Some("Please enter a stock code."));
    }

    #[tokio::test]
    async fn test_analyze_installs_result_and_loads_chart() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::Analyze, analysis_body("AAPL", "**Güçlü** görünüm"));
        api.reply(Endpoint::History, history_body(&[180.0, 189.5]));
        let (controller, state) = setup(&api);
        state.write().await.thread.push("stale question");

        let view = controller.analyze(" aapl ", AnalysisType::LongTerm).await.unwrap();

        assert_eq!(
            api.last_request(Endpoint::Analyze).unwrap(),
            json!({"symbol": "AAPL", "analysis_type": "long_term", "language": "en"})
        );
        assert_eq!(view.price, "$189.50");
        assert_eq!(view.change, "+2.25");
        assert_eq!(view.change_percent, "+1.20%");
        assert_eq!(view.trend, Trend::Positive);
        assert!(view.html.contains("<strong>Güçlü</strong>"));

        let state = state.read().await;
        assert_eq!(state.current_symbol(), Some("AAPL"));
        assert!(state.thread.is_empty());
        assert!(!state.analysis.loading);
        assert_eq!(
            api.last_request(Endpoint::History).unwrap(),
            json!({"symbol": "AAPL", "period": "1mo"})
        );
        assert_eq!(state.chart.live_instances(), 1);
    }

    #[tokio::test]
    async fn test_chosen_period_loads_chart_once() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::Analyze, analysis_body("AAPL", "ok"));
        api.reply(Endpoint::History, history_body(&[180.0, 189.5]));
        let (controller, state) = setup(&api);

        controller
            .analyze_with_period("aapl", AnalysisType::Weekly, ChartPeriod::ThreeMonths)
            .await
            .unwrap();

        assert_eq!(api.calls(Endpoint::History), 1);
        assert_eq!(
            api.last_request(Endpoint::History).unwrap(),
            json!({"symbol": "AAPL", "period": "3mo"})
        );
        assert_eq!(state.read().await.chart.active_period, ChartPeriod::ThreeMonths);
    }

    #[tokio::test]
    async fn test_http_error_surfaces_server_message() {
        let api = Arc::new(MockApi::new());
        api.fail(
            Endpoint::Analyze,
            ClientError::Http {
                status: 400,
                message: Some("Gemini API key not configured".to_string()),
            },
        );
        api.fail(Endpoint::Analyze, ClientError::Network("timed out".to_string()));
        let (controller, state) = setup(&api);

        assert!(controller.analyze("AAPL", AnalysisType::Daily).await.is_err());
        assert_eq!(
            state.read().await.error.as_deref(),
            Some("Gemini API key not configured")
        );

        assert!(controller.analyze("AAPL", AnalysisType::Daily).await.is_err());
        let state = state.read().await;
        assert_eq!(state.error.as_deref(), Some("An error occurred while analyzing"));
        assert!(!state.analysis.loading);
        assert!(state.analysis.view.is_none());
        assert_eq!(api.calls(Endpoint::History), 0);
    }

    #[tokio::test]
    async fn test_chart_failure_does_not_fail_analysis() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::Analyze, analysis_body("THYAO.IS", "ok"));
        api.fail(Endpoint::History, ClientError::Network("reset".to_string()));
        let (controller, state) = setup(&api);

        assert!(controller.analyze("thyao.is", AnalysisType::Weekly).await.is_ok());
        let state = state.read().await;
        assert!(state.error.is_none());
        assert!(state.chart.instance().is_none());
    }

    #[tokio::test]
    async fn test_superseded_analysis_is_discarded() {
        let api = Arc::new(MockApi::new());
        let release = api.reply_held(Endpoint::Analyze, analysis_body("AAPL", "old"));
        api.reply(Endpoint::Analyze, analysis_body("MSFT", "new"));
        api.reply(Endpoint::History, history_body(&[1.0, 2.0]));
        let (controller, state) = setup(&api);

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.analyze("AAPL", AnalysisType::Daily).await })
        };
        settle().await;

        controller.analyze("MSFT", AnalysisType::Daily).await.unwrap();
        release.send(()).unwrap();
        assert_eq!(slow.await.unwrap(), Err(ClientError::Superseded));

        let state = state.read().await;
        assert_eq!(state.current_symbol(), Some("MSFT"));
        assert_eq!(state.current_analysis().unwrap().analysis, "new");
        assert_eq!(api.calls(Endpoint::History), 1);
    }

    #[tokio::test]
    async fn test_news_requires_current_analysis() {
        let api = Arc::new(MockApi::new());
        let (controller, state) = setup(&api);

        let err = controller.analyze_news().await.unwrap_err();
        assert_eq!(err, ClientError::validation(keys::ERROR_NO_ANALYSIS));
        assert_eq!(api.total_calls(), 0);
        assert_eq!(
            state.read().await.error.as_deref(),
            Some("You must perform an analysis first.")
        );
    }

    #[tokio::test]
    async fn test_news_for_current_symbol() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::Analyze, analysis_body("NVDA", "ok"));
        api.reply(Endpoint::History, history_body(&[1.0]));
        api.reply(Endpoint::News, json!({"symbol": "NVDA", "news_analysis": "1. Özet: olumlu"}));
        api.reply(Endpoint::News, json!({"symbol": "NVDA", "news_analysis": ""}));
        let (controller, state) = setup(&api);

        controller.analyze("nvda", AnalysisType::ShortTerm).await.unwrap();
        let news = controller.analyze_news().await.unwrap();

        assert_eq!(
            api.last_request(Endpoint::News).unwrap(),
            json!({"symbol": "NVDA", "language": "en"})
        );
        assert!(news.html.contains("<h4>1. Özet:</h4>"));
        assert_eq!(state.read().await.news.view.as_ref(), Some(&news));

        let news = controller.analyze_news().await.unwrap();
        assert_eq!(news.text, "No news found for this symbol");
    }
}
