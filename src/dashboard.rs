//! Dashboard
//!
//! Wires one backend client and one shared state to every controller, and
//! owns the client-side preferences (language, disclaimer).

use std::sync::Arc;

use crate::api::DashboardApi;
use crate::controllers::{
    AnalysisController, ChartController, PriceGridController, QuestionController,
    SettingsController,
};
use crate::i18n::{Language, Localizer};
use crate::prefs::{PrefsError, PrefsStore};
use crate::state::{AppState, SharedState};

pub struct Dashboard {
    state: SharedState,
    prefs: Option<PrefsStore>,
    prices: PriceGridController,
    analysis: AnalysisController,
    chart: ChartController,
    questions: QuestionController,
    settings: SettingsController,
}

impl Dashboard {
    /// Dashboard without persisted preferences
    pub fn new(api: Arc<dyn DashboardApi>, language: Language) -> Self {
        Self::build(api, AppState::new(language), None)
    }

    /// Dashboard whose language and disclaimer flag come from `prefs`
    ///
    /// `fallback_language` applies when no language has been stored yet.
    pub fn with_prefs(
        api: Arc<dyn DashboardApi>,
        prefs: PrefsStore,
        fallback_language: Language,
    ) -> Result<Self, PrefsError> {
        let stored = prefs.load_or_default()?;

        let mut state = AppState::new(stored.language().unwrap_or(fallback_language));
        state.disclaimer_acknowledged = stored.disclaimer_acknowledged;

        Ok(Self::build(api, state, Some(prefs)))
    }

    fn build(api: Arc<dyn DashboardApi>, state: AppState, prefs: Option<PrefsStore>) -> Self {
        let state = state.shared();
        let chart = ChartController::new(Arc::clone(&api), state.clone());

        Self {
            prices: PriceGridController::new(Arc::clone(&api), state.clone()),
            analysis: AnalysisController::new(Arc::clone(&api), state.clone(), chart.clone()),
            questions: QuestionController::new(Arc::clone(&api), state.clone()),
            settings: SettingsController::new(api, state.clone()),
            chart,
            state,
            prefs,
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn prices(&self) -> &PriceGridController {
        &self.prices
    }

    pub fn analysis(&self) -> &AnalysisController {
        &self.analysis
    }

    pub fn chart(&self) -> &ChartController {
        &self.chart
    }

    pub fn questions(&self) -> &QuestionController {
        &self.questions
    }

    pub fn settings(&self) -> &SettingsController {
        &self.settings
    }

    pub async fn language(&self) -> Language {
        self.state.read().await.language
    }

    pub async fn localizer(&self) -> Localizer {
        self.state.read().await.localizer()
    }

    /// Switch the interface language and remember it
    ///
    /// Requests issued afterwards carry the new language.
    pub async fn set_language(&self, language: Language) -> Result<(), PrefsError> {
        self.state.write().await.language = language;
        tracing::info!(language = %language, "Language changed");

        if let Some(prefs) = &self.prefs {
            prefs.set_language(language)?;
        }
        Ok(())
    }

    /// Whether the investment disclaimer still has to be shown
    pub async fn needs_disclaimer(&self) -> bool {
        !self.state.read().await.disclaimer_acknowledged
    }

    pub async fn acknowledge_disclaimer(&self) -> Result<(), PrefsError> {
        self.state.write().await.disclaimer_acknowledged = true;

        if let Some(prefs) = &self.prefs {
            prefs.acknowledge_disclaimer()?;
        }
        Ok(())
    }
}
