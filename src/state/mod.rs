//! Application State
//!
//! One owned [`AppState`] holds everything the dashboard shows, shared by
//! every controller as [`SharedState`]. Controllers take the lock to start an
//! operation and again to apply its result, never across a network call.

pub mod generation;
pub mod thread;
pub mod views;

pub use generation::{Generation, Ticket};
pub use thread::{Answer, QuestionEntry, QuestionId, QuestionThread};
pub use views::{
    AnalysisPane, AnalysisView, ChartInstance, ChartPane, GridContent, GridView, LineColor,
    NewsPane, NewsView, PriceCard, SettingsDisplay, SettingsPane, StatusKind, StatusMessage,
    TestOutcome,
};

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::i18n::{Language, Localizer};
use crate::models::{AnalysisResult, Category};

/// State handle shared by the controllers and the front-end
pub type SharedState = Arc<RwLock<AppState>>;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub language: Language,
    /// Error banner of the analysis page
    pub error: Option<String>,

    pub active_category: Category,
    grids: [GridView; 3],
    pub(crate) grid_generations: [Generation; 3],

    pub analysis: AnalysisPane,
    pub(crate) analysis_generation: Generation,
    current_analysis: Option<AnalysisResult>,
    current_symbol: Option<String>,

    pub chart: ChartPane,
    pub(crate) chart_generation: Generation,

    pub thread: QuestionThread,

    pub news: NewsPane,
    pub(crate) news_generation: Generation,

    pub settings: SettingsPane,
    pub(crate) settings_generation: Generation,

    pub disclaimer_acknowledged: bool,
}

impl AppState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Wrap into the shared handle used by the controllers
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    pub fn localizer(&self) -> Localizer {
        Localizer::new(self.language)
    }

    pub fn grid(&self, category: Category) -> &GridView {
        &self.grids[category.index()]
    }

    pub(crate) fn grid_mut(&mut self, category: Category) -> &mut GridView {
        &mut self.grids[category.index()]
    }

    pub(crate) fn grid_generation(&mut self, category: Category) -> &mut Generation {
        &mut self.grid_generations[category.index()]
    }

    /// Analysis the question thread refers to
    pub fn current_analysis(&self) -> Option<&AnalysisResult> {
        self.current_analysis.as_ref()
    }

    /// Symbol the chart follows
    pub fn current_symbol(&self) -> Option<&str> {
        self.current_symbol.as_deref()
    }

    /// Make `result` the current analysis
    ///
    /// Overwrites the previous one, switches the chart to its symbol and
    /// clears everything that belonged to the previous analysis.
    pub(crate) fn install_analysis(&mut self, result: AnalysisResult) -> AnalysisView {
        let view = AnalysisView::from_result(&result);
        self.analysis.view = Some(view.clone());
        self.current_symbol = Some(result.symbol.clone());
        self.current_analysis = Some(result);
        self.thread.clear();
        self.news = NewsPane::default();
        self.news_generation.invalidate();
        view
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
