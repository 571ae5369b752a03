//! Output Rendering
//!
//! Turns the dashboard state into something to show. Three renderers share
//! one [`Render`] interface:
//!
//! - [`TextRenderer`]: terminal tables and a sparkline chart
//! - [`HtmlRenderer`]: dashboard markup fragments with an SVG chart
//! - [`JsonRenderer`]: the view models as pretty JSON
//!
//! Renderers only read [`AppState`]; labels come from its active language.

pub mod html;
pub mod json;
pub mod text;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use text::TextRenderer;

use std::fmt;
use std::str::FromStr;

use crate::models::Category;
use crate::state::{AppState, PriceCard};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// One rendering of each dashboard region
pub trait Render: Send + Sync {
    /// Price grid of `category`, with its last update time
    fn price_grid(&self, state: &AppState, category: Category) -> String;

    /// A single quote looked up by symbol
    fn quote(&self, state: &AppState, card: &PriceCard) -> String;

    /// Error banner, loading indicator and the current analysis
    fn analysis(&self, state: &AppState) -> String;

    fn chart(&self, state: &AppState) -> String;

    /// Follow-up questions and their answers
    fn thread(&self, state: &AppState) -> String;

    fn news(&self, state: &AppState) -> String;

    fn settings(&self, state: &AppState) -> String;

    fn disclaimer(&self, state: &AppState) -> String;
}

pub fn renderer(format: OutputFormat) -> Box<dyn Render> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::default()),
        OutputFormat::Html => Box::new(HtmlRenderer::default()),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::i18n::Language;
    use crate::models::{AnalysisResult, ChartPeriod, ChartSeries, PriceQuote};
    use crate::state::{AppState, GridContent, PriceCard};

    pub fn quote(symbol: &str, name: &str, price: f64, change_percent: f64) -> PriceQuote {
        PriceQuote {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change: price * change_percent / 100.0,
            change_percent,
            volume: Some(1_500_000.0),
            market_cap: None,
        }
    }

    /// English state with a populated popular grid, an analysis and a chart
    pub fn populated() -> AppState {
        let mut state = AppState::new(Language::En);

        let cards = vec![
            PriceCard::from_quote(&quote("AAPL", "Apple Inc.", 189.5, 1.2)),
            PriceCard::from_quote(&quote("TSLA", "Tesla <Motors>", 175.0, -2.5)),
        ];
        let grid = state.grid_mut(crate::models::Category::Popular);
        grid.content = GridContent::Cards(cards);
        grid.updated_at = Some(chrono::Utc::now());

        let result: AnalysisResult = serde_json::from_value(serde_json::json!({
            "symbol": "AAPL",
            "analysis_type": "short_term",
            "price_data": {"price": 189.5, "change": 2.25, "change_percent": 1.2},
            "analysis": "1. Teknik Görünüm: **up**"
        }))
        .unwrap();
        state.install_analysis(result);

        let series = ChartSeries::new(
            vec!["2024-05-01".into(), "2024-05-02".into(), "2024-05-03".into()],
            vec![180.0, 185.0, 189.5],
        )
        .unwrap();
        state.chart.replace("AAPL", ChartPeriod::OneMonth, series);

        state
    }
}
