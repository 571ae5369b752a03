//! View Models
//!
//! What each dashboard region currently shows. Controllers write these;
//! renderers only read them. Numbers are pre-formatted, labels are resolved
//! at render time so a language switch applies to content already on screen.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::{format_analysis_text, format_number, format_price, signed, signed_percent, Trend};
use crate::i18n::Localizer;
use crate::models::{AnalysisResult, AnalysisType, ChartPeriod, ChartSeries, PriceQuote, SettingsSnapshot};

// ============ Price grid ============

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCard {
    pub symbol: String,
    pub name: String,
    /// "$64.25K"
    pub price: String,
    /// "+1.25%"
    pub change_percent: String,
    /// "+802.50"
    pub change: String,
    pub trend: Trend,
    /// Omitted when missing or zero
    pub volume: Option<String>,
    /// Omitted when missing or zero
    pub market_cap: Option<String>,
}

impl PriceCard {
    pub fn from_quote(quote: &PriceQuote) -> Self {
        let trend = Trend::from_change_percent(quote.change_percent);
        let compact = |value: Option<f64>| value.filter(|v| *v != 0.0).map(format_number);

        Self {
            symbol: quote.symbol.clone(),
            name: quote.name.clone(),
            price: format_price(quote.price),
            change_percent: signed_percent(quote.change_percent, trend),
            change: signed(quote.change, trend),
            trend,
            volume: compact(quote.volume),
            market_cap: compact(quote.market_cap),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum GridContent {
    Loading,
    Cards(Vec<PriceCard>),
    /// Localized placeholder (no data, load failure)
    Message(String),
}

/// One category's grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridView {
    pub content: GridContent,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for GridView {
    fn default() -> Self {
        Self {
            content: GridContent::Loading,
            updated_at: None,
        }
    }
}

impl GridView {
    pub fn cards(&self) -> &[PriceCard] {
        match &self.content {
            GridContent::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.content, GridContent::Loading)
    }
}

// ============ Analysis ============

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub symbol: String,
    pub analysis_type: AnalysisType,
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub trend: Trend,
    pub text: String,
    pub html: String,
}

impl AnalysisView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let change = result.price_data.change_or_zero();
        let change_percent = result.price_data.change_percent_or_zero();
        let trend = Trend::from_change_percent(change_percent);

        Self {
            symbol: result.symbol.clone(),
            analysis_type: result.analysis_type,
            price: format_price(result.price_data.price),
            change: signed(change, trend),
            change_percent: signed_percent(change_percent, trend),
            trend,
            text: result.analysis.clone(),
            html: format_analysis_text(&result.analysis),
        }
    }

    /// "AAPL - Kısa Vade Analizi"
    pub fn title(&self, l10n: &Localizer) -> String {
        format!("{} - {}", self.symbol, l10n.t(self.analysis_type.label_key()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisPane {
    pub loading: bool,
    /// Hidden (`None`) while a new analysis is loading or after it failed
    pub view: Option<AnalysisView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsView {
    pub symbol: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewsPane {
    pub loading: bool,
    pub view: Option<NewsView>,
}

// ============ Chart ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineColor {
    Green,
    Red,
}

impl LineColor {
    pub fn for_series(series: &ChartSeries) -> Self {
        if series.is_rising() {
            LineColor::Green
        } else {
            LineColor::Red
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            LineColor::Green => "#10b981",
            LineColor::Red => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartInstance {
    pub id: u64,
    pub symbol: String,
    pub period: ChartPeriod,
    pub series: ChartSeries,
    pub color: LineColor,
}

/// Chart region; holds at most one live chart
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartPane {
    pub active_period: ChartPeriod,
    instance: Option<ChartInstance>,
    created: u64,
    destroyed: u64,
}

impl ChartPane {
    pub fn instance(&self) -> Option<&ChartInstance> {
        self.instance.as_ref()
    }

    /// Destroy the current chart, if any, then build one from `series`
    pub fn replace(&mut self, symbol: &str, period: ChartPeriod, series: ChartSeries) -> &ChartInstance {
        self.destroy();

        self.created += 1;
        let color = LineColor::for_series(&series);
        tracing::debug!(id = self.created, symbol = %symbol, period = %period, points = series.len(), "Creating chart");

        self.instance.insert(ChartInstance {
            id: self.created,
            symbol: symbol.to_string(),
            period,
            series,
            color,
        })
    }

    pub fn destroy(&mut self) {
        if let Some(old) = self.instance.take() {
            self.destroyed += 1;
            tracing::debug!(id = old.id, "Destroyed chart");
        }
    }

    pub fn live_instances(&self) -> u64 {
        self.created - self.destroyed
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }
}

// ============ Settings ============

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum SettingsDisplay {
    Loading,
    Loaded(SettingsSnapshot),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

impl StatusKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
            StatusKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Result of a key/model connectivity test
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "lowercase")]
pub enum TestOutcome {
    Success(String),
    Error(String),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsPane {
    pub display: SettingsDisplay,
    /// Last submitted API key; cleared after a successful save
    pub api_key_input: String,
    pub model_input: String,
    pub status: Option<StatusMessage>,
    pub test_result: Option<TestOutcome>,
    pub saving: bool,
    pub testing: bool,
    /// From the last successful settings load
    pub api_key_configured: bool,
}

impl Default for SettingsPane {
    fn default() -> Self {
        Self {
            display: SettingsDisplay::Loading,
            api_key_input: String::new(),
            model_input: String::new(),
            status: None,
            test_result: None,
            saving: false,
            testing: false,
            api_key_configured: false,
        }
    }
}

impl SettingsPane {
    pub fn snapshot(&self) -> Option<&SettingsSnapshot> {
        match &self.display {
            SettingsDisplay::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn quote(change_percent: f64, volume: Option<f64>, market_cap: Option<f64>) -> PriceQuote {
        PriceQuote {
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            price: 64_250.0,
            change: -812.4,
            change_percent,
            volume,
            market_cap,
        }
    }

    #[test]
    fn test_price_card_formatting() {
        let card = PriceCard::from_quote(&quote(-1.25, Some(32e9), Some(0.0)));
        assert_eq!(card.price, "$64.25K");
        assert_eq!(card.change_percent, "-1.25%");
        assert_eq!(card.change, "-812.40");
        assert_eq!(card.trend, Trend::Negative);
        assert_eq!(card.volume.as_deref(), Some("32.00B"));
        assert_eq!(card.market_cap, None);
    }

    #[test]
    fn test_price_card_zero_change_is_positive() {
        let mut q = quote(0.0, None, None);
        q.change = 0.0;
        let card = PriceCard::from_quote(&q);
        assert_eq!(card.trend, Trend::Positive);
        assert_eq!(card.change_percent, "+0.00%");
        assert_eq!(card.volume, None);
    }

    #[test]
    fn test_chart_pane_keeps_one_live_instance() {
        let mut pane = ChartPane::default();
        let rising = ChartSeries::new(vec!["a".into(), "b".into()], vec![1.0, 2.0]).unwrap();
        let falling = ChartSeries::new(vec!["a".into(), "b".into()], vec![2.0, 1.0]).unwrap();

        assert_eq!(pane.replace("AAPL", ChartPeriod::OneMonth, rising).color, LineColor::Green);
        assert_eq!(pane.replace("AAPL", ChartPeriod::OneYear, falling).color, LineColor::Red);

        assert_eq!(pane.live_instances(), 1);
        assert_eq!(pane.created(), 2);
        assert_eq!(pane.destroyed(), 1);
        assert_eq!(pane.instance().unwrap().id, 2);

        pane.destroy();
        assert_eq!(pane.live_instances(), 0);
    }

    #[test]
    fn test_analysis_title_follows_language() {
        let result: AnalysisResult = serde_json::from_value(serde_json::json!({
            "symbol": "AAPL",
            "analysis_type": "daily",
            "price_data": {"price": 189.5, "change_percent": -0.4},
            "analysis": "ok"
        }))
        .unwrap();
        let view = AnalysisView::from_result(&result);

        assert_eq!(view.title(&Localizer::new(Language::En)), "AAPL - Daily Analysis");
        assert_eq!(view.title(&Localizer::new(Language::Tr)), "AAPL - Günlük Analiz");
        assert_eq!(view.change, "0.00");
        assert_eq!(view.trend, Trend::Negative);
    }
}
