//! Data Model
//!
//! Wire types returned by the analyzer backend and the small closed
//! enumerations (category, analysis type, chart period) the controllers
//! dispatch on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::i18n::keys;

// ============ Enumerations ============

/// Price dashboard category; each one has its own endpoint and grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Popular,
    Crypto,
    BorsaIstanbul,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Popular, Category::Crypto, Category::BorsaIstanbul];

    /// Endpoint path serving this category's price map
    pub fn endpoint(&self) -> &'static str {
        match self {
            Category::Popular => "/api/prices/popular",
            Category::Crypto => "/api/prices/crypto",
            Category::BorsaIstanbul => "/api/prices/borsa-istanbul",
        }
    }

    /// Short identifier used on the command line and in HTML ids
    pub fn id(&self) -> &'static str {
        match self {
            Category::Popular => "popular",
            Category::Crypto => "crypto",
            Category::BorsaIstanbul => "borsa",
        }
    }

    /// Translation key of the tab label
    pub fn label_key(&self) -> &'static str {
        match self {
            Category::Popular => keys::TAB_POPULAR,
            Category::Crypto => keys::TAB_CRYPTO,
            Category::BorsaIstanbul => keys::TAB_BORSA,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Category::Popular => 0,
            Category::Crypto => 1,
            Category::BorsaIstanbul => 2,
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popular" | "1" => Ok(Category::Popular),
            "crypto" | "2" => Ok(Category::Crypto),
            "borsa" | "borsa-istanbul" | "borsa_istanbul" | "bist" | "3" => {
                Ok(Category::BorsaIstanbul)
            }
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// AI analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    Daily,
    Weekly,
    #[default]
    ShortTerm,
    LongTerm,
}

impl AnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Daily => "daily",
            AnalysisType::Weekly => "weekly",
            AnalysisType::ShortTerm => "short_term",
            AnalysisType::LongTerm => "long_term",
        }
    }

    /// Translation key of the result heading ("Günlük Analiz")
    pub fn label_key(&self) -> &'static str {
        match self {
            AnalysisType::Daily => keys::ANALYSIS_LABEL_DAILY,
            AnalysisType::Weekly => keys::ANALYSIS_LABEL_WEEKLY,
            AnalysisType::ShortTerm => keys::ANALYSIS_LABEL_SHORT_TERM,
            AnalysisType::LongTerm => keys::ANALYSIS_LABEL_LONG_TERM,
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "daily" => Ok(AnalysisType::Daily),
            "weekly" => Ok(AnalysisType::Weekly),
            "short_term" => Ok(AnalysisType::ShortTerm),
            "long_term" => Ok(AnalysisType::LongTerm),
            other => Err(format!("unknown analysis type: {}", other)),
        }
    }
}

/// History window requested for the price chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartPeriod {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[default]
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl ChartPeriod {
    pub const ALL: [ChartPeriod; 6] = [
        ChartPeriod::OneDay,
        ChartPeriod::FiveDays,
        ChartPeriod::OneMonth,
        ChartPeriod::ThreeMonths,
        ChartPeriod::SixMonths,
        ChartPeriod::OneYear,
    ];

    /// Value of the `period` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::OneDay => "1d",
            ChartPeriod::FiveDays => "5d",
            ChartPeriod::OneMonth => "1mo",
            ChartPeriod::ThreeMonths => "3mo",
            ChartPeriod::SixMonths => "6mo",
            ChartPeriod::OneYear => "1y",
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ChartPeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown chart period: {}", s))
    }
}

// ============ Wire types ============

/// One instrument's quote as served by the price endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

/// Price snapshot attached to an analysis
///
/// Fields the client does not interpret are kept in `extra` so the snapshot
/// can be sent back with follow-up questions as the server produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PriceData {
    pub fn change_or_zero(&self) -> f64 {
        self.change.unwrap_or(0.0)
    }

    pub fn change_percent_or_zero(&self) -> f64 {
        self.change_percent.unwrap_or(0.0)
    }
}

/// Response of a successful analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symbol: String,
    #[serde(default)]
    pub analysis_type: AnalysisType,
    pub price_data: PriceData,
    pub analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Historical closing prices, `dates` and `prices` of equal length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct ChartSeries {
    dates: Vec<String>,
    prices: Vec<f64>,
}

#[derive(Deserialize)]
struct RawSeries {
    #[serde(default)]
    dates: Vec<String>,
    #[serde(default)]
    prices: Vec<f64>,
}

impl TryFrom<RawSeries> for ChartSeries {
    type Error = String;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        ChartSeries::new(raw.dates, raw.prices)
    }
}

impl ChartSeries {
    pub fn new(dates: Vec<String>, prices: Vec<f64>) -> Result<Self, String> {
        if dates.len() != prices.len() {
            return Err(format!(
                "history has {} dates but {} prices",
                dates.len(),
                prices.len()
            ));
        }
        Ok(Self { dates, prices })
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Last price at or above the first one
    pub fn is_rising(&self) -> bool {
        match (self.prices.first(), self.prices.last()) {
            (Some(first), Some(last)) => last >= first,
            _ => true,
        }
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.prices.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// Current backend configuration as reported by `GET /api/settings`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub api_key_configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_masked: Option<String>,
    #[serde(default)]
    pub model: String,
}
