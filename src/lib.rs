//! # Stock AI Analyzer
//!
//! Client for the Stock AI Analyzer backend: a live price dashboard for
//! popular stocks, cryptocurrencies and Borsa Istanbul, AI analysis of a
//! single symbol with its price chart, follow-up questions, news digests and
//! the backend's AI settings.
//!
//! ## Features
//!
//! - **Price dashboard**: three category grids with periodic auto-refresh
//! - **AI analysis**: daily, weekly, short and long-term reports with a chart
//! - **Follow-up Q&A**: questions answered against the current analysis
//! - **Settings**: save, inspect and test the backend's API key and model
//! - **Bilingual**: Turkish and English, switchable at any time
//!
//! ## Modules
//!
//! - [`api`]: Backend REST client behind the [`DashboardApi`] trait
//! - [`state`]: Shared application state and view models
//! - [`controllers`]: One controller per dashboard region
//! - [`render`]: Text, HTML and JSON output of the state
//! - [`i18n`]: Translation tables
//! - [`watch`]: Live price watch loop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stock_ai_analyzer::api::{HttpClient, HttpClientConfig};
//! use stock_ai_analyzer::models::AnalysisType;
//! use stock_ai_analyzer::{Dashboard, Language};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(HttpClient::new(HttpClientConfig::default())?);
//!     let dashboard = Dashboard::new(api, Language::En);
//!
//!     let view = dashboard.analysis().analyze("aapl", AnalysisType::ShortTerm).await?;
//!     println!("{}\n{}", view.title(&dashboard.localizer().await), view.text);
//!
//!     if let Some(entry) = dashboard.questions().ask("What are the main risks?").await? {
//!         println!("asked: {}", entry.question);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controllers;
pub mod dashboard;
pub mod format;
pub mod i18n;
pub mod models;
pub mod prefs;
pub mod render;
pub mod state;
pub mod watch;

// Re-export top-level types for convenience
pub use api::{ClientError, ClientResult, DashboardApi, HttpClient, HttpClientConfig};

pub use config::{ApiConfig, Config, ConfigError, ConfigLookup, DashboardConfig, LoggingConfig, StorageConfig};

pub use controllers::{
    AnalysisController, ChartController, PriceGridController, QuestionController,
    SettingsController,
};

pub use dashboard::Dashboard;

pub use i18n::{Language, Localizer};

pub use models::{AnalysisResult, AnalysisType, Category, ChartPeriod, ChartSeries, PriceQuote};

pub use prefs::{Prefs, PrefsError, PrefsStore};

pub use render::{renderer, OutputFormat, Render};

pub use state::{AppState, SharedState};
