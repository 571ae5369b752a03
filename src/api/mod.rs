//! Analyzer Backend API
//!
//! The controllers talk to the backend only through [`DashboardApi`].
//! [`HttpClient`] is the reqwest implementation used by the binary.
//!
//! # Endpoints
//!
//! ## Prices
//! - `GET /api/prices/popular` | `/crypto` | `/borsa-istanbul` - Symbol → quote map
//! - `GET /api/prices/:symbol` - Single quote
//! - `GET /api/history/:symbol?period=` - Historical closes
//!
//! ## Analysis
//! - `POST /api/analyze` - AI analysis of one symbol
//! - `POST /api/ask-question` - Follow-up question on an analysis
//! - `POST /api/analyze-news` - AI digest of recent news
//!
//! ## Settings
//! - `GET /api/settings` - Current key status and model
//! - `POST /api/settings` - Save key and/or model
//! - `POST /api/settings/test-api-key` - Key connectivity test
//! - `POST /api/settings/test-model` - Model connectivity test
//!
//! # Example
//!
//! ```rust,no_run
//! use stock_ai_analyzer::api::{DashboardApi, HttpClient, HttpClientConfig};
//! use stock_ai_analyzer::models::Category;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(HttpClientConfig::default())?;
//!     for quote in client.prices(Category::Crypto).await? {
//!         println!("{} {}", quote.symbol, quote.price);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dto;
pub mod error;
#[cfg(test)]
pub(crate) mod mock;

pub use client::{HttpClient, HttpClientConfig};
pub use dto::{
    AnalyzeRequest, AskQuestionRequest, MessageReply, NewsRequest, SaveSettingsRequest,
    TestApiKeyRequest, TestModelRequest, TestReply,
};
pub use error::{ClientError, ClientResult};

use async_trait::async_trait;

use crate::models::{AnalysisResult, Category, ChartPeriod, ChartSeries, PriceQuote, SettingsSnapshot};

/// Request/response surface of the analyzer backend
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Quotes of one dashboard category, in server order
    async fn prices(&self, category: Category) -> ClientResult<Vec<PriceQuote>>;

    /// Quote of a single symbol
    async fn price(&self, symbol: &str) -> ClientResult<PriceQuote>;

    async fn analyze(&self, request: &AnalyzeRequest) -> ClientResult<AnalysisResult>;

    /// Returns the raw answer text
    async fn ask_question(&self, request: &AskQuestionRequest) -> ClientResult<String>;

    /// Returns the raw news digest text
    async fn analyze_news(&self, request: &NewsRequest) -> ClientResult<String>;

    async fn history(&self, symbol: &str, period: ChartPeriod) -> ClientResult<ChartSeries>;

    async fn settings(&self) -> ClientResult<SettingsSnapshot>;

    async fn save_settings(&self, request: &SaveSettingsRequest) -> ClientResult<MessageReply>;

    async fn test_api_key(&self, request: &TestApiKeyRequest) -> ClientResult<TestReply>;

    async fn test_model(&self, request: &TestModelRequest) -> ClientResult<TestReply>;
}
