//! Analyzer REST API Client
//!
//! reqwest-based implementation of [`DashboardApi`] for the analyzer
//! backend. Every reply goes through the same decoding path: non-2xx
//! statuses become [`ClientError::Http`] carrying the body's `error` text,
//! and 2xx bodies with an `error` field become [`ClientError::Api`].

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::dto::{
    AnalyzeRequest, AnswerReply, AskQuestionRequest, ErrorBody, MessageReply, NewsReply,
    NewsRequest, SaveSettingsRequest, TestApiKeyRequest, TestModelRequest, TestReply,
};
use super::error::{ClientError, ClientResult};
use super::DashboardApi;
use crate::models::{AnalysisResult, Category, ChartPeriod, ChartSeries, PriceQuote, SettingsSnapshot};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the analyzer backend (e.g., "http://localhost:5000")
    pub base_url: String,
    /// Request timeout in seconds, 0 disables the timeout
    pub request_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// HTTP client for the analyzer backend
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new client with the given configuration
    pub fn new(config: HttpClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("stock-ai-analyzer/", env!("CARGO_PKG_VERSION")));
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(method = "GET", url = %url, "Sending request");

        let response = self.client.get(&url).send().await?;
        read_reply(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(method = "POST", url = %url, "Sending request");

        let response = self.client.post(&url).json(body).send().await?;
        read_reply(response).await
    }
}

async fn read_reply<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;
    decode_response(status, &text)
}

/// Decode a reply from its status and body text
pub(crate) fn decode_response<T: DeserializeOwned>(status: StatusCode, text: &str) -> ClientResult<T> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(text)
            .ok()
            .map(|body| body.error);
        tracing::warn!(status = status.as_u16(), message = ?message, "Backend returned an error status");
        return Err(ClientError::Http {
            status: status.as_u16(),
            message,
        });
    }

    decode_reply(text)
}

/// Decode a 2xx body, turning an `{"error": ...}` payload into a soft error
pub(crate) fn decode_reply<T: DeserializeOwned>(text: &str) -> ClientResult<T> {
    let value: Value = serde_json::from_str(text)?;
    decode_value(value)
}

pub(crate) fn decode_value<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    if let Some(error) = value.get("error").and_then(Value::as_str) {
        return Err(ClientError::Api(error.to_string()));
    }

    Ok(serde_json::from_value(value)?)
}

/// Turn a symbol → quote mapping into quotes, keeping server order
///
/// The mapping key is the displayed symbol. Entries that do not decode are
/// skipped.
pub(crate) fn decode_price_map(map: serde_json::Map<String, Value>) -> Vec<PriceQuote> {
    map.into_iter()
        .filter_map(|(symbol, info)| match serde_json::from_value::<PriceQuote>(info) {
            Ok(mut quote) => {
                quote.symbol = symbol;
                Some(quote)
            }
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Skipping malformed quote");
                None
            }
        })
        .collect()
}

#[async_trait]
impl DashboardApi for HttpClient {
    async fn prices(&self, category: Category) -> ClientResult<Vec<PriceQuote>> {
        let map: serde_json::Map<String, Value> = self.get_json(category.endpoint()).await?;
        Ok(decode_price_map(map))
    }

    async fn price(&self, symbol: &str) -> ClientResult<PriceQuote> {
        let path = format!("/api/prices/{}", urlencoding::encode(symbol));
        self.get_json(&path).await
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> ClientResult<AnalysisResult> {
        self.post_json("/api/analyze", request).await
    }

    async fn ask_question(&self, request: &AskQuestionRequest) -> ClientResult<String> {
        let reply: AnswerReply = self.post_json("/api/ask-question", request).await?;
        Ok(reply.answer)
    }

    async fn analyze_news(&self, request: &NewsRequest) -> ClientResult<String> {
        let reply: NewsReply = self.post_json("/api/analyze-news", request).await?;
        Ok(reply.news_analysis)
    }

    async fn history(&self, symbol: &str, period: ChartPeriod) -> ClientResult<ChartSeries> {
        let path = format!(
            "/api/history/{}?period={}",
            urlencoding::encode(symbol),
            period.as_str()
        );
        self.get_json(&path).await
    }

    async fn settings(&self) -> ClientResult<SettingsSnapshot> {
        self.get_json("/api/settings").await
    }

    async fn save_settings(&self, request: &SaveSettingsRequest) -> ClientResult<MessageReply> {
        self.post_json("/api/settings", request).await
    }

    async fn test_api_key(&self, request: &TestApiKeyRequest) -> ClientResult<TestReply> {
        self.post_json("/api/settings/test-api-key", request).await
    }

    async fn test_model(&self, request: &TestModelRequest) -> ClientResult<TestReply> {
        self.post_json("/api/settings/test-model", request).await
    }
}
