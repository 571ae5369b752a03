//! Scripted [`DashboardApi`] for controller tests
//!
//! Replies are queued per endpoint as JSON and decoded through the same path
//! as real responses. A reply can be held behind a gate so a test can keep a
//! request in flight while it issues another one.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

use super::client::{decode_price_map, decode_value};
use super::dto::{
    AnalyzeRequest, AskQuestionRequest, MessageReply, NewsRequest, SaveSettingsRequest,
    TestApiKeyRequest, TestModelRequest, TestReply,
};
use super::error::{ClientError, ClientResult};
use super::DashboardApi;
use crate::models::{AnalysisResult, Category, ChartPeriod, ChartSeries, PriceQuote, SettingsSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Endpoint {
    Prices(Category),
    Price,
    Analyze,
    Ask,
    News,
    History,
    Settings,
    SaveSettings,
    TestApiKey,
    TestModel,
}

struct Reply {
    result: ClientResult<Value>,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
struct Inner {
    replies: HashMap<Endpoint, VecDeque<Reply>>,
    requests: Vec<(Endpoint, Value)>,
}

#[derive(Default)]
pub(crate) struct MockApi {
    inner: Mutex<Inner>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON body for `endpoint`
    pub fn reply(&self, endpoint: Endpoint, body: Value) {
        self.push(endpoint, Ok(body), None);
    }

    /// Queue a failure for `endpoint`
    pub fn fail(&self, endpoint: Endpoint, error: ClientError) {
        self.push(endpoint, Err(error), None);
    }

    /// Queue a body that is only returned once the sender fires (or drops)
    pub fn reply_held(&self, endpoint: Endpoint, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(endpoint, Ok(body), Some(rx));
        tx
    }

    fn push(&self, endpoint: Endpoint, result: ClientResult<Value>, gate: Option<oneshot::Receiver<()>>) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .replies
            .entry(endpoint)
            .or_default()
            .push_back(Reply { result, gate });
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.requests(endpoint).len()
    }

    pub fn total_calls(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    /// Bodies sent to `endpoint`, oldest first
    pub fn requests(&self, endpoint: Endpoint) -> Vec<Value> {
        let inner = self.inner.lock().unwrap();
        inner
            .requests
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn last_request(&self, endpoint: Endpoint) -> Option<Value> {
        self.requests(endpoint).pop()
    }

    async fn call<B: Serialize + ?Sized>(&self, endpoint: Endpoint, body: &B) -> ClientResult<Value> {
        let reply = {
            let mut inner = self.inner.lock().unwrap();
            let recorded = serde_json::to_value(body).unwrap();
            inner.requests.push((endpoint, recorded));
            inner
                .replies
                .get_mut(&endpoint)
                .and_then(VecDeque::pop_front)
        };

        let Some(reply) = reply else {
            return Err(ClientError::Network(format!("no scripted reply for {:?}", endpoint)));
        };
        if let Some(gate) = reply.gate {
            let _ = gate.await;
        }
        reply.result
    }

    async fn call_decoded<B, T>(&self, endpoint: Endpoint, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = self.call(endpoint, body).await?;
        decode_value(value)
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn prices(&self, category: Category) -> ClientResult<Vec<PriceQuote>> {
        let map: serde_json::Map<String, Value> =
            self.call_decoded(Endpoint::Prices(category), &Value::Null).await?;
        Ok(decode_price_map(map))
    }

    async fn price(&self, symbol: &str) -> ClientResult<PriceQuote> {
        self.call_decoded(Endpoint::Price, &json!({ "symbol": symbol }))
            .await
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> ClientResult<AnalysisResult> {
        self.call_decoded(Endpoint::Analyze, request).await
    }

    async fn ask_question(&self, request: &AskQuestionRequest) -> ClientResult<String> {
        let reply: Value = self.call_decoded(Endpoint::Ask, request).await?;
        Ok(reply["answer"].as_str().unwrap_or_default().to_string())
    }

    async fn analyze_news(&self, request: &NewsRequest) -> ClientResult<String> {
        let reply: Value = self.call_decoded(Endpoint::News, request).await?;
        Ok(reply["news_analysis"].as_str().unwrap_or_default().to_string())
    }

    async fn history(&self, symbol: &str, period: ChartPeriod) -> ClientResult<ChartSeries> {
        self.call_decoded(
            Endpoint::History,
            &json!({ "symbol": symbol, "period": period.as_str() }),
        )
        .await
    }

    async fn settings(&self) -> ClientResult<SettingsSnapshot> {
        self.call_decoded(Endpoint::Settings, &Value::Null).await
    }

    async fn save_settings(&self, request: &SaveSettingsRequest) -> ClientResult<MessageReply> {
        self.call_decoded(Endpoint::SaveSettings, request).await
    }

    async fn test_api_key(&self, request: &TestApiKeyRequest) -> ClientResult<TestReply> {
        self.call_decoded(Endpoint::TestApiKey, request).await
    }

    async fn test_model(&self, request: &TestModelRequest) -> ClientResult<TestReply> {
        self.call_decoded(Endpoint::TestModel, request).await
    }
}

// ============ Fixtures ============

pub(crate) fn quote_map(entries: &[(&str, f64, f64)]) -> Value {
    let mut map = serde_json::Map::new();
    for (symbol, price, change_percent) in entries {
        map.insert(
            symbol.to_string(),
            json!({
                "name": format!("{} Inc.", symbol),
                "price": price,
                "change": price * change_percent / 100.0,
                "change_percent": change_percent,
                "volume": 1_500_000.0,
            }),
        );
    }
    Value::Object(map)
}

pub(crate) fn analysis_body(symbol: &str, analysis: &str) -> Value {
    json!({
        "symbol": symbol,
        "analysis_type": "short_term",
        "price_data": {
            "price": 189.5,
            "change": 2.25,
            "change_percent": 1.2,
            "volume": 52_000_000,
            "high": 190.0,
        },
        "analysis": analysis,
        "timestamp": "2024-05-01T10:00:00",
    })
}

pub(crate) fn history_body(prices: &[f64]) -> Value {
    let dates: Vec<String> = (1..=prices.len())
        .map(|day| format!("2024-05-{:02}", day))
        .collect();
    json!({ "dates": dates, "prices": prices })
}

/// Let spawned tasks run until they block
pub(crate) async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
