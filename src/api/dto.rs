//! Data Transfer Objects
//!
//! Request bodies sent to the analyzer backend and the reply envelopes
//! that are not already covered by [`crate::models`].

use serde::{Deserialize, Serialize};

use crate::i18n::Language;
use crate::models::{AnalysisType, PriceData};

// ============================================
// ANALYSIS DTOs
// ============================================

/// `POST /api/analyze`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub symbol: String,
    pub analysis_type: AnalysisType,
    pub language: Language,
}

/// `POST /api/ask-question`
///
/// Symbol, analysis text and price snapshot come from the current analysis
/// slot unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskQuestionRequest {
    pub symbol: String,
    pub question: String,
    pub analysis_text: String,
    pub price_data: PriceData,
    pub language: Language,
}

/// `POST /api/analyze-news`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsRequest {
    pub symbol: String,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerReply {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsReply {
    pub news_analysis: String,
}

// ============================================
// SETTINGS DTOs
// ============================================

/// `POST /api/settings`; only the provided fields are sent
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SaveSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// `POST /api/settings/test-api-key`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TestApiKeyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// `POST /api/settings/test-model`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestModelRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Reply of the settings save endpoint
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply of the connectivity test endpoints
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TestReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================
// ERROR ENVELOPE
// ============================================

/// `{"error": "..."}` body used by every endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
