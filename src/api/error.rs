//! Client Error Types
//!
//! One error enum for every way a dashboard operation can fail, from local
//! validation to a superseded response.

use thiserror::Error;

use crate::i18n::Localizer;

/// Errors surfaced by the HTTP client wrapper and the controllers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Input rejected locally, no request was sent; carries a translation key
    #[error("Validation error: {key}")]
    Validation { key: &'static str },

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Http { status: u16, message: Option<String> },

    /// Backend answered 2xx but with an `{"error": ...}` payload
    #[error("API error: {0}")]
    Api(String),

    /// Request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// A newer request of the same kind was issued; this response was dropped
    #[error("Response superseded by a newer request")]
    Superseded,

    /// The same action is already in flight (its control is disabled)
    #[error("Request already in flight")]
    Busy,
}

impl ClientError {
    pub fn validation(key: &'static str) -> Self {
        ClientError::Validation { key }
    }

    /// Message to show the user; server-provided text wins, otherwise the
    /// localized `fallback_key`
    pub fn user_message(&self, l10n: &Localizer, fallback_key: &str) -> String {
        match self {
            ClientError::Validation { key } => l10n.t(key).to_string(),
            ClientError::Http {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ClientError::Api(message) if !message.is_empty() => message.clone(),
            _ => l10n.t(fallback_key).to_string(),
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, ClientError::Superseded)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
