//! Settings Controller
//!
//! Shows and edits the backend's Gemini configuration and runs the key and
//! model connectivity tests.

use std::sync::Arc;

use crate::api::{
    ClientError, ClientResult, DashboardApi, SaveSettingsRequest, TestApiKeyRequest,
    TestModelRequest, TestReply,
};
use crate::i18n::{keys, Localizer};
use crate::models::SettingsSnapshot;
use crate::state::{SettingsDisplay, SharedState, StatusKind, StatusMessage, TestOutcome};

/// Model tested when neither the form nor the backend names one
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone)]
pub struct SettingsController {
    api: Arc<dyn DashboardApi>,
    state: SharedState,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Map a test reply to what the settings pane shows
fn test_outcome(reply: TestReply, l10n: &Localizer, success_key: &str, error_key: &str) -> TestOutcome {
    let message = reply.message.filter(|m| !m.is_empty());
    match reply.success {
        Some(true) => TestOutcome::Success(message.unwrap_or_else(|| l10n.t(success_key).to_string())),
        Some(false) => TestOutcome::Error(message.unwrap_or_else(|| l10n.t(error_key).to_string())),
        None => TestOutcome::Unknown(
            message.unwrap_or_else(|| l10n.t(keys::TEST_UNKNOWN_ERROR).to_string()),
        ),
    }
}

impl SettingsController {
    pub fn new(api: Arc<dyn DashboardApi>, state: SharedState) -> Self {
        Self { api, state }
    }

    /// Fetch the current settings and refresh the "key configured" flag
    pub async fn load_settings(&self) -> ClientResult<SettingsSnapshot> {
        let ticket = {
            let mut state = self.state.write().await;
            state.settings.display = SettingsDisplay::Loading;
            state.settings_generation.issue()
        };

        let result = self.api.settings().await;

        let mut state = self.state.write().await;
        if !state.settings_generation.is_current(ticket) {
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(snapshot) => {
                state.settings.api_key_configured = snapshot.api_key_configured;
                state.settings.display = SettingsDisplay::Loaded(snapshot.clone());
                Ok(snapshot)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load settings");
                let message = e.user_message(&state.localizer(), keys::ERROR_LOADING_SETTINGS);
                state.settings.display = SettingsDisplay::Failed(message);
                Err(e)
            }
        }
    }

    /// Save the provided fields, then reload the settings
    ///
    /// Blank values are treated as not provided; at least one is required.
    /// Returns the status message shown to the user.
    pub async fn save_settings(&self, api_key: Option<&str>, model: Option<&str>) -> ClientResult<String> {
        let request = SaveSettingsRequest {
            api_key: non_empty(api_key),
            model: non_empty(model),
        };

        {
            let mut state = self.state.write().await;
            if state.settings.saving {
                return Err(ClientError::Busy);
            }
            let l10n = state.localizer();
            state.settings.api_key_input = request.api_key.clone().unwrap_or_default();
            state.settings.model_input = request.model.clone().unwrap_or_default();

            if request.api_key.is_none() && request.model.is_none() {
                let err = ClientError::validation(keys::ERROR_NO_SETTINGS);
                let message = err.user_message(&l10n, keys::ERROR_NO_SETTINGS);
                state.settings.status = Some(StatusMessage::new(StatusKind::Error, message));
                return Err(err);
            }

            state.settings.saving = true;
            state.settings.status = Some(StatusMessage::new(StatusKind::Info, l10n.t(keys::SAVING)));
        }

        tracing::info!(
            api_key = request.api_key.is_some(),
            model = request.model.as_deref().unwrap_or("-"),
            "Saving settings"
        );
        let result = self.api.save_settings(&request).await;

        let message = {
            let mut state = self.state.write().await;
            state.settings.saving = false;
            let l10n = state.localizer();

            match result {
                Ok(reply) => {
                    let message = reply
                        .message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| l10n.t(keys::SAVE_SUCCESS).to_string());
                    state.settings.status = Some(StatusMessage::new(StatusKind::Success, message.clone()));
                    state.settings.api_key_input.clear();
                    message
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to save settings");
                    let message = e.user_message(&l10n, keys::ERROR_SAVING_SETTINGS);
                    state.settings.status = Some(StatusMessage::new(StatusKind::Error, message));
                    return Err(e);
                }
            }
        };

        if let Err(e) = self.load_settings().await {
            tracing::warn!(error = %e, "Settings saved but reload failed");
        }

        Ok(message)
    }

    /// Check an API key against the backend
    ///
    /// Without a freshly entered key the backend's configured key is tested,
    /// which requires a previous [`load_settings`](Self::load_settings) to
    /// have reported one.
    pub async fn test_api_key(&self, api_key: Option<&str>) -> ClientResult<TestOutcome> {
        let request = TestApiKeyRequest {
            api_key: non_empty(api_key),
        };
        self.begin_test(request.api_key.is_some(), keys::ERROR_API_KEY_FOR_TEST)
            .await?;

        let result = self.api.test_api_key(&request).await;
        self.finish_test(result, keys::TEST_API_KEY_SUCCESS, keys::TEST_API_KEY_ERROR)
            .await
    }

    /// Check that a model answers
    ///
    /// The model falls back to the configured one, then to [`DEFAULT_MODEL`].
    pub async fn test_model(&self, model: Option<&str>, api_key: Option<&str>) -> ClientResult<TestOutcome> {
        let api_key = non_empty(api_key);
        self.begin_test(api_key.is_some(), keys::ERROR_API_KEY_REQUIRED)
            .await?;

        let model = {
            let state = self.state.read().await;
            non_empty(model)
                .or_else(|| state.settings.snapshot().and_then(|s| non_empty(Some(s.model.as_str()))))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string())
        };

        tracing::info!(model = %model, "Testing model");
        let result = self.api.test_model(&TestModelRequest { model, api_key }).await;
        self.finish_test(result, keys::TEST_SUCCESS, keys::TEST_ERROR).await
    }

    async fn begin_test(&self, key_entered: bool, missing_key: &'static str) -> ClientResult<()> {
        let mut state = self.state.write().await;
        if state.settings.testing {
            return Err(ClientError::Busy);
        }

        if !key_entered && !state.settings.api_key_configured {
            let err = ClientError::validation(missing_key);
            let message = err.user_message(&state.localizer(), missing_key);
            state.settings.test_result = Some(TestOutcome::Error(message));
            return Err(err);
        }

        state.settings.testing = true;
        state.settings.test_result = None;
        Ok(())
    }

    async fn finish_test(
        &self,
        result: ClientResult<TestReply>,
        success_key: &str,
        error_key: &str,
    ) -> ClientResult<TestOutcome> {
        let mut state = self.state.write().await;
        state.settings.testing = false;
        let l10n = state.localizer();

        match result {
            Ok(reply) => {
                let outcome = test_outcome(reply, &l10n, success_key, error_key);
                state.settings.test_result = Some(outcome.clone());
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Connectivity test failed");
                let message = e.user_message(&l10n, error_key);
                state.settings.test_result = Some(TestOutcome::Error(message));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{Endpoint, MockApi};
    use crate::i18n::Language;
    use crate::state::AppState;
    use serde_json::json;

    fn setup(api: &Arc<MockApi>) -> (SettingsController, SharedState) {
        let state = AppState::new(Language::En).shared();
        (SettingsController::new(api.clone(), state.clone()), state)
    }

    fn configured() -> serde_json::Value {
        json!({"api_key_configured": true, "api_key_masked": "AIza...x9Q", "model": "gemini-2.0-pro"})
    }

    #[tokio::test]
    async fn test_load_settings_sets_configured_flag() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::Settings, configured());
        let (controller, state) = setup(&api);

        let snapshot = controller.load_settings().await.unwrap();
        assert_eq!(snapshot.api_key_masked.as_deref(), Some("AIza...x9Q"));

        let state = state.read().await;
        assert!(state.settings.api_key_configured);
        assert_eq!(state.settings.snapshot(), Some(&snapshot));
    }

    #[tokio::test]
    async fn test_load_failure_renders_message() {
        let api = Arc::new(MockApi::new());
        api.fail(Endpoint::Settings, ClientError::Network("refused".to_string()));
        let (controller, state) = setup(&api);

        assert!(controller.load_settings().await.is_err());
        assert_eq!(
            state.read().await.settings.display,
            SettingsDisplay::Failed("An error occurred while loading settings".to_string())
        );
    }

    #[tokio::test]
    async fn test_save_requires_a_field() {
        let api = Arc::new(MockApi::new());
        let (controller, state) = setup(&api);

        let err = controller.save_settings(Some("  "), None).await.unwrap_err();
        assert_eq!(err, ClientError::validation(keys::ERROR_NO_SETTINGS));
        assert_eq!(api.total_calls(), 0);
        assert_eq!(
            state.read().await.settings.status,
            Some(StatusMessage::new(StatusKind::Error, "Please enter at least one setting."))
        );
    }

    #[tokio::test]
    async fn test_save_sends_only_provided_fields_and_reloads() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::SaveSettings, json!({}));
        api.reply(Endpoint::Settings, configured());
        let (controller, state) = setup(&api);

        let message = controller.save_settings(Some("AIzaSecret"), Some(" ")).await.unwrap();

        assert_eq!(message, "Settings saved successfully!");
        assert_eq!(
            api.last_request(Endpoint::SaveSettings).unwrap(),
            json!({"api_key": "AIzaSecret"})
        );
        assert_eq!(api.calls(Endpoint::Settings), 1);

        let state = state.read().await;
        assert!(state.settings.api_key_input.is_empty());
        assert!(!state.settings.saving);
        assert!(state.settings.api_key_configured);
    }

    #[tokio::test]
    async fn test_save_error_payload_shows_server_text() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::SaveSettings, json!({"error": "Invalid model name"}));
        let (controller, state) = setup(&api);

        assert!(controller.save_settings(None, Some("gpt")).await.is_err());

        let state = state.read().await;
        assert_eq!(
            state.settings.status,
            Some(StatusMessage::new(StatusKind::Error, "Invalid model name"))
        );
        assert_eq!(state.settings.model_input, "gpt");
        assert_eq!(api.calls(Endpoint::Settings), 0);
    }

    #[tokio::test]
    async fn test_tests_require_a_key() {
        let api = Arc::new(MockApi::new());
        let (controller, state) = setup(&api);

        let err = controller.test_api_key(None).await.unwrap_err();
        assert_eq!(err, ClientError::validation(keys::ERROR_API_KEY_FOR_TEST));
        let err = controller.test_model(Some("gemini-2.5-pro"), None).await.unwrap_err();
        assert_eq!(err, ClientError::validation(keys::ERROR_API_KEY_REQUIRED));

        assert_eq!(api.total_calls(), 0);
        let state = state.read().await;
        assert_eq!(
            state.settings.test_result,
            Some(TestOutcome::Error("Please enter API key first".to_string()))
        );
        assert!(!state.settings.testing);
    }

    #[tokio::test]
    async fn test_api_key_outcomes() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::TestApiKey, json!({"success": true}));
        api.reply(Endpoint::TestApiKey, json!({"success": false, "message": "API key invalid"}));
        api.reply(Endpoint::TestApiKey, json!({}));
        let (controller, _state) = setup(&api);

        assert_eq!(
            controller.test_api_key(Some("AIzaNew")).await,
            Ok(TestOutcome::Success("API key is valid!".to_string()))
        );
        assert_eq!(
            api.last_request(Endpoint::TestApiKey).unwrap(),
            json!({"api_key": "AIzaNew"})
        );
        assert_eq!(
            controller.test_api_key(Some("AIzaNew")).await,
            Ok(TestOutcome::Error("API key invalid".to_string()))
        );
        assert_eq!(
            controller.test_api_key(Some("AIzaNew")).await,
            Ok(TestOutcome::Unknown("An unknown error occurred".to_string()))
        );
    }

    #[tokio::test]
    async fn test_model_falls_back_to_configured_then_default() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::TestModel, json!({"success": true, "message": "ok"}));
        api.reply(Endpoint::Settings, configured());
        api.reply(Endpoint::TestModel, json!({"success": true}));
        let (controller, state) = setup(&api);

        controller.test_model(None, Some("AIzaNew")).await.unwrap();
        assert_eq!(
            api.last_request(Endpoint::TestModel).unwrap(),
            json!({"model": DEFAULT_MODEL, "api_key": "AIzaNew"})
        );

        controller.load_settings().await.unwrap();
        state.write().await.settings.model_input = "draft".to_string();
        let outcome = controller.test_model(Some(""), None).await.unwrap();
        assert_eq!(
            api.last_request(Endpoint::TestModel).unwrap(),
            json!({"model": "gemini-2.0-pro"})
        );
        assert_eq!(outcome, TestOutcome::Success("Model test successful!".to_string()));
        assert_eq!(state.read().await.settings.model_input, "draft");
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_error_outcome() {
        let api = Arc::new(MockApi::new());
        api.fail(Endpoint::TestModel, ClientError::Network("timeout".to_string()));
        let (controller, state) = setup(&api);

        assert!(controller.test_model(Some("gemini-2.5-pro"), Some("k")).await.is_err());

        let state = state.read().await;
        assert_eq!(
            state.settings.test_result,
            Some(TestOutcome::Error("Error testing model".to_string()))
        );
        assert!(!state.settings.testing);
    }
}
