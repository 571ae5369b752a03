//! Question Controller
//!
//! Follow-up questions about the current analysis. The question is shown
//! as pending right away; its answer is filled in by id when it arrives.

use std::sync::Arc;

use crate::api::{AskQuestionRequest, ClientError, ClientResult, DashboardApi};
use crate::i18n::keys;
use crate::state::{QuestionEntry, SharedState};

#[derive(Clone)]
pub struct QuestionController {
    api: Arc<dyn DashboardApi>,
    state: SharedState,
}

impl QuestionController {
    pub fn new(api: Arc<dyn DashboardApi>, state: SharedState) -> Self {
        Self { api, state }
    }

    /// Ask `question` about the current analysis
    ///
    /// Blank questions are ignored (`Ok(None)`). On failure the entry stays
    /// pending and the error banner is set.
    pub async fn ask(&self, question: &str) -> ClientResult<Option<QuestionEntry>> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }

        let (id, request) = {
            let mut state = self.state.write().await;

            let request = match state.current_analysis() {
                Some(current) => AskQuestionRequest {
                    symbol: current.symbol.clone(),
                    question: question.to_string(),
                    analysis_text: current.analysis.clone(),
                    price_data: current.price_data.clone(),
                    language: state.language,
                },
                None => {
                    let err = ClientError::validation(keys::ERROR_NO_ANALYSIS);
                    let message = err.user_message(&state.localizer(), keys::ERROR_NO_ANALYSIS);
                    state.show_error(message);
                    return Err(err);
                }
            };

            (state.thread.push(question), request)
        };

        tracing::debug!(question_id = %id, symbol = %request.symbol, "Asking follow-up question");
        let result = self.api.ask_question(&request).await;

        let mut state = self.state.write().await;
        state.thread.finish(id);

        match result {
            Ok(answer) => {
                if !state.thread.resolve(id, &answer) {
                    tracing::debug!(question_id = %id, "Question thread was cleared, dropping answer");
                    return Err(ClientError::Superseded);
                }
                Ok(state.thread.get(id).cloned())
            }
            Err(e) => {
                tracing::warn!(question_id = %id, error = %e, "Question failed");
                if state.thread.get(id).is_some() {
                    let message = e.user_message(&state.localizer(), keys::ERROR_ANSWERING);
                    state.show_error(message);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{analysis_body, settle, Endpoint, MockApi};
    use crate::i18n::Language;
    use crate::models::AnalysisResult;
    use crate::state::{Answer, AppState};
    use serde_json::json;

    async fn setup_with_analysis(api: &Arc<MockApi>) -> (QuestionController, SharedState) {
        let state = AppState::new(Language::Tr).shared();
        let result: AnalysisResult =
            serde_json::from_value(analysis_body("AAPL", "Kısa vadede yükseliş")).unwrap();
        state.write().await.install_analysis(result);
        (QuestionController::new(api.clone(), state.clone()), state)
    }

    #[tokio::test]
    async fn test_blank_question_is_noop() {
        let api = Arc::new(MockApi::new());
        let (controller, state) = setup_with_analysis(&api).await;

        assert_eq!(controller.ask("   ").await, Ok(None));
        assert_eq!(api.total_calls(), 0);
        assert!(state.read().await.thread.is_empty());
    }

    #[tokio::test]
    async fn test_no_analysis_fails_locally() {
        let api = Arc::new(MockApi::new());
        let state = AppState::new(Language::Tr).shared();
        let controller = QuestionController::new(api.clone(), state.clone());

        let err = controller.ask("Neden?").await.unwrap_err();
        assert_eq!(err, ClientError::validation(keys::ERROR_NO_ANALYSIS));
        assert_eq!(api.total_calls(), 0);
        assert_eq!(
            state.read().await.error.as_deref(),
            Some("Önce bir analiz yapmalısınız.")
        );
    }

    #[tokio::test]
    async fn test_ask_sends_current_analysis_unchanged() {
        let api = Arc::new(MockApi::new());
        api.reply(Endpoint::Ask, json!({"answer": "**Evet**, çünkü..."}));
        let (controller, state) = setup_with_analysis(&api).await;

        let entry = controller.ask("  Alınır mı? ").await.unwrap().unwrap();

        let body = api.last_request(Endpoint::Ask).unwrap();
        assert_eq!(body["symbol"], "AAPL");
        assert_eq!(body["question"], "Alınır mı?");
        assert_eq!(body["analysis_text"], "Kısa vadede yükseliş");
        assert_eq!(body["language"], "tr");
        assert_eq!(body["price_data"], analysis_body("AAPL", "")["price_data"]);

        assert!(matches!(&entry.answer, Answer::Answered { html, .. } if html.contains("<strong>Evet</strong>")));
        let state = state.read().await;
        assert_eq!(state.thread.len(), 1);
        assert!(!state.thread.is_asking());
    }

    #[tokio::test]
    async fn test_failure_leaves_entry_pending() {
        let api = Arc::new(MockApi::new());
        api.fail(
            Endpoint::Ask,
            ClientError::Http {
                status: 500,
                message: None,
            },
        );
        let (controller, state) = setup_with_analysis(&api).await;

        assert!(controller.ask("Hedef fiyat?").await.is_err());

        let state = state.read().await;
        assert!(state.thread.entries()[0].is_pending());
        assert!(!state.thread.is_asking());
        assert_eq!(
            state.error.as_deref(),
            Some("Soru yanıtlanırken bir hata oluştu")
        );
    }

    #[tokio::test]
    async fn test_identical_questions_get_their_own_answers() {
        let api = Arc::new(MockApi::new());
        let release = api.reply_held(Endpoint::Ask, json!({"answer": "birinci"}));
        api.reply(Endpoint::Ask, json!({"answer": "ikinci"}));
        let (controller, state) = setup_with_analysis(&api).await;

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.ask("Neden?").await })
        };
        settle().await;
        assert!(state.read().await.thread.is_asking());

        let second = controller.ask("Neden?").await.unwrap().unwrap();
        release.send(()).unwrap();
        let first = first.await.unwrap().unwrap().unwrap();

        assert_ne!(first.id, second.id);
        let state = state.read().await;
        let answers: Vec<&Answer> = state.thread.entries().iter().map(|e| &e.answer).collect();
        assert!(matches!(answers[0], Answer::Answered { text, .. } if text == "birinci"));
        assert!(matches!(answers[1], Answer::Answered { text, .. } if text == "ikinci"));
    }

    #[tokio::test]
    async fn test_answer_after_new_analysis_is_dropped() {
        let api = Arc::new(MockApi::new());
        let release = api.reply_held(Endpoint::Ask, json!({"answer": "geç"}));
        let (controller, state) = setup_with_analysis(&api).await;

        let pending = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.ask("Neden?").await })
        };
        settle().await;

        let result: AnalysisResult = serde_json::from_value(analysis_body("MSFT", "yeni")).unwrap();
        state.write().await.install_analysis(result);
        release.send(()).unwrap();

        assert_eq!(pending.await.unwrap(), Err(ClientError::Superseded));
        assert!(state.read().await.thread.is_empty());
    }
}
