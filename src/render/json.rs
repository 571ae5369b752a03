//! JSON Renderer
//!
//! Serializes the view models for scripting; one JSON document per call.

use serde::Serialize;
use serde_json::json;

use crate::i18n::keys;
use crate::models::Category;
use crate::state::{AppState, PriceCard};

use super::Render;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string())
}

impl Render for JsonRenderer {
    fn price_grid(&self, state: &AppState, category: Category) -> String {
        let grid = state.grid(category);
        pretty(&json!({
            "category": category,
            "active": state.active_category == category,
            "updated_at": grid.updated_at,
            "content": grid.content,
        }))
    }

    fn quote(&self, _state: &AppState, card: &PriceCard) -> String {
        pretty(card)
    }

    fn analysis(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        pretty(&json!({
            "error": state.error,
            "loading": state.analysis.loading,
            "title": state.analysis.view.as_ref().map(|v| v.title(&l10n)),
            "view": state.analysis.view,
        }))
    }

    fn chart(&self, state: &AppState) -> String {
        pretty(&json!({
            "active_period": state.chart.active_period,
            "chart": state.chart.instance(),
        }))
    }

    fn thread(&self, state: &AppState) -> String {
        pretty(&state.thread)
    }

    fn news(&self, state: &AppState) -> String {
        pretty(&state.news)
    }

    fn settings(&self, state: &AppState) -> String {
        pretty(&state.settings)
    }

    fn disclaimer(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        pretty(&json!({
            "title": l10n.t(keys::DISCLAIMER_TITLE),
            "text": l10n.t(keys::DISCLAIMER_TEXT),
            "acknowledged": state.disclaimer_acknowledged,
        }))
    }
}
