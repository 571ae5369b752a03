//! Terminal Renderer
//!
//! Plain-text tables for the grids and settings, and a one-line block
//! sparkline for the price chart.

use std::fmt::Write;

use chrono::Local;

use crate::format::Trend;
use crate::i18n::{keys, Localizer};
use crate::models::Category;
use crate::state::{Answer, AppState, GridContent, PriceCard, SettingsDisplay, TestOutcome};

use super::Render;

/// Sparkline levels, lowest first
const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone)]
pub struct TextRenderer {
    /// Maximum sparkline width in characters
    pub chart_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { chart_width: 60 }
    }
}

impl TextRenderer {
    fn card_line(&self, l10n: &Localizer, card: &PriceCard) -> String {
        let mut line = format!(
            "{:<10} {:<24} {:>10}  {} {:>8} ({})",
            card.symbol,
            truncate(&card.name, 24),
            card.price,
            card.trend.arrow(),
            card.change_percent,
            card.change,
        );
        if let Some(volume) = &card.volume {
            let _ = write!(line, "  {} {}", l10n.t(keys::VOLUME), volume);
        }
        if let Some(cap) = &card.market_cap {
            let _ = write!(line, "  {} {}", l10n.t(keys::MARKET_CAP), cap);
        }
        line
    }

    /// Downsample `prices` to the chart width and map each point to a level
    fn sparkline(&self, prices: &[f64], min: f64, max: f64) -> String {
        let width = self.chart_width.max(1);
        let step = (prices.len() as f64 / width as f64).max(1.0);
        let range = max - min;

        let mut out = String::new();
        let mut pos = 0.0;
        while (pos as usize) < prices.len() {
            let price = prices[pos as usize];
            let level = if range > 0.0 {
                (((price - min) / range) * (LEVELS.len() - 1) as f64).round() as usize
            } else {
                LEVELS.len() / 2
            };
            out.push(LEVELS[level.min(LEVELS.len() - 1)]);
            pos += step;
        }
        out
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

fn heading(title: &str) -> String {
    format!("== {} ==\n", title)
}

impl Render for TextRenderer {
    fn price_grid(&self, state: &AppState, category: Category) -> String {
        let l10n = state.localizer();
        let grid = state.grid(category);
        let mut out = heading(l10n.t(category.label_key()));

        match &grid.content {
            GridContent::Loading => out.push_str(l10n.t(keys::LOADING)),
            GridContent::Message(message) => out.push_str(message),
            GridContent::Cards(cards) => {
                let lines: Vec<String> = cards.iter().map(|c| self.card_line(&l10n, c)).collect();
                out.push_str(&lines.join("\n"));
            }
        }
        out.push('\n');

        if let Some(at) = grid.updated_at {
            let _ = writeln!(out, "{} {}", l10n.t(keys::LAST_UPDATED), at.with_timezone(&Local).format("%H:%M:%S"));
        }
        out
    }

    fn quote(&self, state: &AppState, card: &PriceCard) -> String {
        format!("{}\n", self.card_line(&state.localizer(), card))
    }

    fn analysis(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        let mut out = String::new();

        if let Some(error) = &state.error {
            let _ = writeln!(out, "! {}", error);
        }
        if state.analysis.loading {
            let _ = writeln!(out, "{}", l10n.t(keys::ANALYZING));
        }
        if let Some(view) = &state.analysis.view {
            out.push_str(&heading(&view.title(&l10n)));
            let _ = writeln!(out, "{} {}", l10n.t(keys::PRICE_LABEL), view.price);
            let _ = writeln!(out, "{} {} {}", l10n.t(keys::CHANGE_LABEL), view.trend.arrow(), view.change);
            let _ = writeln!(out, "{} {}", l10n.t(keys::CHANGE_PERCENT_LABEL), view.change_percent);
            out.push('\n');
            out.push_str(&heading(l10n.t(keys::ANALYSIS_REPORT)));
            let _ = writeln!(out, "{}", view.text.trim_end());
        }
        out
    }

    fn chart(&self, state: &AppState) -> String {
        let Some(chart) = state.chart.instance() else {
            return String::new();
        };
        let Some((min, max)) = chart.series.min_max() else {
            return String::new();
        };

        let l10n = state.localizer();
        let dates = chart.series.dates();
        let prices = chart.series.prices();
        let trend = if chart.series.is_rising() { Trend::Positive } else { Trend::Negative };

        let mut out = heading(&format!("{} {} ({})", l10n.t(keys::PRICE_CHART), chart.symbol, chart.period));
        let _ = writeln!(out, "{} {}", self.sparkline(prices, min, max), trend.arrow());
        let _ = writeln!(out, "min {:.2}  max {:.2}", min, max);
        if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
            let _ = writeln!(out, "{} .. {}", first, last);
        }
        out
    }

    fn thread(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        let mut out = String::new();

        for entry in state.thread.entries() {
            let _ = writeln!(out, "Q: {}", entry.question);
            match &entry.answer {
                Answer::Pending => {
                    let _ = writeln!(out, "A: {}", l10n.t(keys::ANSWERING));
                }
                Answer::Answered { text, .. } => {
                    let _ = writeln!(out, "A: {}", text.trim_end());
                }
            }
            out.push('\n');
        }
        out
    }

    fn news(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        let mut out = String::new();

        if state.news.loading {
            let _ = writeln!(out, "{}", l10n.t(keys::ANALYZING_NEWS));
        }
        if let Some(news) = &state.news.view {
            out.push_str(&heading(&format!("{} - {}", news.symbol, l10n.t(keys::NEWS_ANALYSIS_TITLE))));
            let _ = writeln!(out, "{}", news.text.trim_end());
        }
        out
    }

    fn settings(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        let pane = &state.settings;
        let mut out = heading(l10n.t(keys::CURRENT_SETTINGS));

        match &pane.display {
            SettingsDisplay::Loading => {
                let _ = writeln!(out, "{}", l10n.t(keys::LOADING));
            }
            SettingsDisplay::Failed(message) => {
                let _ = writeln!(out, "! {}", message);
            }
            SettingsDisplay::Loaded(snapshot) => {
                let status = if snapshot.api_key_configured {
                    keys::CONFIGURED
                } else {
                    keys::NOT_CONFIGURED
                };
                let _ = writeln!(out, "{:<18} {}", format!("{}:", l10n.t(keys::API_KEY_STATUS)), l10n.t(status));
                if let Some(masked) = &snapshot.api_key_masked {
                    let _ = writeln!(out, "{:<18} {}", format!("{}:", l10n.t(keys::CURRENT_API_KEY)), masked);
                }
                let _ = writeln!(out, "{:<18} {}", format!("{}:", l10n.t(keys::CURRENT_MODEL)), snapshot.model);
            }
        }

        if pane.testing {
            let _ = writeln!(out, "{}", l10n.t(keys::TESTING));
        }
        if let Some(status) = &pane.status {
            let _ = writeln!(out, "[{}] {}", status.kind.css_class(), status.text);
        }
        if let Some(result) = &pane.test_result {
            let (tag, text) = match result {
                TestOutcome::Success(text) => ("ok", text),
                TestOutcome::Error(text) => ("error", text),
                TestOutcome::Unknown(text) => ("?", text),
            };
            let _ = writeln!(out, "[{}] {}", tag, text);
        }
        out
    }

    fn disclaimer(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        format!(
            "{}{}\n",
            heading(l10n.t(keys::DISCLAIMER_TITLE)),
            l10n.t(keys::DISCLAIMER_TEXT)
        )
    }
}
