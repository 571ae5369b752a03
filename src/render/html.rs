//! HTML Renderer
//!
//! Emits dashboard fragments using the web front-end's class names, so the
//! output drops into its stylesheet. Server text is escaped; analysis and
//! answer bodies use their pre-formatted HTML.

use std::fmt::Write;

use chrono::Local;

use crate::format::escape_html;
use crate::i18n::{keys, Localizer};
use crate::models::Category;
use crate::state::{
    Answer, AppState, ChartInstance, GridContent, PriceCard, SettingsDisplay, TestOutcome,
};

use super::Render;

#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    pub chart_width: f64,
    pub chart_height: f64,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            chart_width: 800.0,
            chart_height: 400.0,
        }
    }
}

impl HtmlRenderer {
    fn card(&self, l10n: &Localizer, card: &PriceCard) -> String {
        let trend = card.trend.css_class();
        let arrow = match card.trend {
            crate::format::Trend::Positive => "fa-arrow-up",
            crate::format::Trend::Negative => "fa-arrow-down",
        };

        let mut html = format!(
            concat!(
                r#"<div class="price-card" data-symbol="{symbol}">"#,
                r#"<div class="price-card-header"><div>"#,
                r#"<div class="price-card-title">{name}</div></div>"#,
                r#"<div class="price-card-symbol">{symbol}</div>"#,
                r#"</div>"#,
                r#"<div class="price-card-price">{price}</div>"#,
                r#"<div class="price-card-change {trend}"><i class="fas {arrow}"></i>"#,
                r#"<span>{pct}</span><span>({change})</span></div>"#,
            ),
            symbol = escape_html(&card.symbol),
            name = escape_html(&card.name),
            price = escape_html(&card.price),
            trend = trend,
            arrow = arrow,
            pct = escape_html(&card.change_percent),
            change = escape_html(&card.change),
        );
        if let Some(volume) = &card.volume {
            let _ = write!(
                html,
                r#"<div class="price-card-volume">{} {}</div>"#,
                escape_html(l10n.t(keys::VOLUME)),
                escape_html(volume)
            );
        }
        if let Some(cap) = &card.market_cap {
            let _ = write!(
                html,
                r#"<div class="price-card-volume">{} {}</div>"#,
                escape_html(l10n.t(keys::MARKET_CAP)),
                escape_html(cap)
            );
        }
        html.push_str("</div>");
        html
    }

    /// Polyline points scaled into the plot area
    ///
    /// The y range is padded by 10% (at least 1.0 when flat).
    fn points(&self, prices: &[f64], min: f64, max: f64) -> String {
        let margin_left = 60.0;
        let margin_right = 20.0;
        let margin_top = 20.0;
        let margin_bottom = 40.0;
        let plot_width = self.chart_width - margin_left - margin_right;
        let plot_height = self.chart_height - margin_top - margin_bottom;

        let range = max - min;
        let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
        let (lo, hi) = (min - padding, max + padding);

        let last = prices.len().saturating_sub(1).max(1) as f64;
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| {
                let x = margin_left + plot_width * (i as f64 / last);
                let y = margin_top + plot_height * (1.0 - (price - lo) / (hi - lo));
                format!("{:.1},{:.1}", x, y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn svg(&self, chart: &ChartInstance) -> String {
        let Some((min, max)) = chart.series.min_max() else {
            return String::new();
        };
        let dates = chart.series.dates();

        format!(
            concat!(
                r#"<svg class="price-chart" data-chart-id="{id}" viewBox="0 0 {w} {h}" "#,
                r#"xmlns="http://www.w3.org/2000/svg">"#,
                r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{points}"/>"#,
                r#"<text x="60" y="{label_y}">{first}</text>"#,
                r#"<text x="{right}" y="{label_y}" text-anchor="end">{last}</text>"#,
                r#"</svg>"#,
            ),
            id = chart.id,
            w = self.chart_width,
            h = self.chart_height,
            color = chart.color.hex(),
            points = self.points(chart.series.prices(), min, max),
            label_y = self.chart_height - 15.0,
            right = self.chart_width - 20.0,
            first = escape_html(dates.first().map(String::as_str).unwrap_or_default()),
            last = escape_html(dates.last().map(String::as_str).unwrap_or_default()),
        )
    }
}

fn loading(l10n: &Localizer) -> String {
    format!(
        r#"<div class="loading"><i class="fas fa-spinner fa-spin"></i> {}</div>"#,
        escape_html(l10n.t(keys::LOADING))
    )
}

fn error_message(text: &str) -> String {
    format!(r#"<div class="error-message">{}</div>"#, escape_html(text))
}

fn setting_item(label: &str, value: &str) -> String {
    format!(
        r#"<div class="setting-item"><span class="label">{}:</span><span class="value">{}</span></div>"#,
        escape_html(label),
        escape_html(value)
    )
}

impl Render for HtmlRenderer {
    fn price_grid(&self, state: &AppState, category: Category) -> String {
        let l10n = state.localizer();
        let grid = state.grid(category);
        let active = if state.active_category == category { " active" } else { "" };

        let mut html = format!(
            r#"<div class="price-grid{}" id="{}-grid">"#,
            active,
            category.id()
        );
        match &grid.content {
            GridContent::Loading => html.push_str(&loading(&l10n)),
            GridContent::Message(message) => html.push_str(&error_message(message)),
            GridContent::Cards(cards) => {
                for card in cards {
                    html.push_str(&self.card(&l10n, card));
                }
            }
        }
        html.push_str("</div>");

        if let Some(at) = grid.updated_at {
            let _ = write!(
                html,
                r#"<div class="last-update">{} <span id="last-update-time">{}</span></div>"#,
                escape_html(l10n.t(keys::LAST_UPDATED)),
                at.with_timezone(&Local).format("%H:%M:%S")
            );
        }
        html
    }

    fn quote(&self, state: &AppState, card: &PriceCard) -> String {
        self.card(&state.localizer(), card)
    }

    fn analysis(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        let mut html = String::new();

        if let Some(error) = &state.error {
            let _ = write!(
                html,
                r#"<div id="error-message" class="error-message">{}</div>"#,
                escape_html(error)
            );
        }
        if state.analysis.loading {
            let _ = write!(
                html,
                r#"<div id="loading" class="loading"><i class="fas fa-spinner fa-spin"></i> {}</div>"#,
                escape_html(l10n.t(keys::ANALYZING))
            );
        }
        if let Some(view) = &state.analysis.view {
            let trend = view.trend.css_class();
            let _ = write!(
                html,
                concat!(
                    r#"<div id="analysis-result">"#,
                    r#"<div class="result-header"><h2 id="symbol-name">{title}</h2>"#,
                    r#"<div class="price-info">"#,
                    r#"<span class="label">{price_label}</span> <span id="current-price">{price}</span> "#,
                    r#"<span class="label">{change_label}</span> <span id="price-change" class="{trend}">{change}</span> "#,
                    r#"<span class="label">{pct_label}</span> <span id="price-change-percent" class="{trend}">{pct}</span>"#,
                    r#"</div></div>"#,
                    r#"<div class="analysis-content"><h3>{report}</h3>"#,
                    r#"<div id="analysis-text">{body}</div></div>"#,
                    r#"</div>"#,
                ),
                title = escape_html(&view.title(&l10n)),
                price_label = escape_html(l10n.t(keys::PRICE_LABEL)),
                price = escape_html(&view.price),
                change_label = escape_html(l10n.t(keys::CHANGE_LABEL)),
                trend = trend,
                change = escape_html(&view.change),
                pct_label = escape_html(l10n.t(keys::CHANGE_PERCENT_LABEL)),
                pct = escape_html(&view.change_percent),
                report = escape_html(l10n.t(keys::ANALYSIS_REPORT)),
                body = view.html,
            );
        }
        html
    }

    fn chart(&self, state: &AppState) -> String {
        let Some(chart) = state.chart.instance() else {
            return String::new();
        };
        let l10n = state.localizer();

        let buttons: String = crate::models::ChartPeriod::ALL
            .iter()
            .map(|p| {
                let active = if *p == state.chart.active_period { " active" } else { "" };
                format!(r#"<button class="period-btn{}" data-period="{}">{}</button>"#, active, p, p)
            })
            .collect();

        format!(
            r#"<div class="chart-section"><h3>{} - {}</h3><div class="period-buttons">{}</div><div class="chart-container">{}</div></div>"#,
            escape_html(l10n.t(keys::PRICE_CHART)),
            escape_html(&chart.symbol),
            buttons,
            self.svg(chart)
        )
    }

    fn thread(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        let mut html = String::from(r#"<div id="questions-container">"#);

        for entry in state.thread.entries() {
            let _ = write!(
                html,
                concat!(
                    r#"<div class="question-item" data-question-id="{id}">"#,
                    r#"<div class="question-bubble"><i class="fas fa-user"></i>"#,
                    r#"<div class="question-text">{question}</div></div>"#,
                ),
                id = entry.id,
                question = escape_html(&entry.question),
            );
            match &entry.answer {
                Answer::Pending => {
                    let _ = write!(
                        html,
                        r#"<div class="answer-bubble loading-answer"><i class="fas fa-spinner fa-spin"></i> {}</div>"#,
                        escape_html(l10n.t(keys::ANSWERING))
                    );
                }
                Answer::Answered { html: body, .. } => {
                    let _ = write!(
                        html,
                        r#"<div class="answer-bubble"><i class="fas fa-robot"></i><div class="answer-text">{}</div></div>"#,
                        body
                    );
                }
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
        html
    }

    fn news(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        let mut html = String::new();

        if state.news.loading {
            let _ = write!(
                html,
                r#"<div class="loading"><i class="fas fa-spinner fa-spin"></i> {}</div>"#,
                escape_html(l10n.t(keys::ANALYZING_NEWS))
            );
        }
        if let Some(news) = &state.news.view {
            let _ = write!(
                html,
                r#"<div class="news-analysis"><h3>{} - {}</h3><div class="news-text">{}</div></div>"#,
                escape_html(&news.symbol),
                escape_html(l10n.t(keys::NEWS_ANALYSIS_TITLE)),
                news.html
            );
        }
        html
    }

    fn settings(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        let pane = &state.settings;
        let mut html = format!(
            r#"<div id="current-settings"><h3>{}</h3>"#,
            escape_html(l10n.t(keys::CURRENT_SETTINGS))
        );

        match &pane.display {
            SettingsDisplay::Loading => html.push_str(&loading(&l10n)),
            SettingsDisplay::Failed(message) => html.push_str(&error_message(message)),
            SettingsDisplay::Loaded(snapshot) => {
                let (flag, status) = if snapshot.api_key_configured {
                    ("true", keys::CONFIGURED)
                } else {
                    ("false", keys::NOT_CONFIGURED)
                };
                let _ = write!(
                    html,
                    r#"<div class="setting-item"><span class="label">{}:</span><span class="status {}">{}</span></div>"#,
                    escape_html(l10n.t(keys::API_KEY_STATUS)),
                    flag,
                    escape_html(l10n.t(status))
                );
                if let Some(masked) = &snapshot.api_key_masked {
                    html.push_str(&setting_item(l10n.t(keys::CURRENT_API_KEY), masked));
                }
                html.push_str(&setting_item(l10n.t(keys::CURRENT_MODEL), &snapshot.model));
            }
        }
        html.push_str("</div>");

        if let Some(status) = &pane.status {
            let _ = write!(
                html,
                r#"<div class="status-message {}">{}</div>"#,
                status.kind.css_class(),
                escape_html(&status.text)
            );
        }
        if pane.testing {
            let _ = write!(
                html,
                r#"<div class="test-result info">{}</div>"#,
                escape_html(l10n.t(keys::TESTING))
            );
        } else if let Some(result) = &pane.test_result {
            let (class, text) = match result {
                TestOutcome::Success(text) => ("success", text),
                TestOutcome::Error(text) => ("error", text),
                TestOutcome::Unknown(text) => ("error", text),
            };
            let _ = write!(html, r#"<div class="test-result {}">{}</div>"#, class, escape_html(text));
        }
        html
    }

    fn disclaimer(&self, state: &AppState) -> String {
        let l10n = state.localizer();
        format!(
            concat!(
                r#"<div id="disclaimer-modal" class="modal"><div class="modal-content">"#,
                r#"<h3><i class="fas fa-exclamation-triangle"></i> {}</h3><p>{}</p>"#,
                r#"<button id="close-disclaimer" class="btn">{}</button>"#,
                r#"</div></div>"#,
            ),
            escape_html(l10n.t(keys::DISCLAIMER_TITLE)),
            escape_html(l10n.t(keys::DISCLAIMER_TEXT)),
            escape_html(l10n.t(keys::DISCLAIMER_CLOSE)),
        )
    }
}
