//! Localization Store
//!
//! Per-language string tables and the lookup used by every controller.
//! The active [`Language`] lives in the application state; a [`Localizer`]
//! is a cheap copy of it that resolves keys against the matching table.

mod strings;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    /// All languages with a translation table
    pub const ALL: [Language; 2] = [Language::Tr, Language::En];

    /// Wire / storage code ("tr", "en")
    pub fn code(&self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }

    /// Parse a language code, `None` for unsupported codes
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "tr" => Some(Language::Tr),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    fn table(&self) -> &'static HashMap<&'static str, &'static str> {
        static TR: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
        static EN: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

        match self {
            Language::Tr => TR.get_or_init(|| strings::TR.iter().copied().collect()),
            Language::En => EN.get_or_init(|| strings::EN.iter().copied().collect()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("unsupported language: {}", s))
    }
}

/// Translation lookup bound to one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Localizer {
    language: Language,
}

impl Localizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Translate `key`, falling back to the key itself when it has no entry
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        match self.language.table().get(key) {
            Some(text) => *text,
            None => key,
        }
    }

    /// Window title for a page ("Stock AI Analyzer - Analiz")
    pub fn page_title(&self, page_key: &str) -> String {
        format!("{} - {}", self.t(keys::APP_NAME), self.t(page_key))
    }
}

/// Translation keys used from code
pub mod keys {
    pub const APP_NAME: &str = "app_name";
    pub const NAV_HOME: &str = "nav_home";
    pub const NAV_ANALYZE: &str = "nav_analyze";
    pub const NAV_SETTINGS: &str = "nav_settings";

    pub const TAB_POPULAR: &str = "tab_popular";
    pub const TAB_CRYPTO: &str = "tab_crypto";
    pub const TAB_BORSA: &str = "tab_borsa";
    pub const LOADING: &str = "loading";
    pub const VOLUME: &str = "volume";
    pub const MARKET_CAP: &str = "market_cap";
    pub const LAST_UPDATED: &str = "last_updated";

    pub const ANALYSIS_LABEL_DAILY: &str = "analysis_label_daily";
    pub const ANALYSIS_LABEL_WEEKLY: &str = "analysis_label_weekly";
    pub const ANALYSIS_LABEL_SHORT_TERM: &str = "analysis_label_short_term";
    pub const ANALYSIS_LABEL_LONG_TERM: &str = "analysis_label_long_term";
    pub const PRICE_LABEL: &str = "price_label";
    pub const CHANGE_LABEL: &str = "change_label";
    pub const CHANGE_PERCENT_LABEL: &str = "change_percent_label";
    pub const ANALYSIS_REPORT: &str = "analysis_report";
    pub const PRICE_CHART: &str = "price_chart";
    pub const QUESTION_TITLE: &str = "question_title";

    pub const TEST_SUCCESS: &str = "test_success";
    pub const TEST_API_KEY_SUCCESS: &str = "test_api_key_success";
    pub const TEST_ERROR: &str = "test_error";
    pub const TEST_API_KEY_ERROR: &str = "test_api_key_error";
    pub const ERROR_API_KEY_FOR_TEST: &str = "error_api_key_for_test";
    pub const ERROR_API_KEY_REQUIRED: &str = "error_api_key_required";
    pub const TEST_UNKNOWN_ERROR: &str = "test_unknown_error";
    pub const CURRENT_SETTINGS: &str = "current_settings";
    pub const API_KEY_STATUS: &str = "api_key_status";
    pub const CURRENT_MODEL: &str = "current_model";
    pub const CURRENT_API_KEY: &str = "current_api_key";
    pub const CONFIGURED: &str = "configured";
    pub const NOT_CONFIGURED: &str = "not_configured";

    pub const TESTING: &str = "testing";
    pub const TESTING_API_KEY: &str = "testing_api_key";
    pub const TESTING_MODEL: &str = "testing_model";

    pub const SAVING: &str = "saving";
    pub const SAVE_SUCCESS: &str = "save_success";
    pub const ERROR_NO_SYMBOL: &str = "error_no_symbol";
    pub const ERROR_NO_DATA: &str = "error_no_data";
    pub const ERROR_LOADING_PRICES: &str = "error_loading_prices";
    pub const ANALYZING: &str = "analyzing";
    pub const ANSWERING: &str = "answering";
    pub const ERROR_ANALYZING: &str = "error_analyzing";
    pub const ERROR_ANSWERING: &str = "error_answering";
    pub const ERROR_NO_ANALYSIS: &str = "error_no_analysis";
    pub const ERROR_LOADING_SETTINGS: &str = "error_loading_settings";
    pub const ERROR_SAVING_SETTINGS: &str = "error_saving_settings";
    pub const ERROR_NO_SETTINGS: &str = "error_no_settings";

    pub const DISCLAIMER_TITLE: &str = "disclaimer_title";
    pub const DISCLAIMER_TEXT: &str = "disclaimer_text";
    pub const DISCLAIMER_CLOSE: &str = "disclaimer_close";
    pub const FOOTER_DISCLAIMER: &str = "footer_disclaimer";

    pub const NEWS_ANALYSIS_TITLE: &str = "news_analysis_title";
    pub const ANALYZING_NEWS: &str = "analyzing_news";
    pub const ERROR_ANALYZING_NEWS: &str = "error_analyzing_news";
    pub const NO_NEWS_FOUND: &str = "no_news_found";
}
