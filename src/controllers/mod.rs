//! Dashboard Controllers
//!
//! One controller per dashboard region. Each holds the shared
//! [`DashboardApi`](crate::api::DashboardApi) and [`SharedState`](crate::state::SharedState);
//! operations update the state and also return what they rendered.
//!
//! Every controller discards responses that a newer request of the same
//! kind has superseded and reports them as
//! [`ClientError::Superseded`](crate::api::ClientError::Superseded).

pub mod analysis;
pub mod chart;
pub mod price_grid;
pub mod question;
pub mod settings;

pub use analysis::AnalysisController;
pub use chart::ChartController;
pub use price_grid::{PriceGridController, DEFAULT_REFRESH_INTERVAL};
pub use question::QuestionController;
pub use settings::{SettingsController, DEFAULT_MODEL};

/// Trim and upper-case a ticker; `None` when nothing is left
pub fn normalize_symbol(input: &str) -> Option<String> {
    let symbol = input.trim();
    if symbol.is_empty() {
        None
    } else {
        Some(symbol.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(" thyao.is "), Some("THYAO.IS".to_string()));
        assert_eq!(normalize_symbol("btc-usd"), Some("BTC-USD".to_string()));
        assert_eq!(normalize_symbol(" \t "), None);
    }
}
