//! Display Formatting
//!
//! Compact number formatting, change-sign rendering and the lightweight
//! markup formatter applied to AI analysis and answer text.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Direction of a price change, chosen by `change_percent >= 0`
///
/// Exactly zero renders as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    pub fn from_change_percent(change_percent: f64) -> Self {
        if change_percent >= 0.0 {
            Trend::Positive
        } else {
            Trend::Negative
        }
    }

    /// CSS class used by the dashboard markup
    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
        }
    }

    /// Prefix shown before the change values; negatives carry their own "-"
    pub fn sign_prefix(&self) -> &'static str {
        match self {
            Trend::Positive => "+",
            Trend::Negative => "",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Positive => "▲",
            Trend::Negative => "▼",
        }
    }
}

/// Format with two decimals; `-0.00` collapses to `0.00`
pub fn fixed2(value: f64) -> String {
    let text = format!("{:.2}", value);
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

/// Compact a number with a T/B/M/K suffix, two decimals
pub fn format_number(num: f64) -> String {
    if num >= 1e12 {
        format!("{}T", fixed2(num / 1e12))
    } else if num >= 1e9 {
        format!("{}B", fixed2(num / 1e9))
    } else if num >= 1e6 {
        format!("{}M", fixed2(num / 1e6))
    } else if num >= 1e3 {
        format!("{}K", fixed2(num / 1e3))
    } else {
        fixed2(num)
    }
}

/// Price with currency sign ("$1.50K")
pub fn format_price(price: f64) -> String {
    format!("${}", format_number(price))
}

/// Change value with the trend's sign prefix ("+1.25")
pub fn signed(value: f64, trend: Trend) -> String {
    format!("{}{}", trend.sign_prefix(), fixed2(value))
}

/// Percent change with the trend's sign prefix ("+1.25%")
pub fn signed_percent(value: f64, trend: Trend) -> String {
    format!("{}{}%", trend.sign_prefix(), fixed2(value))
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

struct Markup {
    bold: Regex,
    italic: Regex,
    heading: Regex,
}

fn markup() -> &'static Markup {
    static MARKUP: OnceLock<Markup> = OnceLock::new();
    MARKUP.get_or_init(|| Markup {
        bold: Regex::new(r"\*\*(.*?)\*\*").expect("static regex"),
        italic: Regex::new(r"\*(.*?)\*").expect("static regex"),
        heading: Regex::new(r"([0-9]+\.\s+[A-ZÇĞİÖŞÜ][^:]+:)").expect("static regex"),
    })
}

/// Render AI analysis text as an HTML fragment
///
/// `**x**` becomes `<strong>`, `*x*` becomes `<em>`, a blank line starts a
/// new paragraph, a single newline becomes `<br>`, and numbered headers such
/// as `1. Teknik Görünüm:` become `<h4>`. The input is HTML-escaped first.
pub fn format_analysis_text(text: &str) -> String {
    let m = markup();

    let escaped = escape_html(text).replace("\r\n", "\n");
    let formatted = m.bold.replace_all(&escaped, "<strong>${1}</strong>");
    let formatted = m.italic.replace_all(&formatted, "<em>${1}</em>");
    let formatted = formatted.replace("\n\n", "</p><p>").replace('\n', "<br>");
    let formatted = m.heading.replace_all(&formatted, "<h4>${1}</h4>");

    format!("<p>{}</p>", formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_suffixes() {
        assert_eq!(format_number(1_500.0), "1.50K");
        assert_eq!(format_number(2_500_000.0), "2.50M");
        assert_eq!(format_number(999.0), "999.00");
        assert_eq!(format_number(3_200_000_000.0), "3.20B");
        assert_eq!(format_number(2_750_000_000_000.0), "2.75T");
        assert_eq!(format_number(0.0), "0.00");
    }

    #[test]
    fn test_format_number_negative_stays_plain() {
        assert_eq!(format_number(-2_500.0), "-2500.00");
    }

    #[test]
    fn test_trend_from_change_percent() {
        assert_eq!(Trend::from_change_percent(1.2), Trend::Positive);
        assert_eq!(Trend::from_change_percent(0.0), Trend::Positive);
        assert_eq!(Trend::from_change_percent(-0.01), Trend::Negative);
        assert_eq!(Trend::from_change_percent(f64::NAN), Trend::Negative);

        assert_eq!(Trend::Positive.css_class(), "positive");
        assert_eq!(Trend::Negative.css_class(), "negative");
    }

    #[test]
    fn test_signed_values() {
        let up = Trend::from_change_percent(1.234);
        assert_eq!(signed_percent(1.234, up), "+1.23%");
        assert_eq!(signed(2.5, up), "+2.50");

        let down = Trend::from_change_percent(-1.5);
        assert_eq!(signed_percent(-1.5, down), "-1.50%");
        assert_eq!(signed(-0.75, down), "-0.75");

        let flat = Trend::from_change_percent(-0.0);
        assert_eq!(signed_percent(-0.0, flat), "+0.00%");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(189.5), "$189.50");
        assert_eq!(format_price(64_250.0), "$64.25K");
    }

    #[test]
    fn test_bold_and_italic() {
        let html = format_analysis_text("**bold** and *italic*");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
        assert!(html.starts_with("<p>"));
        assert!(html.ends_with("</p>"));
    }

    #[test]
    fn test_paragraphs_and_line_breaks() {
        let html = format_analysis_text("first\nsecond\n\nthird");
        assert_eq!(html, "<p>first<br>second</p><p>third</p>");
    }

    #[test]
    fn test_numbered_headings() {
        let html = format_analysis_text("1. Teknik Görünüm: yükseliş\n2. Özet: olumlu");
        assert!(html.contains("<h4>1. Teknik Görünüm:</h4>"));
        assert!(html.contains("<h4>2. Özet:</h4>"));

        let html = format_analysis_text("3. lowercase heading: no");
        assert!(!html.contains("<h4>"));
    }

    #[test]
    fn test_input_is_escaped() {
        let html = format_analysis_text("<script>alert(1)</script> & **ok**");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp;"));
        assert!(html.contains("<strong>ok</strong>"));
    }
}
