//! Shared helper functions for CLI commands

use chrono::NaiveDate;
use console::{style, StyledObject};

use crate::analytics::PerformanceTier;
use crate::entities::RfpStatus;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$143,000`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

pub fn style_status(status: RfpStatus) -> StyledObject<&'static str> {
    let label = style(status.label());
    match status {
        RfpStatus::QuotationPending => label.yellow(),
        RfpStatus::OrderPending => label.blue(),
        RfpStatus::InProduction => label.magenta(),
        RfpStatus::Delivered => label.green(),
        RfpStatus::Fulfilled => label.green().bright(),
        RfpStatus::Cancelled => label.red(),
    }
}

pub fn style_tier(tier: PerformanceTier) -> StyledObject<&'static str> {
    let label = style(tier.label());
    match tier {
        PerformanceTier::Excellent => label.green(),
        PerformanceTier::Good => label.yellow(),
        PerformanceTier::NeedsImprovement => label.red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(15_000.0), "$15,000");
        assert_eq!(format_currency(1_234_567.4), "$1,234,567");
        assert_eq!(format_currency(-2500.0), "-$2,500");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "-");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 10, 3)),
            "2024-10-03"
        );
    }

    #[test]
    fn test_status_labels_are_kept() {
        for status in RfpStatus::all() {
            assert_eq!(
                style_status(*status).force_styling(false).to_string(),
                status.label()
            );
        }
    }
}
