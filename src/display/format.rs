//! Locale-aware value formatting
//!
//! Amounts, percentages and dates as they appear in terminal tables and
//! export rows. Formatting never fails: a bad date pattern from the
//! settings file falls back to ISO dates.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::config::NumberFormat;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format an amount with currency symbol, digit grouping and fixed decimals
///
/// `1234567.5` with the default format renders as `$1,234,567.50`.
pub fn format_amount(amount: f64, format: &NumberFormat) -> String {
    if !amount.is_finite() {
        return format!("{}{}", format.currency_symbol, amount);
    }

    let fixed = format!("{:.*}", format.decimal_places, amount.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + 4);
    // "-0.00" is printed without a sign
    if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&format.currency_symbol);
    out.push_str(&group_digits(integer, &format.thousands_separator));
    if let Some(fraction) = fraction {
        out.push_str(&format.decimal_separator);
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Format a percentage with one decimal, e.g. `66.7%`
pub fn format_percentage(pct: f64) -> String {
    if pct.is_finite() {
        format!("{:.1}%", pct)
    } else {
        "0.0%".to_string()
    }
}

/// Format an instant with a strftime pattern
pub fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    let valid = StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error));
    let pattern = if valid { pattern } else { FALLBACK_DATE_FORMAT };
    date.format(pattern).to_string()
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
