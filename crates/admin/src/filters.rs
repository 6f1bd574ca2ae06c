//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an amount as Indonesian rupiah, e.g. `Rp 150.000`.
///
/// Usage in templates: `{{ event.price|rupiah }}`
#[askama::filter_fn]
pub fn rupiah(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_rupiah(&value.to_string()))
}

/// Group the integer part with `.` and drop a zero fraction.
pub fn format_rupiah(amount: &str) -> String {
    let (negative, digits) = amount
        .strip_prefix('-')
        .map_or((false, amount), |rest| (true, rest));
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}Rp {grouped}")
    } else {
        format!("{sign}Rp {grouped},{fraction}")
    }
}
