//! Statement string formats
//!
//! The exact strings the overlays draw: chequing columns use bare
//! two-decimal amounts and a compact `MAR01` date; card statements use
//! `$`-grouped signed currency and a `MAR 01` date.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Bare two-decimal amount for chequing columns, e.g. `1234.56`.
/// Absent values render as an empty string so the column stays blank.
pub fn plain_amount(amount: Option<Decimal>) -> String {
    amount.map(two_decimals).unwrap_or_default()
}

/// Signed currency with thousands grouping, e.g. `-$1,234.56`.
pub fn currency(amount: Decimal) -> String {
    let grouped = group_thousands(&two_decimals(amount.abs()));
    if amount < Decimal::ZERO {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Compact chequing date: uppercase month abbreviation and zero-padded
/// day with no separator, e.g. `MAR01`.
pub fn compact_date(date: NaiveDate) -> String {
    format!("{}{:02}", date.format("%b").to_string().to_uppercase(), date.day())
}

/// Card date: uppercase month abbreviation, space, zero-padded day,
/// e.g. `MAR 03`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string().to_uppercase()
}

/// Round to cents and pad to exactly two decimal places.
fn two_decimals(amount: Decimal) -> String {
    let mut text = amount.round_dp(2).to_string();
    match text.split_once('.') {
        None => text.push_str(".00"),
        Some((_, frac)) if frac.len() == 1 => text.push('0'),
        _ => {}
    }
    text
}

// Callers pass unsigned values; the sign is applied after grouping.
fn group_thousands(value: &str) -> String {
    let (int_part, frac_part) = value.split_once('.').unwrap_or((value, ""));

    let mut grouped = String::with_capacity(value.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}
