//! Beträge im deutschen Format lesen und ausgeben.

use crate::error::{HoaiError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

/// `57894.95775` → `57.894,96 €` (kaufmännisch auf Cent gerundet).
pub fn format_eur(amount: &Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut s = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        s.push('-');
    }
    s.push_str(&group_thousands(int_part));
    s.push(',');
    s.push_str(frac_part);
    for _ in frac_part.len()..2 {
        s.push('0');
    }
    s.push_str(" €");
    s
}

/// `19` → `19 %`, `2.5` → `2,5 %`.
pub fn format_percent(percent: &Decimal) -> String {
    format!("{} %", percent.normalize().to_string().replace('.', ","))
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

// 1.234 oder 12.345.678, ohne Nachkommastellen
static THOUSANDS_GROUPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d{1,3}(\.\d{3})+$").expect("valid thousands pattern"));

/// Liest Beträge wie `500000`, `500.000`, `500.000,50`, `500000,5` oder `500000.5`.
///
/// Ein Punkt vor genau drei Ziffern gilt als Tausendertrenner, ein Komma als Dezimalzeichen.
/// Ein nachgestelltes `€` oder `EUR` wird ignoriert.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_end_matches("EUR")
        .trim_end_matches('€')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if THOUSANDS_GROUPED.is_match(&cleaned) {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    normalized
        .parse::<Decimal>()
        .map_err(|e| HoaiError::InvalidInput(format!("{s:?} is not an amount: {e}")))
}

/// Übernimmt einen Gleitkommawert; NaN und ±∞ werden abgewiesen statt weitergereicht.
pub fn finite_decimal(field: &str, value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(HoaiError::InvalidInput(format!("{field} is not a finite number: {value}")));
    }
    Decimal::try_from(value)
        .map_err(|e| HoaiError::InvalidInput(format!("{field} = {value}: {e}")))
}
