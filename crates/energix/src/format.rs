//! Display formatting for surfaced figures.
//!
//! The dashboard serves a French-locale audience as a fixed business
//! requirement: comma decimal separator, no-break-space thousands grouping,
//! French month names. Formatting is pinned here rather than taken from the
//! ambient locale so output is reproducible everywhere.
//!
//! Missing or non-numeric values format as the literal `"N/A"`; callers
//! rely on that sentinel to render placeholder cells.

use crate::analytics::domain::Month;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use num_format::{CustomFormat, ToFormattedString};
use std::sync::OnceLock;

/// U+00A0, the fr-FR grouping separator.
pub const GROUP_SEPARATOR: char = '\u{00A0}';
/// Sentinel for missing/NaN values.
pub const NOT_AVAILABLE: &str = "N/A";
/// Dashboard currency (Tunisian dinar).
pub const DEFAULT_CURRENCY: &str = "TND";

fn french_grouping() -> &'static CustomFormat {
    static FORMAT: OnceLock<CustomFormat> = OnceLock::new();
    FORMAT.get_or_init(|| {
        CustomFormat::builder()
            .separator("\u{00A0}")
            .build()
            .expect("single-char grouping separator is valid")
    })
}

/// Format a number with fixed decimals under the fr-FR convention:
/// `1 234,50` (no-break-space grouping, comma decimal).
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let negative = value < 0.0;
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    // Grouping via num-format; an integer part beyond u128 is garbage data
    // and is left ungrouped rather than truncated.
    let mut out = match int_part.parse::<u128>() {
        Ok(int_value) => int_value.to_formatted_string(french_grouping()),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    if negative && out.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.insert(0, '-');
    }
    out
}

/// Format a monetary amount: `1 234,50 TND`.
pub fn format_currency(value: Option<f64>, decimals: usize) -> String {
    let number = format_number(value, decimals);
    if number == NOT_AVAILABLE {
        return number;
    }
    format!("{number}{GROUP_SEPARATOR}{DEFAULT_CURRENCY}")
}

/// Format a ratio as a percentage: `0.1234` becomes `12,34 %`.
pub fn format_percentage(value: Option<f64>, decimals: usize) -> String {
    let number = format_number(value.map(|v| v * 100.0), decimals);
    if number == NOT_AVAILABLE {
        return number;
    }
    format!("{number}{GROUP_SEPARATOR}%")
}

const PRECISE_MAGNITUDE: i32 = 6;
const PRECISE_DECIMALS: usize = 6;

/// High-precision display for technical figures (regression coefficients,
/// MSE). Values effectively zero collapse to `0`; values beyond six orders
/// of magnitude fall back to a scientific-notation marker rather than a
/// wall of digits.
pub fn format_precise_number(value: Option<f64>) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    if value.abs() < 10f64.powi(-PRECISE_MAGNITUDE) {
        return "0".to_string();
    }
    if value.abs() > 10f64.powi(PRECISE_MAGNITUDE) {
        return if value > 0.0 {
            format!("1e{PRECISE_MAGNITUDE}+")
        } else {
            format!("-1e{PRECISE_MAGNITUDE}+")
        };
    }

    let fixed = format!("{:.*}", PRECISE_DECIMALS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

const FILE_SIZE_UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Human-readable file size, binary (1024-based) units, at most two
/// decimal places with trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(FILE_SIZE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);

    let fixed = format!("{scaled:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, FILE_SIZE_UNITS[exponent])
}

/// Date rendering styles for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `15/03/2024`
    Short,
    /// `15 mars 2024`
    #[default]
    Long,
}

/// Format a calendar date with French month names.
pub fn format_date(date: Option<NaiveDate>, style: DateStyle) -> String {
    let date = match date {
        Some(date) => date,
        None => return NOT_AVAILABLE.to_string(),
    };

    match style {
        DateStyle::Short => format!("{:02}/{:02}/{}", date.day(), date.month(), date.year()),
        DateStyle::Long => {
            let month = Month::from_number(date.month())
                .map(|m| m.label().to_lowercase())
                .unwrap_or_default();
            format!("{} {} {}", date.day(), month, date.year())
        }
    }
}

/// Format a date with a 24-hour time suffix: `15 mars 2024 14:30`.
pub fn format_datetime(datetime: Option<NaiveDateTime>, style: DateStyle) -> String {
    let datetime = match datetime {
        Some(datetime) => datetime,
        None => return NOT_AVAILABLE.to_string(),
    };
    format!(
        "{} {:02}:{:02}",
        format_date(Some(datetime.date()), style),
        datetime.hour(),
        datetime.minute()
    )
}
