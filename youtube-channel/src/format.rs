//! Compact display formatting for large counters such as view and subscriber counts.
//!
//! Counters are abbreviated with a `k` (thousand) or `M` (million) suffix and a single
//! decimal, e.g. `1234567` becomes `1,2M` under the default locale. Which characters
//! separate decimals and group thousands is display policy, so it lives in
//! [`NumberLocale`] and can be set from the configuration file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separators used when rendering abbreviated counters.
///
/// The default renders `1,2k` and `1.000,0k`: comma as the decimal separator and dot
/// between thousands groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberLocale {
    /// Placed between the integer part and the single decimal.
    pub decimal_separator: char,
    /// Placed between groups of three digits in the integer part.
    pub thousands_separator: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            decimal_separator: ',',
            thousands_separator: '.',
        }
    }
}

/// Renders a single counter in abbreviated form.
///
/// * below 1000: the value itself, no decimals and no suffix
/// * below 1000000: thousands with one decimal and a `k` suffix
/// * otherwise: millions with one decimal and an `M` suffix
///
/// The retained decimal is rounded half-up, so `999_950` renders as `1.000,0k` rather
/// than switching to the `M` form.
pub fn format_magnitude(value: u64, locale: &NumberLocale) -> String {
    if value < 1_000 {
        return group_thousands(value, locale.thousands_separator);
    }
    let (tenths, suffix) = if value < 1_000_000 {
        (round_to_tenths(value, 1_000), 'k')
    } else {
        (round_to_tenths(value, 1_000_000), 'M')
    };

    format!(
        "{}{}{}{}",
        group_thousands(tenths / 10, locale.thousands_separator),
        locale.decimal_separator,
        tenths % 10,
        suffix
    )
}

/// Formats the counters named in `keys` that are present in `values`.
///
/// Counters may be JSON strings (as the YouTube API sends them) or JSON numbers. Keys
/// that are absent, or whose value is not a non-negative integer, are left out of the
/// result.
pub fn format_statistics(
    values: &serde_json::Map<String, serde_json::Value>,
    keys: &[&str],
    locale: &NumberLocale,
) -> BTreeMap<String, String> {
    let mut formatted = BTreeMap::new();
    for &key in keys {
        let Some(value) = values.get(key) else {
            continue;
        };
        let counter = match value {
            serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
            serde_json::Value::Number(n) => n.as_u64(),
            _ => None,
        };
        match counter {
            Some(counter) => {
                formatted.insert(key.to_string(), format_magnitude(counter, locale));
            }
            None => {
                tracing::trace!(key, ?value, "skipping non-numeric counter");
            }
        }
    }
    formatted
}

/// `value / unit` expressed in tenths, rounded half-up.
fn round_to_tenths(value: u64, unit: u64) -> u64 {
    let step = unit / 10;
    value / step + u64::from(value % step >= step / 2)
}

fn group_thousands(n: u64, separator: char) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
