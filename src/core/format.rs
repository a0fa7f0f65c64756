//! Display formatting for metric values and long descriptions.

use super::fundamentals::{MetricValue, NOT_AVAILABLE};

const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Abbreviates a magnitude with a T/B/M/K suffix, e.g. `2_500_000` becomes `2.50M`.
///
/// Values below one thousand keep their plain form. Missing or non-numeric
/// values are shown as "N/A".
pub fn format_large_number(value: Option<&MetricValue>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };
    let Some(n) = value.as_f64() else {
        return NOT_AVAILABLE.to_string();
    };

    let abs_n = n.abs();
    SUFFIXES
        .iter()
        .find(|(threshold, _)| abs_n >= *threshold)
        .map_or_else(
            || value.to_string(),
            |(threshold, suffix)| format!("{:.2}{suffix}", n / threshold),
        )
}

/// Shortens `text` to its first `limit` characters followed by "...".
///
/// Trailing whitespace of the kept prefix is dropped. Text shorter than the
/// limit still gets the marker. With `full` set the text is returned as is.
pub fn truncate(text: &str, limit: usize, full: bool) -> String {
    if full {
        return text.to_string();
    }
    let prefix: String = text.chars().take(limit).collect();
    format!("{}...", prefix.trim_end())
}
