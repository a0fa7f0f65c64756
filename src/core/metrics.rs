//! Key metrics shown for a looked-up stock.

use super::format::format_large_number;
use super::fundamentals::{MetricValue, NOT_AVAILABLE, RawFundamentals};
use serde::{Deserialize, Serialize};

/// How the dividend yield is rendered. The provider value is never rescaled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividendYieldStyle {
    /// The provider value as is, e.g. `0.5`.
    #[default]
    Raw,
    /// The provider value followed by `%`, e.g. `0.5%`.
    Percent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMetrics {
    pub price: String,
    pub pe_ratio: String,
    pub market_cap: String,
    pub dividend_yield: String,
}

fn display_or_na(value: Option<&MetricValue>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), MetricValue::to_string)
}

/// Turns raw fundamentals into display strings. Only the market cap is abbreviated.
pub fn present(fundamentals: &RawFundamentals, style: DividendYieldStyle) -> KeyMetrics {
    let currency = fundamentals.currency.as_deref().unwrap_or("");

    let dividend_yield = match fundamentals.dividend_yield.as_ref() {
        Some(v) if !v.is_not_available() && style == DividendYieldStyle::Percent => format!("{v}%"),
        other => display_or_na(other),
    };

    KeyMetrics {
        price: format!(
            "{currency} {}",
            display_or_na(fundamentals.current_price.as_ref())
        ),
        pe_ratio: display_or_na(fundamentals.trailing_pe.as_ref()),
        market_cap: format!(
            "{currency} {}",
            format_large_number(fundamentals.market_cap.as_ref())
        ),
        dividend_yield,
    }
}
