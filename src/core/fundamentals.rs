//! Typed view over the loosely-typed fundamentals returned by market data providers.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;

/// Marker used for any value that is not available.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single fundamentals field as reported by a provider.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Integer(i) => Some(*i as f64),
            MetricValue::Float(f) => Some(*f),
            MetricValue::Text(_) => None,
        }
    }

    pub fn is_not_available(&self) -> bool {
        matches!(self, MetricValue::Text(t) if t == NOT_AVAILABLE)
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(MetricValue::Integer)
                .or_else(|| n.as_f64().map(MetricValue::Float)),
            Value::String(s) => Some(MetricValue::Text(s.clone())),
            // Yahoo wraps numbers as {"raw": 1.23, "fmt": "1.23"} and uses {} for missing data
            Value::Object(map) => map.get("raw").and_then(MetricValue::from_json),
            _ => None,
        }
    }
}

impl Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Integer(i) => write!(f, "{i}"),
            MetricValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            MetricValue::Float(v) => write!(f, "{v}"),
            MetricValue::Text(t) => write!(f, "{t}"),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Float(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Integer(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

/// Company fundamentals with every field independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFundamentals {
    pub current_price: Option<MetricValue>,
    pub trailing_pe: Option<MetricValue>,
    pub market_cap: Option<MetricValue>,
    pub dividend_yield: Option<MetricValue>,
    pub currency: Option<String>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    pub long_business_summary: Option<String>,
}

impl RawFundamentals {
    /// Builds the typed record from a provider's field map.
    ///
    /// Keys use the provider's camelCase names (`currentPrice`, `trailingPE`, ...).
    /// Nulls, booleans, arrays and objects without a `raw` value are treated as
    /// absent; empty strings are absent for the textual fields.
    pub fn from_fields(fields: &HashMap<String, Value>) -> Self {
        let metric = |key: &str| fields.get(key).and_then(MetricValue::from_json);
        let text = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        RawFundamentals {
            current_price: metric("currentPrice"),
            trailing_pe: metric("trailingPE"),
            market_cap: metric("marketCap"),
            dividend_yield: metric("dividendYield"),
            currency: text("currency"),
            long_name: text("longName"),
            short_name: text("shortName"),
            long_business_summary: text("longBusinessSummary"),
        }
    }

    /// Name used for headings and news queries: long name, then short name, then the ticker.
    pub fn company_name(&self, ticker: &str) -> String {
        self.long_name
            .as_deref()
            .or(self.short_name.as_deref())
            .unwrap_or(ticker)
            .to_string()
    }
}
