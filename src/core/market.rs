//! Market data abstractions and core types

use super::fundamentals::RawFundamentals;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartPeriod {
    #[default]
    #[serde(rename = "1y", alias = "1Y")]
    OneYear,
    #[serde(rename = "5y", alias = "5Y")]
    FiveYears,
}

impl ChartPeriod {
    /// Range parameter understood by the chart endpoint.
    pub fn as_range(&self) -> &'static str {
        match self {
            ChartPeriod::OneYear => "1y",
            ChartPeriod::FiveYears => "5y",
        }
    }
}

impl Display for ChartPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ChartPeriod::OneYear => "1Y",
                ChartPeriod::FiveYears => "5Y",
            }
        )
    }
}

impl FromStr for ChartPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1y" => Ok(ChartPeriod::OneYear),
            "5y" => Ok(ChartPeriod::FiveYears),
            _ => Err(anyhow::anyhow!("Invalid chart period: {}", s)),
        }
    }
}

/// Daily closing prices keyed by trading date.
pub type PriceHistory = BTreeMap<NaiveDate, f64>;

#[derive(Debug, Clone, Default)]
pub struct StockData {
    pub history: PriceHistory,
    pub fundamentals: RawFundamentals,
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_stock_data(&self, symbol: &str, period: ChartPeriod) -> Result<StockData>;
}
