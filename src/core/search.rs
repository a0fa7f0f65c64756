//! Ticker lookup abstractions

use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerCandidate {
    pub display_name: String,
    pub symbol: String,
    pub exchange: Option<String>,
    pub quote_type: Option<String>,
}

#[async_trait]
pub trait TickerSearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<TickerCandidate>>;
}
