//! News abstractions

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Number of headlines shown per lookup.
pub const MAX_ARTICLES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Most recent English articles mentioning `company_name`, newest first.
    async fn fetch_headlines(&self, company_name: &str) -> Result<Vec<NewsArticle>>;
}
