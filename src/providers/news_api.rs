use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::util::http_client;
use crate::core::news::MAX_ARTICLES;
use crate::core::{NewsArticle, NewsProvider};

/// Client for the newsapi.org `everything` endpoint.
pub struct NewsApiProvider {
    base_url: String,
    api_key: Option<String>,
    page_size: usize,
    client: reqwest::Client,
}

impl NewsApiProvider {
    pub fn new(base_url: &str, api_key: Option<String>, page_size: usize) -> Result<Self> {
        Ok(NewsApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            page_size: page_size.clamp(1, MAX_ARTICLES),
            client: http_client()?,
        })
    }
}

#[derive(Deserialize, Debug)]
struct NewsApiResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Deserialize, Debug)]
struct NewsApiArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

impl NewsApiArticle {
    fn into_article(self) -> Option<NewsArticle> {
        Some(NewsArticle {
            title: self.title.filter(|t| !t.trim().is_empty())?,
            url: self.url.filter(|u| !u.trim().is_empty())?,
            description: self.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    #[instrument(name = "NewsApiFetch", skip(self), fields(company = %company_name))]
    async fn fetch_headlines(&self, company_name: &str) -> Result<Vec<NewsArticle>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("News API key is not set")?;

        let endpoint = format!("{}/v2/everything", self.base_url);
        debug!("Requesting headlines from {}", endpoint);

        let page_size = self.page_size.to_string();
        let url = Url::parse_with_params(
            &endpoint,
            &[
                ("q", company_name),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ],
        )?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for news about: {}", e.without_url(), company_name))?;

        // Error payloads come with a non-2xx status, parse the body first to keep the message
        let status = response.status();
        let data: NewsApiResponse = read_json_any_status(response, company_name).await?;
        if data.status != "ok" {
            return Err(anyhow!(
                "News API returned status '{}' ({}): {}",
                data.status,
                status,
                data.message.as_deref().unwrap_or("no message")
            ));
        }

        let articles: Vec<NewsArticle> = data
            .articles
            .into_iter()
            .filter_map(NewsApiArticle::into_article)
            .take(self.page_size)
            .collect();
        debug!(count = articles.len(), "Received headlines");

        Ok(articles)
    }
}

async fn read_json_any_status(
    response: reqwest::Response,
    company_name: &str,
) -> Result<NewsApiResponse> {
    let status = response.status();
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        if status.is_success() {
            anyhow!("Failed to parse JSON response for news about {}: {}", company_name, e)
        } else {
            anyhow!("HTTP error: {} for news about {}", status, company_name)
        }
    })
}
