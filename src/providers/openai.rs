use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::util::{http_client, read_json};
use crate::core::summary::build_prompt;
use crate::core::{NewsArticle, SummarizationProvider};

const SYSTEM_PROMPT: &str = "You are a financial news assistant. \
    Summarize news headlines for investors in 3-4 plain sentences without speculation.";

/// Summarizes headlines through an OpenAI-compatible chat completions API.
pub struct OpenAiSummarizer {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl OpenAiSummarizer {
    pub fn new(base_url: &str, api_key: Option<String>, model: &str) -> Result<Self> {
        Ok(OpenAiSummarizer {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            client: http_client()?,
        })
    }

    async fn request_summary(&self, articles: &[NewsArticle], company_name: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().context("LLM API key is not set")?;

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(model = %self.model, "Requesting summary from {}", url);

        let prompt = build_prompt(articles, company_name);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: 0.3,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for summary of: {}", e, company_name))?;

        let data: ChatResponse = read_json(response, &format!("summary of {company_name}")).await?;
        data.choices
            .into_iter()
            .find_map(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| anyhow!("Empty summary returned for: {}", company_name))
    }
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl SummarizationProvider for OpenAiSummarizer {
    #[instrument(
        name = "LlmSummarize",
        skip(self, articles),
        fields(company = %company_name, articles = articles.len())
    )]
    async fn summarize(&self, articles: &[NewsArticle], company_name: &str) -> String {
        match self.request_summary(articles, company_name).await {
            Ok(summary) => summary,
            Err(e) => {
                debug!(error = %e, "Summary request failed");
                format!("Error generating summary: {e}")
            }
        }
    }
}
