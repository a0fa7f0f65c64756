//! Headline summarization abstractions

use super::news::NewsArticle;
use async_trait::async_trait;

#[async_trait]
pub trait SummarizationProvider: Send + Sync {
    /// A 3-4 sentence summary of `articles`.
    ///
    /// Failures are reported in the returned text rather than as an error.
    async fn summarize(&self, articles: &[NewsArticle], company_name: &str) -> String;
}

/// Builds the user prompt listing every headline for `company_name`.
pub fn build_prompt(articles: &[NewsArticle], company_name: &str) -> String {
    let mut prompt = format!("Recent news headlines about {company_name}:\n");
    for (i, article) in articles.iter().enumerate() {
        prompt.push_str(&format!("{}. {}", i + 1, article.title));
        if let Some(description) = article.description.as_deref() {
            prompt.push_str(&format!(" - {description}"));
        }
        prompt.push('\n');
    }
    prompt.push_str("\nSummarize what these headlines say about the company in 3-4 sentences.");
    prompt
}
