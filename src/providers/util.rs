use anyhow::{Result, anyhow};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Builds the HTTP client shared by a provider.
pub fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("tickerview/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Checks the status of `response` and parses its body as JSON.
///
/// `subject` names what was requested and is included in every error message.
pub async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    subject: &str,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("HTTP error: {} for {}", status, subject));
    }

    let text = response.text().await?;
    debug!(body_len = text.len(), "Received response body for {}", subject);

    serde_json::from_str(&text).map_err(|e| {
        error!(error = ?e, response = %text, "Failed to parse response");
        anyhow!("Failed to parse JSON response for {}: {}", subject, e)
    })
}
