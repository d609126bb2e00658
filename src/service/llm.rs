//! Minimal client for an OpenAI-compatible `/responses` endpoint.
//!
//! One POST per classification round-trip; no retries, no timeout beyond the
//! transport default.

use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Error type for completion requests.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Network-level failure before a response body could be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status; carries the provider's message when present.
    #[error("{0}")]
    Api(String),

    /// 2xx body that does not match the provider's response envelope.
    #[error("failed to parse response envelope: {0}")]
    Envelope(String),

    /// Envelope parsed but carried no text payload.
    #[error("response carried no text payload")]
    MissingPayload,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    input: &'a str,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response envelope: the text payload lives in the first content item of
/// the first output element.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(default)]
    text: Option<String>,
}

/// Non-2xx responses carry `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for the classification endpoint.
pub struct CompletionClient {
    client: Client,
    base_url: String,
    model: String,
}

impl CompletionClient {
    /// Create a new client.
    ///
    /// The base URL is the override when given, otherwise the provider's
    /// public endpoint.
    pub fn new(model: impl Into<String>, base_url: Option<&str>) -> Self {
        let base_url = base_url
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            client: Client::new(),
            base_url,
            model: model.into(),
        }
    }

    /// Issue the single POST and return the raw text payload.
    pub async fn complete(
        &self,
        credential: &str,
        prompt: &str,
    ) -> Result<String, CompletionError> {
        let url = format!("{}/responses", self.base_url);

        tracing::debug!(
            url = %url,
            model = %self.model,
            prompt_length = prompt.len(),
            "Issuing classification request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential)
            .json(&CompletionRequest {
                model: &self.model,
                input: prompt,
                response_format: ResponseFormat {
                    kind: "json_object",
                },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("unexpected status {}", status));
            return Err(CompletionError::Api(message));
        }

        let body = response.text().await?;
        let envelope: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::Envelope(e.to_string()))?;

        envelope
            .output
            .into_iter()
            .next()
            .and_then(|output| output.content.into_iter().next())
            .and_then(|content| content.text)
            .ok_or(CompletionError::MissingPayload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults_and_trims() {
        let client = CompletionClient::new("gpt-4o", None);
        assert_eq!(client.base_url, DEFAULT_BASE_URL);

        let client = CompletionClient::new("gpt-4o", Some("https://example.test/v1/"));
        assert_eq!(client.base_url, "https://example.test/v1");

        let client = CompletionClient::new("gpt-4o", Some("  "));
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_envelope_extraction() {
        let body = r#"{"output":[{"content":[{"text":"[]"}]}]}"#;
        let envelope: CompletionResponse = serde_json::from_str(body).unwrap();
        let text = envelope
            .output
            .into_iter()
            .next()
            .and_then(|o| o.content.into_iter().next())
            .and_then(|c| c.text);
        assert_eq!(text.as_deref(), Some("[]"));
    }

    #[tokio::test]
    #[ignore] // Requires network access and OPENAI_API_KEY
    async fn test_live_completion() {
        let key = std::env::var("OPENAI_API_KEY").unwrap();
        let client = CompletionClient::new("gpt-4o", None);
        let result = client
            .complete(&key, "Respond with JSON only: an empty array.")
            .await;
        assert!(result.is_ok());
    }
}
