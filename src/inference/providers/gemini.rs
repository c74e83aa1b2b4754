//! Google Gemini provider using the `generateContent` endpoint.
//!
//! One request per user message, no streaming. The persona instruction and
//! the user's text travel as two parts of a single content entry, and the
//! API key goes in the `key` query parameter.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::config::ResolvedConfig;
use crate::inference::{FetchError, ReplyFetcher};

// ============================================================================
// generateContent Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

/// The request body for `models/<model>:generateContent`
#[derive(Serialize, Debug)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn build_request<'a>(persona: &'a str, user_text: &'a str) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part { text: persona }, Part { text: user_text }],
        }],
    }
}

/// Pulls `candidates[0].content.parts[0].text` out of a response body.
fn extract_reply(body: &str) -> Result<String, FetchError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("invalid JSON: {e}")))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| {
            FetchError::MalformedResponse("no candidates[0].content.parts[0].text".to_string())
        })
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Everything the provider needs, decoupled from the config file layout.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub persona: String,
}

impl From<&ResolvedConfig> for GeminiSettings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.clone(),
            model: config.model_name.clone(),
            persona: config.persona.clone(),
        }
    }
}

pub struct GeminiProvider {
    settings: GeminiSettings,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(settings: GeminiSettings) -> Self {
        if settings.api_key.is_none() {
            warn!("No Gemini API key configured; every reply will be the fallback message");
        }
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait]
impl ReplyFetcher for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn fetch_reply(&self, user_text: &str) -> Result<String, FetchError> {
        let api_key = self.settings.api_key.as_deref().ok_or_else(|| {
            FetchError::Config("Gemini API key must be set (config file or GEMINI_API_KEY)".to_string())
        })?;

        let body = build_request(&self.settings.persona, user_text);

        info!(
            "Gemini generateContent request: model={}, user_text_len={}",
            self.settings.model,
            user_text.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        debug!("Gemini response status: {}", status);

        let text = response.text().await?;

        if !status.is_success() {
            warn!("Gemini API error: {} - {}", status, text);
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        extract_reply(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request("persona", "my head hurts")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "contents": [
                    { "parts": [ { "text": "persona" }, { "text": "my head hurts" } ] }
                ]
            })
        );
    }

    #[test]
    fn test_extract_reply_first_candidate_first_part() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "first" }, { "text": "second" } ] } },
                { "content": { "parts": [ { "text": "other" } ] } }
            ]
        }"#;
        assert_eq!(extract_reply(body).unwrap(), "first");
    }

    #[test]
    fn test_extract_reply_missing_fields() {
        for body in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{}]}}]}"#,
        ] {
            assert!(
                matches!(extract_reply(body), Err(FetchError::MalformedResponse(_))),
                "expected malformed for {body}"
            );
        }
    }

    #[test]
    fn test_extract_reply_invalid_json() {
        assert!(matches!(
            extract_reply("<html>oops</html>"),
            Err(FetchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GeminiProvider::new(GeminiSettings {
            api_key: Some("k".to_string()),
            base_url: "http://localhost:1234/v1beta/".to_string(),
            model: "gemini-test".to_string(),
            persona: String::new(),
        });
        assert_eq!(
            provider.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let provider = GeminiProvider::new(GeminiSettings {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            model: "m".to_string(),
            persona: String::new(),
        });
        assert!(matches!(
            provider.fetch_reply("hi").await,
            Err(FetchError::Config(_))
        ));
    }
}
