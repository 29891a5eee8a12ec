//! Google Gemini `generateContent` client.
//!
//! One authenticated HTTPS POST per call, carrying only the user's text —
//! staged attachments are rendered locally and never transmitted, which is
//! the contract the upstream client targets. The reply is extracted from
//! `candidates[0].content.parts[0].text` and trimmed; anything else in the
//! body is ignored.

use crate::providers::traits::{GenerationError, Generator};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Gemini client bound to one model and API key.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

// ── API request/response types ───────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Client for `model` authenticated with `api_key`.
    ///
    /// No explicit deadline is set; timeout policy is the transport
    /// default, and callers wanting bounded latency wrap the call.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Resolve the API key from `GEMINI_API_KEY` then `GOOGLE_API_KEY`,
    /// using the default model. `None` when neither is set.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()?;
        Some(Self::new(api_key, DEFAULT_MODEL))
    }

    /// Point the client at a different host. Used by tests to target a
    /// local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Pull the reply text out of a parsed response body.
    fn extract_reply(response: GenerateContentResponse) -> Option<String> {
        response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, user_text: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: user_text.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|err| GenerationError::NetworkFailure(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::NetworkFailure(format!(
                "endpoint returned {status}"
            )));
        }

        // A 2xx body that is not JSON, or JSON without the expected reply
        // path, is a contract violation rather than a transport problem.
        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| GenerationError::MalformedResponse)?;

        Self::extract_reply(body)
            .map(|text| text.trim().to_string())
            .ok_or(GenerationError::MalformedResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reply_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }] }
            }]
        })
    }

    #[test]
    fn request_serializes_to_wire_contract() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Hello".to_string(),
                }],
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"contents":[{"parts":[{"text":"Hello"}]}]}"#);
    }

    #[test]
    fn extract_reply_walks_the_candidate_path() {
        let body: GenerateContentResponse =
            serde_json::from_value(reply_body("Hi there")).unwrap();
        assert_eq!(
            GeminiClient::extract_reply(body).as_deref(),
            Some("Hi there")
        );
    }

    #[test]
    fn extract_reply_handles_empty_candidates() {
        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(GeminiClient::extract_reply(body).is_none());

        let body: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(GeminiClient::extract_reply(body).is_none());
    }

    #[test]
    fn endpoint_includes_model_and_key() {
        let client = GeminiClient::new("test-key", "gemini-1.5-flash");
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key=test-key"
        );
    }

    #[tokio::test]
    async fn successful_reply_is_trimmed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "ping" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("  pong \n")))
            .mount(&server)
            .await;

        let client =
            GeminiClient::new("test-key", "gemini-1.5-flash").with_base_url(server.uri());
        let reply = client.generate("ping").await.unwrap();
        assert_eq!(reply, "pong");
    }

    #[tokio::test]
    async fn non_success_status_is_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client =
            GeminiClient::new("test-key", "gemini-1.5-flash").with_base_url(server.uri());
        let err = client.generate("ping").await.unwrap_err();
        assert!(matches!(err, GenerationError::NetworkFailure(_)));
    }

    #[tokio::test]
    async fn missing_reply_path_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let client =
            GeminiClient::new("test-key", "gemini-1.5-flash").with_base_url(server.uri());
        let err = client.generate("ping").await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client =
            GeminiClient::new("test-key", "gemini-1.5-flash").with_base_url(server.uri());
        let err = client.generate("ping").await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_failure() {
        // Nothing listens on this port.
        let client = GeminiClient::new("test-key", "gemini-1.5-flash")
            .with_base_url("http://127.0.0.1:1");
        let err = client.generate("ping").await.unwrap_err();
        assert!(matches!(err, GenerationError::NetworkFailure(_)));
    }
}
