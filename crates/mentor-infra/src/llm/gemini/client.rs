//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google
//! Gemini.
//!
//! Sends non-streaming requests to the Generative Language API
//! (`/v1beta/models/{model}:generateContent`) with the API key in the
//! `x-goog-api-key` header. The key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.
//!
//! [`LlmProvider`]: mentor_core::llm::provider::LlmProvider

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use mentor_core::llm::provider::LlmProvider;
use mentor_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::types::{GeminiContent, GeminiPart, GeminiRequest, GeminiResponse};

/// Google Gemini LLM provider.
///
/// One `complete` call per chat round, no automatic retry. The request
/// timeout is bounded so a hung upstream surfaces as a gateway failure
/// instead of stalling the round indefinitely.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-2.5-flash-preview-05-20")
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model,
        }
    }

    /// The configured model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Full URL of the generateContent endpoint for the configured model.
    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Convert a generic [`CompletionRequest`] into a [`GeminiRequest`].
    fn to_gemini_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| GeminiContent {
                role: m.role.to_string(),
                parts: vec![GeminiPart {
                    text: m.content.clone(),
                }],
            })
            .collect();

        GeminiRequest { contents }
    }
}

// GeminiProvider intentionally does not derive Debug; the SecretString
// field must never reach logs or panic output.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_gemini_request(request);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let candidate = gemini_resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Provider {
                message: "response contained no candidates".to_string(),
            })?;

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(CompletionResponse { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_types::llm::{Message, MessageRole};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "gemini-2.5-flash-preview-05-20";

    fn make_provider(base_url: String) -> GeminiProvider {
        GeminiProvider::new(SecretString::from("test-key-not-real"), MODEL.to_string())
            .with_base_url(base_url)
    }

    fn request(content: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![Message {
                role: MessageRole::User,
                content: content.to_string(),
            }],
        }
    }

    #[test]
    fn test_provider_name() {
        let provider = make_provider("http://localhost".to_string());
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), MODEL);
    }

    #[test]
    fn test_to_gemini_request_maps_roles() {
        let provider = make_provider("http://localhost".to_string());
        let req = CompletionRequest {
            messages: vec![
                Message {
                    role: MessageRole::User,
                    content: "question".to_string(),
                },
                Message {
                    role: MessageRole::Model,
                    content: "answer".to_string(),
                },
            ],
        };

        let gemini_req = provider.to_gemini_request(&req);
        assert_eq!(gemini_req.contents.len(), 2);
        assert_eq!(gemini_req.contents[0].role, "user");
        assert_eq!(gemini_req.contents[0].parts[0].text, "question");
        assert_eq!(gemini_req.contents[1].role, "model");
        assert_eq!(gemini_req.contents[1].parts[0].text, "answer");
    }

    #[tokio::test]
    async fn test_complete_joins_candidate_parts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
            .and(header("x-goog-api-key", "test-key-not-real"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "Idea X"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "Part one. "}, {"text": "Part two."}]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider(mock_server.uri());
        let response = provider.complete(&request("Idea X")).await.unwrap();
        assert_eq!(response.content, "Part one. Part two.");
    }

    #[tokio::test]
    async fn test_complete_maps_auth_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
            .mount(&mock_server)
            .await;

        let provider = make_provider(mock_server.uri());
        let err = provider.complete(&request("Idea X")).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_complete_maps_rate_limit() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&mock_server)
            .await;

        let provider = make_provider(mock_server.uri());
        let err = provider.complete(&request("Idea X")).await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_complete_maps_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
            .mount(&mock_server)
            .await;

        let provider = make_provider(mock_server.uri());
        let err = provider.complete(&request("Idea X")).await.unwrap_err();
        match err {
            LlmError::Provider { message } => {
                assert!(message.contains("503"));
                assert!(message.contains("backend unavailable"));
            }
            other => panic!("expected Provider error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_candidates() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let provider = make_provider(mock_server.uri());
        let err = provider.complete(&request("Idea X")).await.unwrap_err();
        match err {
            LlmError::Provider { message } => {
                assert!(message.contains("no candidates"));
            }
            other => panic!("expected Provider error, got: {other}"),
        }
    }
}
