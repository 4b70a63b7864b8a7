// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! authentication, bounded timeouts, and error-body decoding.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use civiq_config::model::GeminiConfig;
use civiq_core::CiviqError;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// Fails with `Config` if no API key is configured.
    pub fn new(config: &GeminiConfig) -> Result<Self, CiviqError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                CiviqError::Config(
                    "gemini.api_key is not set (config key or CIVIQ_GEMINI_API_KEY)".to_string(),
                )
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| CiviqError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CiviqError::TriageUnavailable {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a `generateContent` request and returns the parsed response.
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, CiviqError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self.client.post(&url).json(request).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else {
                format!("HTTP request failed: {e}")
            };
            CiviqError::TriageUnavailable {
                message,
                source: Some(Box::new(e)),
            }
        })?;

        let status = response.status();
        debug!(status = %status, model = %self.model, "triage response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "Gemini API error ({}): {}",
                    api_err.error.status, api_err.error.message
                )
            } else {
                format!("Gemini API returned {status}: {body}")
            };
            return Err(CiviqError::TriageUnavailable {
                message,
                source: None,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CiviqError::TriageUnavailable {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        serde_json::from_str(&body).map_err(|e| CiviqError::TriageMalformed {
            message: format!("response is not a generateContent body: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, GenerationConfig, Part};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> GeminiConfig {
        GeminiConfig {
            api_key: Some("test-api-key".into()),
            model: "gemini-2.5-flash".into(),
            endpoint: "http://unused.invalid".into(),
            timeout_secs: 30,
        }
    }

    fn test_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some("triage this".into()),
                }],
            }],
            generation_config: GenerationConfig::triage(),
        }
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let mut config = test_config();
        config.api_key = None;
        let err = GeminiClient::new(&config).unwrap_err();
        assert!(matches!(err, CiviqError::Config(_)));
    }

    #[tokio::test]
    async fn generate_posts_to_model_path_with_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "{}"}]}}]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config())
            .unwrap()
            .with_base_url(server.uri());
        let response = client.generate(&test_request()).await.unwrap();
        assert_eq!(response.first_text(), Some("{}"));
    }

    #[tokio::test]
    async fn generate_decodes_api_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"code": 429, "message": "quota exhausted", "status": "RESOURCE_EXHAUSTED"}
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config())
            .unwrap()
            .with_base_url(server.uri());
        let err = client.generate(&test_request()).await.unwrap_err();
        assert!(matches!(err, CiviqError::TriageUnavailable { .. }));
        assert!(err.to_string().contains("RESOURCE_EXHAUSTED"), "got: {err}");
    }

    #[tokio::test]
    async fn generate_maps_non_json_success_to_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config())
            .unwrap()
            .with_base_url(server.uri());
        let err = client.generate(&test_request()).await.unwrap_err();
        assert!(matches!(err, CiviqError::TriageMalformed { .. }));
    }
}
