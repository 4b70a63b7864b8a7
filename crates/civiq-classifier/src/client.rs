// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the remote image-classification endpoint.
//!
//! Provides [`ClassifierClient`] which handles request construction,
//! bounded timeouts, and mapping transport failures into typed errors.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use civiq_config::model::ClassifierConfig;
use civiq_core::{CiviqError, TransportImage};

/// Request body sent to the prediction endpoint.
#[derive(Debug, Serialize)]
pub struct PredictRequest {
    /// Base64 of the raw image container bytes.
    pub image_base64: String,
    /// MIME type detected during decoding.
    pub mime_type: String,
}

/// Response body from the prediction endpoint.
///
/// Both fields are optional on the wire; normalization to the `"Unknown"`
/// sentinel and zero confidence happens in the adapter, not here.
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub category: Option<String>,
    pub confidence: Option<f64>,
}

/// HTTP client for classifier communication.
///
/// The service cold-starts slowly, so both the connect and overall timeouts
/// default to a full minute. Errors are not retried here; retry policy is
/// the caller's decision.
#[derive(Debug, Clone)]
pub struct ClassifierClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ClassifierClient {
    /// Creates a new classifier client from configuration.
    pub fn new(config: &ClassifierConfig) -> Result<Self, CiviqError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(timeout)
            .build()
            .map_err(|e| CiviqError::ClassifierUnavailable {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout,
        })
    }

    /// Overrides the endpoint (for testing with wiremock).
    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Sends a prediction request and returns the raw wire response.
    pub async fn predict(&self, image: &TransportImage) -> Result<PredictResponse, CiviqError> {
        let body = PredictRequest {
            image_base64: BASE64.encode(&image.data),
            mime_type: image.mime_type.clone(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CiviqError::ClassifierTimeout {
                        duration: self.timeout,
                    }
                } else {
                    CiviqError::ClassifierUnavailable {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        debug!(status = %status, "classifier response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CiviqError::ClassifierUnavailable {
                message: format!("classifier returned {status}: {body}"),
                source: None,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CiviqError::ClassifierUnavailable {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        serde_json::from_str(&body).map_err(|e| CiviqError::ClassifierUnavailable {
            message: format!("failed to parse classifier response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(timeout_secs: u64) -> ClassifierConfig {
        ClassifierConfig {
            endpoint: "http://unused.invalid/predict".into(),
            connect_timeout_secs: timeout_secs,
            timeout_secs,
        }
    }

    fn test_image() -> TransportImage {
        TransportImage {
            data: vec![0x89, 0x50, 0x4e, 0x47],
            mime_type: "image/png".into(),
        }
    }

    fn test_client(server_uri: &str, timeout_secs: u64) -> ClassifierClient {
        ClassifierClient::new(&test_config(timeout_secs))
            .unwrap()
            .with_endpoint(format!("{server_uri}/predict"))
    }

    #[tokio::test]
    async fn predict_parses_full_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "category": "potholes",
                "confidence": 0.93
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 30);
        let response = client.predict(&test_image()).await.unwrap();
        assert_eq!(response.category.as_deref(), Some("potholes"));
        assert_eq!(response.confidence, Some(0.93));
    }

    #[tokio::test]
    async fn predict_tolerates_missing_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 30);
        let response = client.predict(&test_image()).await.unwrap();
        assert!(response.category.is_none());
        assert!(response.confidence.is_none());
    }

    #[tokio::test]
    async fn predict_maps_500_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 30);
        let err = client.predict(&test_image()).await.unwrap_err();
        assert!(matches!(err, CiviqError::ClassifierUnavailable { .. }));
        assert!(err.to_string().contains("500"), "got: {err}");
    }

    #[tokio::test]
    async fn predict_maps_non_json_body_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 30);
        let err = client.predict(&test_image()).await.unwrap_err();
        assert!(matches!(err, CiviqError::ClassifierUnavailable { .. }));
    }

    #[tokio::test]
    async fn predict_maps_slow_response_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"category": "garbage"}))
                    .set_delay(Duration::from_millis(1500)),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 1);
        let err = client.predict(&test_image()).await.unwrap_err();
        assert!(
            matches!(err, CiviqError::ClassifierTimeout { .. }),
            "got: {err}"
        );
    }
}
