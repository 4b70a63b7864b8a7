// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image-classification adapter for the Civiq complaint service.
//!
//! Wraps the remote prediction endpoint behind [`ClassifierAdapter`] and
//! normalizes its response: a missing category becomes the `"Unknown"`
//! sentinel the rest of the pipeline must tolerate, a missing confidence
//! becomes `0.0`. Failures are typed, never retried here.

pub mod client;

use async_trait::async_trait;
use tracing::debug;

use civiq_config::model::ClassifierConfig;
use civiq_core::{
    AdapterType, Classification, CiviqError, ClassifierAdapter, HealthStatus, PluginAdapter,
    TransportImage,
};

use crate::client::ClassifierClient;

/// Label used when the service response carries no category.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// HTTP-backed classifier adapter.
pub struct HttpClassifier {
    client: ClassifierClient,
}

impl HttpClassifier {
    /// Creates an adapter talking to the configured prediction endpoint.
    pub fn new(config: &ClassifierConfig) -> Result<Self, CiviqError> {
        Ok(Self {
            client: ClassifierClient::new(config)?,
        })
    }

    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: String) -> Self {
        self.client = self.client.with_endpoint(endpoint);
        self
    }
}

#[async_trait]
impl PluginAdapter for HttpClassifier {
    fn name(&self) -> &str {
        "http-classifier"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Classifier
    }

    async fn health_check(&self) -> Result<HealthStatus, CiviqError> {
        // The remote model cold-starts on demand; a probe request would spin
        // it up for nothing. Constructed means reachable-as-configured.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CiviqError> {
        Ok(())
    }
}

#[async_trait]
impl ClassifierAdapter for HttpClassifier {
    async fn classify(&self, image: &TransportImage) -> Result<Classification, CiviqError> {
        let response = self.client.predict(image).await?;

        let label = match response.category {
            Some(category) if !category.trim().is_empty() => category,
            _ => {
                debug!("classifier response missing category, using sentinel");
                UNKNOWN_LABEL.to_string()
            }
        };
        let confidence = response.confidence.unwrap_or(0.0);

        debug!(label = %label, confidence, "classification complete");
        Ok(Classification { label, confidence })
    }
}
