// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock classifier adapter for deterministic testing.
//!
//! `MockClassifier` implements `ClassifierAdapter` with pre-configured
//! results, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use civiq_core::{
    AdapterType, Classification, CiviqError, ClassifierAdapter, HealthStatus, PluginAdapter,
    TransportImage,
};

/// A mock classifier that returns pre-configured classifications.
///
/// Results are popped from a FIFO queue. When the queue is empty, the
/// `"Unknown"` sentinel with zero confidence is returned -- the same shape a
/// real classifier produces for an inconclusive response.
pub struct MockClassifier {
    results: Arc<Mutex<VecDeque<Classification>>>,
}

impl MockClassifier {
    /// Create a new mock classifier with an empty result queue.
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a mock classifier pre-loaded with the given results.
    pub fn with_results(results: Vec<Classification>) -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::from(results))),
        }
    }

    /// Add a result to the end of the queue.
    pub async fn add_result(&self, classification: Classification) {
        self.results.lock().await.push_back(classification);
    }

    async fn next_result(&self) -> Classification {
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Classification {
                label: "Unknown".to_string(),
                confidence: 0.0,
            })
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockClassifier {
    fn name(&self) -> &str {
        "mock-classifier"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Classifier
    }

    async fn health_check(&self) -> Result<HealthStatus, CiviqError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CiviqError> {
        Ok(())
    }
}

#[async_trait]
impl ClassifierAdapter for MockClassifier {
    async fn classify(&self, _image: &TransportImage) -> Result<Classification, CiviqError> {
        Ok(self.next_result().await)
    }
}
