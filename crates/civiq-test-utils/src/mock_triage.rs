// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock triage adapter for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use civiq_core::{
    AdapterType, CiviqError, HealthStatus, PluginAdapter, TriageAdapter, TriageInput,
    TriageReport,
};

/// A mock triage service that returns pre-configured reports.
///
/// Reports are popped from a FIFO queue. When the queue is empty, a neutral
/// mid-priority report with an empty department is returned, which exercises
/// the pipeline's fallback-department path. The inputs each call received
/// are recorded for assertions.
pub struct MockTriage {
    reports: Arc<Mutex<VecDeque<TriageReport>>>,
    inputs: Arc<Mutex<Vec<TriageInput>>>,
}

impl MockTriage {
    /// Create a new mock triage adapter with an empty report queue.
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(VecDeque::new())),
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock triage adapter pre-loaded with the given reports.
    pub fn with_reports(reports: Vec<TriageReport>) -> Self {
        Self {
            reports: Arc::new(Mutex::new(VecDeque::from(reports))),
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a report to the end of the queue.
    pub async fn add_report(&self, report: TriageReport) {
        self.reports.lock().await.push_back(report);
    }

    /// The inputs received so far, in call order.
    pub async fn recorded_inputs(&self) -> Vec<TriageInput> {
        self.inputs.lock().await.clone()
    }

    async fn next_report(&self) -> TriageReport {
        self.reports
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| TriageReport {
                priority: 5,
                department: String::new(),
                justification: "mock justification".to_string(),
            })
    }
}

impl Default for MockTriage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTriage {
    fn name(&self) -> &str {
        "mock-triage"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Triage
    }

    async fn health_check(&self) -> Result<HealthStatus, CiviqError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CiviqError> {
        Ok(())
    }
}

#[async_trait]
impl TriageAdapter for MockTriage {
    async fn triage(&self, input: &TriageInput) -> Result<TriageReport, CiviqError> {
        self.inputs.lock().await.push(input.clone());
        Ok(self.next_report().await)
    }
}
