// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triage adapter trait for the external structured-reasoning service.

use async_trait::async_trait;

use crate::error::CiviqError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{TriageInput, TriageReport};

/// Adapter for the structured-generation triage capability.
///
/// Implementations send a fixed prompt built from the classification output,
/// the citizen description, and the composite location, and validate the
/// response against the three-field contract. A deterministic rule engine
/// can stand in for the remote service in tests without touching the
/// pipeline.
#[async_trait]
pub trait TriageAdapter: PluginAdapter {
    /// Assigns priority, department, and justification to a classified issue.
    async fn triage(&self, input: &TriageInput) -> Result<TriageReport, CiviqError>;
}
