// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The complaint intake pipeline.
//!
//! Orchestrates the sequential steps of one report submission: boundary
//! validation, image decoding, classification, fallback department
//! resolution, triage, and atomic persistence. Every step short-circuits
//! the remainder; a partial record is never persisted. The only write
//! happens after both external calls have succeeded, so a storage failure
//! at that point is surfaced as the distinct "analysis succeeded but not
//! persisted" state rather than a generic failure.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use civiq_core::{
    resolve_department, CiviqError, ClassifierAdapter, ComplaintStatus, ComplaintStore,
    NewComplaint, TriageAdapter, TriageInput,
};

/// One inbound report, as accepted at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct IntakeRequest {
    pub email: String,
    /// Base64 image payload, optionally data-URL prefixed.
    pub image_base64: String,
    /// Citizen free-text description; may be empty.
    pub description: String,
    pub location: String,
    pub pincode: String,
    pub zone: String,
}

/// The full triage + storage outcome of a successful intake.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeOutcome {
    pub serial_no: i64,
    pub issue_type: String,
    pub confidence: f64,
    /// The deterministic fallback department derived from the label.
    pub predicted_department: String,
    pub priority_level: i64,
    /// Triage's department when non-empty, otherwise the fallback.
    pub final_department: String,
    pub justification: String,
    pub status: ComplaintStatus,
}

/// Orchestrator for one report submission.
///
/// Collaborators are injected as trait objects so the external services can
/// be swapped for deterministic fakes without touching the sequencing.
/// Executions are independent; concurrent submissions share nothing but the
/// store.
pub struct IntakePipeline {
    classifier: Arc<dyn ClassifierAdapter>,
    triage: Arc<dyn TriageAdapter>,
    store: Arc<dyn ComplaintStore>,
}

impl IntakePipeline {
    pub fn new(
        classifier: Arc<dyn ClassifierAdapter>,
        triage: Arc<dyn TriageAdapter>,
        store: Arc<dyn ComplaintStore>,
    ) -> Self {
        Self {
            classifier,
            triage,
            store,
        }
    }

    /// Run the full intake sequence for one request.
    ///
    /// Field presence is checked in a fixed order -- email, image, then the
    /// location/pincode/zone trio -- and the first missing class aborts with
    /// `Validation`. The original undecoded payload is what gets persisted.
    pub async fn intake(&self, request: &IntakeRequest) -> Result<IntakeOutcome, CiviqError> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(CiviqError::Validation {
                message: "missing email".to_string(),
            });
        }
        if request.image_base64.trim().is_empty() {
            return Err(CiviqError::Validation {
                message: "missing image payload".to_string(),
            });
        }
        if request.location.trim().is_empty()
            || request.pincode.trim().is_empty()
            || request.zone.trim().is_empty()
        {
            return Err(CiviqError::Validation {
                message: "missing location, pincode, or zone".to_string(),
            });
        }

        let decoded = civiq_imaging::decode(&request.image_base64)?;
        let classification = self.classifier.classify(&decoded.into_transport()).await?;

        let predicted_department = resolve_department(&classification.label).to_string();

        let report = self
            .triage
            .triage(&TriageInput {
                issue_type: classification.label.clone(),
                confidence: classification.confidence,
                description: request.description.clone(),
                location: format!(
                    "{}, {}, {}",
                    request.location, request.zone, request.pincode
                ),
            })
            .await?;

        let final_department = if report.department.trim().is_empty() {
            predicted_department.clone()
        } else {
            report.department.clone()
        };

        let serial_no = self
            .store
            .insert(&NewComplaint {
                submitter_email: email.clone(),
                image_payload: request.image_base64.clone(),
                issue_type: classification.label.clone(),
                confidence: classification.confidence,
                department: final_department.clone(),
                priority: report.priority,
                justification: report.justification.clone(),
                location: request.location.clone(),
                pincode: request.pincode.clone(),
                zone: request.zone.clone(),
            })
            .await
            .map_err(|e| {
                warn!(email = %email, "analysis completed but insert failed");
                CiviqError::AnalysisNotPersisted {
                    source: Box::new(e),
                }
            })?;

        info!(
            serial_no,
            issue_type = %classification.label,
            priority = report.priority,
            department = %final_department,
            "complaint persisted"
        );

        Ok(IntakeOutcome {
            serial_no,
            issue_type: classification.label,
            confidence: classification.confidence,
            predicted_department,
            priority_level: report.priority,
            final_department,
            justification: report.justification,
            status: ComplaintStatus::Pending,
        })
    }
}
