// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Civiq service.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle state of a complaint record.
///
/// `pending` is set by the store at insert; every later state is reached
/// only through the explicit status-update operation. There are no automatic
/// transitions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

/// Identifies the type of adapter in the service wiring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Classifier,
    Triage,
    Storage,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// A decoded image re-packaged for transport to the classification service.
///
/// Carries the submitted bytes verbatim (no re-encoding, so classification
/// sees full fidelity) plus the MIME type detected during decoding.
#[derive(Debug, Clone)]
pub struct TransportImage {
    /// Raw encoded image bytes (PNG/JPEG/WebP as submitted).
    pub data: Vec<u8>,
    /// MIME type detected from the image container, e.g. `image/png`.
    pub mime_type: String,
}

/// Result of a classification call: an issue-type label and a confidence.
///
/// `label` may be the sentinel `"Unknown"` when the service response carried
/// no category; consumers must tolerate that value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    /// Confidence in `[0, 1]`. Defaults to `0.0` when the service omits it.
    pub confidence: f64,
}

/// Inputs to a triage call, assembled by the intake pipeline.
#[derive(Debug, Clone)]
pub struct TriageInput {
    /// Issue-type label from classification (possibly `"Unknown"`).
    pub issue_type: String,
    /// Classification confidence.
    pub confidence: f64,
    /// Citizen free-text description (may be empty).
    pub description: String,
    /// Composite location string: `"<location>, <zone>, <pincode>"`.
    pub location: String,
}

/// Structured result contracted from the triage service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageReport {
    /// Priority from 1-10, 10 most urgent.
    pub priority: i64,
    /// Responsible department as named by the service. May be empty, in
    /// which case the deterministic fallback department wins.
    pub department: String,
    /// Short free-text explanation of the decision.
    pub justification: String,
}

/// The durable unit of record: one submitted civic issue and its triage
/// outcome. Immutable after insert except for `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    /// Store-assigned identifier, unique and strictly increasing.
    pub serial_no: i64,
    /// Submitter email, lowercased and trimmed at the pipeline boundary.
    pub submitter_email: String,
    /// The base64 payload exactly as submitted, kept for audit/replay.
    pub image_payload: String,
    pub issue_type: String,
    pub confidence: f64,
    pub department: String,
    pub priority: i64,
    pub justification: String,
    pub status: ComplaintStatus,
    /// Sortable UTC text timestamp, set once by the store at insert.
    pub created_at: String,
    pub location: String,
    pub pincode: String,
    pub zone: String,
}

/// A complaint without its image payload, used by all list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintSummary {
    pub serial_no: i64,
    pub submitter_email: String,
    pub issue_type: String,
    pub confidence: f64,
    pub department: String,
    pub priority: i64,
    pub justification: String,
    pub status: ComplaintStatus,
    pub created_at: String,
    pub location: String,
    pub pincode: String,
    pub zone: String,
}

/// Fields supplied by the intake pipeline for a new complaint record.
///
/// `serial_no`, `status`, and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub submitter_email: String,
    pub image_payload: String,
    pub issue_type: String,
    pub confidence: f64,
    pub department: String,
    pub priority: i64,
    pub justification: String,
    pub location: String,
    pub pincode: String,
    pub zone: String,
}

/// Result of the pending-threshold alert query.
#[derive(Debug, Clone, Serialize)]
pub struct PendingAlert {
    /// True when `pending_count` strictly exceeds the threshold.
    pub should_alert: bool,
    pub pending_count: i64,
    /// All pending complaint summaries, returned regardless of the flag.
    pub complaints: Vec<ComplaintSummary>,
}
