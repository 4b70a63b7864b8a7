// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the complaint API.
//!
//! Every failure is converted here, at the outermost boundary, into a JSON
//! body with an `error` field and the status code the error taxonomy
//! assigns: client input problems map to 400, unknown records to 404, and
//! downstream/storage failures to 500 (with the "analysis succeeded but not
//! saved" message kept distinguishable). Nothing is silently swallowed.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use civiq_core::{CiviqError, Complaint, ComplaintStatus, ComplaintSummary};
use civiq_intake::IntakeRequest;

use crate::server::AppState;

/// Request body for POST /analyze.
///
/// All fields default to empty so presence checks run in the pipeline (and
/// come back as 400s) instead of dying in the JSON extractor.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub email: String,
    /// Base64 image payload, optionally data-URL prefixed.
    #[serde(default)]
    pub image_base64: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub zone: String,
}

/// Response body for POST /analyze.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub complaint_id: i64,
    pub issue_type: String,
    pub confidence: f64,
    pub predicted_department: String,
    pub priority_level: i64,
    pub final_department: String,
    pub justification: String,
    pub status: ComplaintStatus,
}

/// Response body for list endpoints.
#[derive(Debug, Serialize)]
pub struct ComplaintListResponse {
    pub success: bool,
    pub count: usize,
    pub complaints: Vec<ComplaintSummary>,
}

/// Response body for the single-complaint detail endpoint.
#[derive(Debug, Serialize)]
pub struct ComplaintDetailResponse {
    pub success: bool,
    pub complaint: Complaint,
}

/// Response body for GET /api/admin/alert.
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub success: bool,
    pub alert: bool,
    pub pending_count: i64,
    pub threshold: i64,
    pub message: String,
    /// Present only when the alert is raised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complaints: Option<Vec<ComplaintSummary>>,
}

/// Query parameters for the status-update endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Response body for the status-update endpoint.
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub message: String,
    pub serial_no: i64,
    pub new_status: ComplaintStatus,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Map an error to its response, applying the taxonomy's status codes.
fn error_response(err: CiviqError) -> Response {
    let status = match &err {
        CiviqError::Validation { .. } | CiviqError::InvalidImage { .. } => StatusCode::BAD_REQUEST,
        CiviqError::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// POST /analyze
///
/// Runs the full intake pipeline and returns the triage + storage outcome.
pub async fn post_analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    let request = IntakeRequest {
        email: body.email,
        image_base64: body.image_base64,
        description: body.description,
        location: body.location,
        pincode: body.pincode,
        zone: body.zone,
    };

    match state.pipeline.intake(&request).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                success: true,
                complaint_id: outcome.serial_no,
                issue_type: outcome.issue_type,
                confidence: outcome.confidence,
                predicted_department: outcome.predicted_department,
                priority_level: outcome.priority_level,
                final_department: outcome.final_department,
                justification: outcome.justification,
                status: outcome.status,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/complaints/{key}
///
/// An all-digit key is a serial number and returns the single-complaint
/// detail (payload included); anything else is treated as a submitter email
/// and returns that submitter's summaries.
pub async fn get_complaints_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Response {
    if let Ok(serial_no) = key.parse::<i64>() {
        return match state.admin.get(serial_no).await {
            Ok(complaint) => (
                StatusCode::OK,
                Json(ComplaintDetailResponse {
                    success: true,
                    complaint,
                }),
            )
                .into_response(),
            Err(err) => error_response(err),
        };
    }

    match state.admin.list_by_email(&key).await {
        Ok(complaints) => list_response(complaints),
        Err(err) => error_response(err),
    }
}

/// GET /api/complaints/department/{department}
pub async fn get_complaints_by_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> Response {
    match state.admin.list_by_department(&department).await {
        Ok(complaints) => list_response(complaints),
        Err(err) => error_response(err),
    }
}

/// GET /api/admin/complaints
pub async fn get_all_complaints(State(state): State<AppState>) -> Response {
    match state.admin.list_all().await {
        Ok(complaints) => list_response(complaints),
        Err(err) => error_response(err),
    }
}

/// GET /api/admin/alert
///
/// Pending-threshold check. The pending summaries are attached only when
/// the alert is raised.
pub async fn get_pending_alert(State(state): State<AppState>) -> Response {
    let threshold = state.alert_threshold;
    match state.admin.pending_alert(threshold).await {
        Ok(alert) => {
            let message = if alert.should_alert {
                format!(
                    "{} complaints are pending, above the threshold of {threshold}",
                    alert.pending_count
                )
            } else {
                format!(
                    "{} complaints are pending, within the threshold of {threshold}",
                    alert.pending_count
                )
            };
            (
                StatusCode::OK,
                Json(AlertResponse {
                    success: true,
                    alert: alert.should_alert,
                    pending_count: alert.pending_count,
                    threshold,
                    message,
                    complaints: alert.should_alert.then_some(alert.complaints),
                }),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

/// PUT /api/admin/complaint/{serial_no}/status?status=X
pub async fn put_complaint_status(
    State(state): State<AppState>,
    Path(serial_no): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let Some(status) = query.status else {
        return error_response(CiviqError::Validation {
            message: "missing status query parameter".to_string(),
        });
    };

    match state.admin.set_status(serial_no, &status).await {
        Ok(new_status) => (
            StatusCode::OK,
            Json(StatusUpdateResponse {
                success: true,
                message: format!("complaint {serial_no} is now {new_status}"),
                serial_no,
                new_status,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /health
///
/// Unauthenticated liveness endpoint.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

fn list_response(complaints: Vec<ComplaintSummary>) -> Response {
    (
        StatusCode::OK,
        Json(ComplaintListResponse {
            success: true,
            count: complaints.len(),
            complaints,
        }),
    )
        .into_response()
}
