// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for the durable complaint record store.

use async_trait::async_trait;

use crate::error::CiviqError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{
    Complaint, ComplaintStatus, ComplaintSummary, NewComplaint, PendingAlert,
};

/// Adapter for the durable complaint store.
///
/// Every operation is atomic with respect to the record set. Implementations
/// must serialize writes so serial numbers stay unique and strictly
/// increasing under concurrent inserts, and a reader must never observe a
/// partially written row.
#[async_trait]
pub trait ComplaintStore: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), CiviqError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), CiviqError>;

    /// Persists a new complaint with `status = pending` and a fresh
    /// `created_at`, returning the assigned serial number. Re-checks
    /// required fields as a last line of defense.
    async fn insert(&self, complaint: &NewComplaint) -> Result<i64, CiviqError>;

    /// Full record including the image payload, or `None` if no such id.
    async fn get_by_id(&self, serial_no: i64) -> Result<Option<Complaint>, CiviqError>;

    /// A submitter's complaints, newest first.
    async fn get_by_email(&self, email: &str) -> Result<Vec<ComplaintSummary>, CiviqError>;

    /// Complaints for a department, matched case- and trim-insensitively,
    /// newest first.
    async fn get_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<ComplaintSummary>, CiviqError>;

    /// All complaints, newest first.
    async fn get_all(&self) -> Result<Vec<ComplaintSummary>, CiviqError>;

    /// Updates the status of an existing complaint in place, leaving every
    /// other field untouched. Fails with `NotFound` for unknown serials.
    async fn update_status(
        &self,
        serial_no: i64,
        status: ComplaintStatus,
    ) -> Result<(), CiviqError>;

    /// Counts pending complaints and flags whether the count strictly
    /// exceeds the threshold. The pending summaries are returned either way.
    async fn pending_alert(&self, threshold: i64) -> Result<PendingAlert, CiviqError>;
}
