// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator-facing query and status-update facade over the complaint store.
//!
//! Thin by design: input normalization (trim/lowercase filters, status
//! parsing) and error mapping only. All record semantics live in the store.

use std::str::FromStr;
use std::sync::Arc;

use civiq_core::{
    CiviqError, Complaint, ComplaintStatus, ComplaintStore, ComplaintSummary, PendingAlert,
};

/// Read/update facade exposed to operators and submitter-facing queries.
pub struct AdminQueryService {
    store: Arc<dyn ComplaintStore>,
}

impl AdminQueryService {
    pub fn new(store: Arc<dyn ComplaintStore>) -> Self {
        Self { store }
    }

    /// A submitter's complaints, newest first. The filter is normalized the
    /// same way the pipeline normalizes emails before storage.
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<ComplaintSummary>, CiviqError> {
        self.store
            .get_by_email(&email.trim().to_lowercase())
            .await
    }

    /// Complaints for a department, newest first.
    pub async fn list_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<ComplaintSummary>, CiviqError> {
        self.store.get_by_department(department.trim()).await
    }

    /// All complaints, newest first.
    pub async fn list_all(&self) -> Result<Vec<ComplaintSummary>, CiviqError> {
        self.store.get_all().await
    }

    /// Full record for one complaint, including the image payload.
    pub async fn get(&self, serial_no: i64) -> Result<Complaint, CiviqError> {
        self.store
            .get_by_id(serial_no)
            .await?
            .ok_or_else(|| CiviqError::NotFound {
                what: format!("complaint {serial_no}"),
            })
    }

    /// Pending-threshold check.
    pub async fn pending_alert(&self, threshold: i64) -> Result<PendingAlert, CiviqError> {
        self.store.pending_alert(threshold).await
    }

    /// Parse and apply a status transition.
    ///
    /// An unparsable status is a client error; an unknown serial propagates
    /// the store's `NotFound`.
    pub async fn set_status(
        &self,
        serial_no: i64,
        status: &str,
    ) -> Result<ComplaintStatus, CiviqError> {
        let parsed =
            ComplaintStatus::from_str(status.trim()).map_err(|_| CiviqError::Validation {
                message: format!(
                    "invalid status `{status}` (expected pending, in_progress, resolved, or rejected)"
                ),
            })?;
        self.store.update_status(serial_no, parsed).await?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civiq_config::model::StorageConfig;
    use civiq_core::NewComplaint;
    use civiq_storage::SqliteComplaintStore;
    use tempfile::tempdir;

    fn make_complaint(email: &str, department: &str) -> NewComplaint {
        NewComplaint {
            submitter_email: email.to_string(),
            image_payload: "aGVsbG8=".to_string(),
            issue_type: "FallenTrees".to_string(),
            confidence: 0.6,
            department: department.to_string(),
            priority: 5,
            justification: "tree across the footpath".to_string(),
            location: "Park Ave".to_string(),
            pincode: "500003".to_string(),
            zone: "West".to_string(),
        }
    }

    async fn service_with_store(
        dir: &tempfile::TempDir,
    ) -> (AdminQueryService, Arc<SqliteComplaintStore>) {
        let store = Arc::new(SqliteComplaintStore::new(StorageConfig {
            database_path: dir.path().join("admin.db").to_str().unwrap().to_string(),
            wal_mode: true,
        }));
        store.initialize().await.unwrap();
        let service = AdminQueryService::new(Arc::clone(&store) as Arc<dyn ComplaintStore>);
        (service, store)
    }

    #[tokio::test]
    async fn list_by_email_normalizes_the_filter() {
        let dir = tempdir().unwrap();
        let (service, store) = service_with_store(&dir).await;
        store
            .insert(&make_complaint("a@b.com", "Municipal Drainage Department"))
            .await
            .unwrap();

        let complaints = service.list_by_email("  A@B.COM ").await.unwrap();
        assert_eq!(complaints.len(), 1);
    }

    #[tokio::test]
    async fn list_by_department_matches_insensitively() {
        let dir = tempdir().unwrap();
        let (service, store) = service_with_store(&dir).await;
        store
            .insert(&make_complaint("a@b.com", "Municipal Drainage Department"))
            .await
            .unwrap();

        let complaints = service
            .list_by_department(" municipal drainage department ")
            .await
            .unwrap();
        assert_eq!(complaints.len(), 1);
    }

    #[tokio::test]
    async fn get_maps_missing_record_to_not_found() {
        let dir = tempdir().unwrap();
        let (service, store) = service_with_store(&dir).await;
        let serial = store
            .insert(&make_complaint("a@b.com", "Municipal Drainage Department"))
            .await
            .unwrap();

        let complaint = service.get(serial).await.unwrap();
        assert_eq!(complaint.serial_no, serial);
        assert_eq!(complaint.image_payload, "aGVsbG8=");

        let err = service.get(serial + 10).await.unwrap_err();
        assert!(matches!(err, CiviqError::NotFound { .. }));
    }

    #[tokio::test]
    async fn set_status_parses_and_applies() {
        let dir = tempdir().unwrap();
        let (service, store) = service_with_store(&dir).await;
        let serial = store
            .insert(&make_complaint("a@b.com", "Municipal Drainage Department"))
            .await
            .unwrap();

        let applied = service.set_status(serial, "in_progress").await.unwrap();
        assert_eq!(applied, ComplaintStatus::InProgress);
        assert_eq!(
            store.get_by_id(serial).await.unwrap().unwrap().status,
            ComplaintStatus::InProgress
        );
    }

    #[tokio::test]
    async fn set_status_rejects_unknown_values_without_touching_the_store() {
        let dir = tempdir().unwrap();
        let (service, store) = service_with_store(&dir).await;
        let serial = store
            .insert(&make_complaint("a@b.com", "Municipal Drainage Department"))
            .await
            .unwrap();

        let err = service.set_status(serial, "escalated").await.unwrap_err();
        assert!(matches!(err, CiviqError::Validation { .. }));
        assert_eq!(
            store.get_by_id(serial).await.unwrap().unwrap().status,
            ComplaintStatus::Pending
        );
    }

    #[tokio::test]
    async fn set_status_propagates_not_found() {
        let dir = tempdir().unwrap();
        let (service, _store) = service_with_store(&dir).await;

        let err = service.set_status(99, "resolved").await.unwrap_err();
        assert!(matches!(err, CiviqError::NotFound { .. }));
    }
}
