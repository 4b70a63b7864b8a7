// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ComplaintStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use civiq_config::model::StorageConfig;
use civiq_core::types::{
    Complaint, ComplaintStatus, ComplaintSummary, NewComplaint, PendingAlert,
};
use civiq_core::{AdapterType, CiviqError, ComplaintStore, HealthStatus, PluginAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed complaint store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query module. The database is lazily initialized on the first call
/// to [`ComplaintStore::initialize`].
pub struct SqliteComplaintStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteComplaintStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not
    /// initialized.
    fn db(&self) -> Result<&Database, CiviqError> {
        self.db.get().ok_or_else(|| CiviqError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteComplaintStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, CiviqError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), tokio_rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CiviqError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl ComplaintStore for SqliteComplaintStore {
    async fn initialize(&self) -> Result<(), CiviqError> {
        let db =
            Database::open_with_options(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| CiviqError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite complaint store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), CiviqError> {
        self.db()?.close().await
    }

    async fn insert(&self, complaint: &NewComplaint) -> Result<i64, CiviqError> {
        queries::complaints::insert(self.db()?, complaint).await
    }

    async fn get_by_id(&self, serial_no: i64) -> Result<Option<Complaint>, CiviqError> {
        queries::complaints::get_by_id(self.db()?, serial_no).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Vec<ComplaintSummary>, CiviqError> {
        queries::complaints::get_by_email(self.db()?, email).await
    }

    async fn get_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<ComplaintSummary>, CiviqError> {
        queries::complaints::get_by_department(self.db()?, department).await
    }

    async fn get_all(&self) -> Result<Vec<ComplaintSummary>, CiviqError> {
        queries::complaints::get_all(self.db()?).await
    }

    async fn update_status(
        &self,
        serial_no: i64,
        status: ComplaintStatus,
    ) -> Result<(), CiviqError> {
        queries::complaints::update_status(self.db()?, serial_no, status).await
    }

    async fn pending_alert(&self, threshold: i64) -> Result<PendingAlert, CiviqError> {
        queries::complaints::pending_alert(self.db()?, threshold).await
    }
}
