// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration test harness: temp SQLite store, mock adapters, and the
//! intake pipeline wired the way the binary wires them.
//!
//! Each harness is fully isolated (its database lives in its own temp
//! directory), so tests are independent and order-insensitive.

use std::sync::Arc;

use tempfile::TempDir;

use civiq_config::model::StorageConfig;
use civiq_core::{Classification, CiviqError, ComplaintStore, TriageReport};
use civiq_intake::{AdminQueryService, IntakePipeline};
use civiq_storage::SqliteComplaintStore;

use crate::mock_classifier::MockClassifier;
use crate::mock_triage::MockTriage;

/// A fully wired, isolated instance of the intake stack.
pub struct TestHarness {
    pub store: Arc<SqliteComplaintStore>,
    pub classifier: Arc<MockClassifier>,
    pub triage: Arc<MockTriage>,
    pub pipeline: Arc<IntakePipeline>,
    pub admin: Arc<AdminQueryService>,
    _dir: TempDir,
}

impl TestHarness {
    /// Start building a harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }
}

/// Builder for [`TestHarness`].
#[derive(Default)]
pub struct TestHarnessBuilder {
    classifications: Vec<Classification>,
    reports: Vec<TriageReport>,
}

impl TestHarnessBuilder {
    /// Queue classification results for the mock classifier.
    pub fn with_classifications(mut self, classifications: Vec<Classification>) -> Self {
        self.classifications = classifications;
        self
    }

    /// Queue triage reports for the mock triage adapter.
    pub fn with_reports(mut self, reports: Vec<TriageReport>) -> Self {
        self.reports = reports;
        self
    }

    /// Build and initialize the harness.
    pub async fn build(self) -> Result<TestHarness, CiviqError> {
        let dir = TempDir::new().map_err(|e| CiviqError::Storage {
            source: Box::new(e),
        })?;
        let db_path = dir.path().join("harness.db");

        let store = Arc::new(SqliteComplaintStore::new(StorageConfig {
            database_path: db_path.to_str().unwrap_or("harness.db").to_string(),
            wal_mode: true,
        }));
        store.initialize().await?;

        let classifier = Arc::new(MockClassifier::with_results(self.classifications));
        let triage = Arc::new(MockTriage::with_reports(self.reports));

        let pipeline = Arc::new(IntakePipeline::new(
            Arc::clone(&classifier) as Arc<dyn civiq_core::ClassifierAdapter>,
            Arc::clone(&triage) as Arc<dyn civiq_core::TriageAdapter>,
            Arc::clone(&store) as Arc<dyn ComplaintStore>,
        ));
        let admin = Arc::new(AdminQueryService::new(
            Arc::clone(&store) as Arc<dyn ComplaintStore>
        ));

        Ok(TestHarness {
            store,
            classifier,
            triage,
            pipeline,
            admin,
            _dir: dir,
        })
    }
}
