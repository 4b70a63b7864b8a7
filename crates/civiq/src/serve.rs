// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server wiring: construct adapters from config, run the gateway, and
//! shut the store down cleanly on ctrl-c.

use std::sync::Arc;

use tracing::info;

use civiq_classifier::HttpClassifier;
use civiq_config::CiviqConfig;
use civiq_core::{
    CiviqError, ClassifierAdapter, ComplaintStore, PluginAdapter, TriageAdapter,
};
use civiq_gateway::{AppState, ServerConfig};
use civiq_gemini::GeminiTriage;
use civiq_intake::{AdminQueryService, IntakePipeline};
use civiq_storage::SqliteComplaintStore;

/// Construct all adapters, wire the pipeline, and serve until interrupted.
pub async fn run(config: CiviqConfig) -> Result<(), CiviqError> {
    let classifier: Arc<dyn ClassifierAdapter> =
        Arc::new(HttpClassifier::new(&config.classifier)?);
    let triage: Arc<dyn TriageAdapter> = Arc::new(GeminiTriage::new(&config.gemini)?);

    let store = Arc::new(SqliteComplaintStore::new(config.storage.clone()));
    store.initialize().await?;
    info!(path = %config.storage.database_path, "complaint store ready");

    let pipeline = Arc::new(IntakePipeline::new(
        classifier,
        triage,
        Arc::clone(&store) as Arc<dyn ComplaintStore>,
    ));
    let admin = Arc::new(AdminQueryService::new(
        Arc::clone(&store) as Arc<dyn ComplaintStore>
    ));

    let state = AppState {
        pipeline,
        admin,
        alert_threshold: config.admin.alert_threshold,
        start_time: std::time::Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    tokio::select! {
        result = civiq_gateway::start_server(&server_config, state) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            store.shutdown().await?;
            Ok(())
        }
    }
}
