// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the Civiq service wiring.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility. External-service
//! clients are constructed explicitly and injected as trait objects, never
//! held as module-level singletons.

pub mod adapter;
pub mod classifier;
pub mod store;
pub mod triage;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use classifier::ClassifierAdapter;
pub use store::ComplaintStore;
pub use triage::TriageAdapter;
