// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intake orchestration and admin facade for the Civiq complaint service.
//!
//! [`pipeline::IntakePipeline`] sequences one report submission end to end;
//! [`admin::AdminQueryService`] is the thin read/update layer operators use
//! over the persisted records.

pub mod admin;
pub mod pipeline;

pub use admin::AdminQueryService;
pub use pipeline::{IntakeOutcome, IntakePipeline, IntakeRequest};
