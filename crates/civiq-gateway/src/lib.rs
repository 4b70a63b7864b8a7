// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/JSON gateway for the Civiq complaint service.
//!
//! Exposes the intake pipeline and the admin query facade over a small REST
//! surface. Handlers convert the error taxonomy into JSON error bodies at
//! this outermost boundary; no failure is silently swallowed.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, AppState, ServerConfig};
