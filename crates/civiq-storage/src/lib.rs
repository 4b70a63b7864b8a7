// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Civiq complaint service.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite` (which is what keeps
//! serial numbers unique and strictly increasing under concurrent inserts),
//! and typed CRUD operations for complaint records.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteComplaintStore;
pub use database::Database;
pub use models::*;
