// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Civiq integration tests.
//!
//! Provides mock classifier/triage adapters with scripted responses and a
//! [`TestHarness`] that wires them to a temp-SQLite store exactly the way
//! the binary wires the real adapters.

pub mod harness;
pub mod mock_classifier;
pub mod mock_triage;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_classifier::MockClassifier;
pub use mock_triage::MockTriage;
