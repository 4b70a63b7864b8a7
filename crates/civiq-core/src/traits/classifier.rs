// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classifier adapter trait for the external image-classification service.

use async_trait::async_trait;

use crate::error::CiviqError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Classification, TransportImage};

/// Adapter for the remote image-classification capability.
///
/// Implementations invoke a prediction endpoint with a bounded timeout and
/// normalize its response: a missing category becomes the `"Unknown"`
/// sentinel, a missing confidence becomes `0.0`. Transport failures surface
/// as typed errors and are never retried here -- retry policy belongs to the
/// caller.
#[async_trait]
pub trait ClassifierAdapter: PluginAdapter {
    /// Classifies the depicted issue, returning a label and a confidence.
    async fn classify(&self, image: &TransportImage) -> Result<Classification, CiviqError>;
}
