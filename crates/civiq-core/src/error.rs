// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Civiq complaint service.

use thiserror::Error;

/// The primary error type used across all Civiq adapter traits and the
/// intake pipeline.
///
/// Variants map one-to-one onto the pipeline's failure taxonomy: client
/// input problems (`Validation`, `InvalidImage`), downstream service
/// failures (`Classifier*`, `Triage*`), persistence failures (`Storage`,
/// `AnalysisNotPersisted`), and lookup misses (`NotFound`).
#[derive(Debug, Error)]
pub enum CiviqError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Client-supplied input is missing or malformed.
    #[error("invalid request: {message}")]
    Validation { message: String },

    /// The submitted image payload could not be decoded into a raster image.
    #[error("invalid image payload: {source}")]
    InvalidImage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The image-classification service failed or returned an unusable response.
    #[error("classifier unavailable: {message}")]
    ClassifierUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The image-classification call exceeded its bounded timeout.
    #[error("classifier timed out after {duration:?}")]
    ClassifierTimeout { duration: std::time::Duration },

    /// The triage service failed at the transport or service level.
    #[error("triage service unavailable: {message}")]
    TriageUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The triage service answered, but not with the contracted structure.
    #[error("triage response malformed: {message}")]
    TriageMalformed { message: String },

    /// Storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Classification and triage both succeeded but the record could not be
    /// persisted. Kept distinct from [`CiviqError::Storage`] so callers can
    /// tell a lost analysis apart from an earlier-stage failure.
    #[error("analysis succeeded but the complaint was not saved: {source}")]
    AnalysisNotPersisted { source: Box<CiviqError> },

    /// The requested record does not exist.
    #[error("{what} not found")]
    NotFound { what: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn civiq_error_has_all_variants() {
        // Verify all 11 error variants exist and can be constructed.
        let _config = CiviqError::Config("test".into());
        let _validation = CiviqError::Validation {
            message: "missing email".into(),
        };
        let _image = CiviqError::InvalidImage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _cls_down = CiviqError::ClassifierUnavailable {
            message: "test".into(),
            source: None,
        };
        let _cls_timeout = CiviqError::ClassifierTimeout {
            duration: std::time::Duration::from_secs(60),
        };
        let _triage_down = CiviqError::TriageUnavailable {
            message: "test".into(),
            source: None,
        };
        let _triage_bad = CiviqError::TriageMalformed {
            message: "test".into(),
        };
        let _storage = CiviqError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _not_persisted = CiviqError::AnalysisNotPersisted {
            source: Box::new(CiviqError::Storage {
                source: Box::new(std::io::Error::other("disk full")),
            }),
        };
        let _not_found = CiviqError::NotFound {
            what: "complaint 42".into(),
        };
        let _internal = CiviqError::Internal("test".into());
    }

    #[test]
    fn analysis_not_persisted_message_is_distinguishable() {
        let err = CiviqError::AnalysisNotPersisted {
            source: Box::new(CiviqError::Storage {
                source: Box::new(std::io::Error::other("disk full")),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("analysis succeeded"), "got: {msg}");
        assert!(msg.contains("not saved"), "got: {msg}");
    }

    #[test]
    fn not_found_names_the_record() {
        let err = CiviqError::NotFound {
            what: "complaint 7".into(),
        };
        assert_eq!(err.to_string(), "complaint 7 not found");
    }
}
