//! Error types for the panos-rs client

use std::time::Duration;

use thiserror::Error;

/// Core error type for PAN-OS API operations.
///
/// Timestamp-parse failures are deliberately not represented here: a
/// malformed expiry string on one entry leaves that entry's derived field
/// unset instead of failing the whole operation.
#[derive(Error, Debug)]
pub enum PanosError {
    /// Network or session failure, propagated verbatim
    #[error("transport error: {0}")]
    Transport(String),

    /// Malformed XML in a device reply; keeps the raw payload for diagnostics
    #[error("failed to decode response: {source}; body: {body}")]
    Deserialize {
        #[source]
        source: quick_xml::DeError,
        body: String,
    },

    /// Well-formed XML with semantically unexpected content
    #[error("unexpected response: {0}")]
    Protocol(String),

    /// A device job reached the failed terminal state
    #[error("job {id} failed: {reason}")]
    JobFailed { id: String, reason: String },

    /// A device job did not reach a terminal state before the deadline
    #[error("job {id} still running after {timeout:?}")]
    JobTimeout { id: String, timeout: Duration },

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for PAN-OS API operations
pub type Result<T> = std::result::Result<T, PanosError>;
