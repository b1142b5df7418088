//! Error types for the sync engine.

use thiserror::Error;

/// Errors a platform adapter can report for one submission.
///
/// Every per-task failure is expressed through this type; no transport
/// fault or remote rejection crosses the adapter boundary as a panic.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Platform credentials are missing or incomplete.
    #[error("platform not configured: {0}")]
    NotConfigured(String),

    /// Connection-level fault (DNS, TLS, refused, malformed response).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered with a non-success status.
    #[error("remote rejected the request (status {status}): {body}")]
    Rejected { status: u16, body: String },

    /// Request payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file write failed (CSV export).
    #[error("file write failed: {0}")]
    Io(#[from] std::io::Error),
}
