//! Error types shared across the polqa crates.

use thiserror::Error;

/// Errors produced at the external-collaborator boundaries (LLM
/// completion, document download, text extraction).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The completion backend failed (network, auth, quota, malformed reply).
    #[error("Model error: {0}")]
    Model(String),

    /// The completion backend did not answer within the configured deadline.
    #[error("Model request timed out after {seconds}s")]
    Timeout {
        /// The deadline that was exceeded, in seconds.
        seconds: u64,
    },

    /// Downloading the source document failed.
    #[error("Download failed: {0}")]
    Download(String),

    /// Extracting text from the source document failed.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A convenience result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
