//! Error types for token operations

/// Errors while building or signing a clear-and-add token
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Canonical payload serialization failed
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Keyed-hash initialization rejected the key
    #[error("mac init failed: {0}")]
    Mac(String),
}
