//! Error type shared by the hashing and codec functions

use thiserror::Error;

/// Errors that can occur while hashing or decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// Caller-supplied data cannot be interpreted (odd-length hex, bad digits,
    /// oversized Merkle input). Recoverable: reject the input.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// The digest primitive misbehaved. Not a data problem, never retried.
    #[error("{algorithm} primitive failure: {reason}")]
    PrimitiveFailure {
        algorithm: &'static str,
        reason: String,
    },
}

impl HashError {
    pub fn is_primitive_failure(&self) -> bool {
        matches!(self, HashError::PrimitiveFailure { .. })
    }
}
