use thiserror::Error;

/// Error type for token operations.
///
/// Decoding failures deliberately collapse into a single variant: callers
/// cannot tell an expired token from a tampered or malformed one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    InvalidToken,
}
