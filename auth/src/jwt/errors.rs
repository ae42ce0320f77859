use thiserror::Error;

/// Error type for JWT operations.
///
/// `TokenExpired` and `InvalidToken` are kept apart so callers can tell
/// "refresh and retry" from "reject outright".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Invalid token configuration: {0}")]
    InvalidConfiguration(String),
}
