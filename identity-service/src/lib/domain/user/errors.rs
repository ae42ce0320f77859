use thiserror::Error;

/// Message shared by every rejected login, whatever the reason.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Message returned when registering an email that is already in use.
pub const EMAIL_ALREADY_REGISTERED: &str = "email already registered";

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0} (expected clinician, admin, or case_manager)")]
    Unknown(String),
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Coarse classification of [`AuthError`] for callers mapping to a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    Unauthorized,
    InvalidInput,
    InternalFailure,
    TokenExpired,
    TokenInvalid,
}

/// Top-level error for registration, login, and token validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    TokenInvalid(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn email_already_registered() -> Self {
        AuthError::Conflict(EMAIL_ALREADY_REGISTERED.to_string())
    }

    pub fn invalid_credentials() -> Self {
        AuthError::Unauthorized(INVALID_CREDENTIALS.to_string())
    }

    /// Storage failures are a subset of internal failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidUserId(_)
            | AuthError::InvalidEmail(_)
            | AuthError::InvalidRole(_)
            | AuthError::InvalidPassword(_) => ErrorKind::InvalidInput,
            AuthError::Conflict(_) => ErrorKind::Conflict,
            AuthError::Unauthorized(_) => ErrorKind::Unauthorized,
            AuthError::TokenExpired => ErrorKind::TokenExpired,
            AuthError::TokenInvalid(_) => ErrorKind::TokenInvalid,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::InternalFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_is_internal_failure() {
        let err = AuthError::Storage("connection reset".to_string());
        assert_eq!(err.kind(), ErrorKind::InternalFailure);
        assert_eq!(err.to_string(), "Storage error: connection reset");
    }

    #[test]
    fn test_value_errors_are_invalid_input() {
        let err: AuthError = RoleError::Unknown("superuser".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err: AuthError = PasswordPolicyError::TooShort { min: 8, actual: 3 }.into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_invalid_credentials_message() {
        assert_eq!(
            AuthError::invalid_credentials().to_string(),
            INVALID_CREDENTIALS
        );
    }
}
