use async_trait::async_trait;
use auth::AccessClaims;
use auth::JwtError;
use auth::PasswordError;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::RegisteredUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;

/// Port for authentication operations exposed to callers.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated email, password, and role
    ///
    /// # Returns
    /// Public fields of the created user (never the password hash)
    ///
    /// # Errors
    /// * `Conflict` - Email is already registered
    /// * `Storage` - Lookup or persistence failed
    /// * `Internal` - Password hashing failed
    async fn register(&self, command: RegisterCommand) -> Result<RegisteredUser, AuthError>;

    /// Verify credentials and issue an access + refresh token pair.
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown email, wrong password, or failed lookup; always the same message
    /// * `Internal` - Stored hash unreadable or token signing failed
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Validate an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `TokenInvalid` - Signature, structure, or token type is wrong
    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AuthError>;
}

/// Persistence operations for the user aggregate.
///
/// Implementations must enforce email uniqueness among non-deleted users atomically:
/// of two concurrent `create` calls with the same email, exactly one succeeds.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `Conflict` - Email is already held by a non-deleted user
    /// * `Storage` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve a non-deleted user by email, case-insensitively.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;
}

/// One-way password hashing.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash with a fresh salt; two calls never return the same string.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// `Ok(false)` on mismatch; `Err` only for hashes this hasher cannot read.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;

    /// Whether a stored hash predates the current cost parameters.
    fn needs_rehash(&self, _hash: &str) -> bool {
        false
    }
}

/// Signs and validates session tokens.
pub trait SessionTokenIssuer: Send + Sync + 'static {
    /// Mint both tokens from one clock reading, so access expiry precedes refresh expiry.
    fn issue_pair(
        &self,
        subject: &UserId,
        email: &EmailAddress,
        role: Role,
    ) -> Result<TokenPair, JwtError>;

    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, JwtError>;
}
