use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::JwtError;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::RegisteredUser;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::CredentialHasher;
use crate::user::ports::SessionTokenIssuer;
use crate::user::ports::UserRepository;

/// Domain service coordinating registration and login.
///
/// Holds no mutable state; safe to share across any number of request tasks.
/// Email uniqueness is guaranteed by the repository, the lookup before insert
/// only short-circuits the common case.
pub struct AuthService<UR, CH, TI>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TI: SessionTokenIssuer,
{
    repository: Arc<UR>,
    hasher: Arc<CH>,
    token_issuer: Arc<TI>,
}

impl<UR, CH, TI> AuthService<UR, CH, TI>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TI: SessionTokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `hasher` - Password hashing implementation
    /// * `token_issuer` - Session token signing implementation
    pub fn new(repository: Arc<UR>, hasher: Arc<CH>, token_issuer: Arc<TI>) -> Self {
        Self {
            repository,
            hasher,
            token_issuer,
        }
    }

    /// Run one Argon2 evaluation with the current cost and discard it, so a login
    /// without a stored hash takes as long as a password mismatch.
    fn spend_verification_cost(&self, password: &str) {
        if let Err(e) = self.hasher.hash(password) {
            tracing::warn!(error = %e, "Hashing failed while rejecting login");
        }
    }
}

#[async_trait]
impl<UR, CH, TI> AuthServicePort for AuthService<UR, CH, TI>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TI: SessionTokenIssuer,
{
    async fn register(&self, command: RegisterCommand) -> Result<RegisteredUser, AuthError> {
        // A failed lookup is not "absent": surface it instead of racing into an insert
        let existing = self
            .repository
            .find_by_email(&command.email)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Email lookup failed during registration");
                e
            })?;

        if existing.is_some() {
            tracing::info!("Registration rejected: email already registered");
            return Err(AuthError::email_already_registered());
        }

        let password_hash = self
            .hasher
            .hash(command.password.expose())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User::new(command.email, password_hash, command.role);

        let created_user = self.repository.create(user).await.map_err(|e| {
            match &e {
                AuthError::Conflict(_) => {
                    tracing::info!("Registration lost a race on email uniqueness")
                }
                _ => tracing::error!(error = %e, "Failed to persist user"),
            }
            e
        })?;

        tracing::info!(
            user_id = %created_user.id,
            role = %created_user.role,
            "User registered"
        );

        Ok(RegisteredUser::from(&created_user))
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        let Ok(email) = EmailAddress::new(&command.email) else {
            self.spend_verification_cost(&command.password);
            return Err(AuthError::invalid_credentials());
        };

        let user = match self.repository.find_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::debug!("Login rejected: no such user");
                self.spend_verification_cost(&command.password);
                return Err(AuthError::invalid_credentials());
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed during login");
                self.spend_verification_cost(&command.password);
                return Err(AuthError::invalid_credentials());
            }
        };

        let is_valid = self
            .hasher
            .verify(&command.password, &user.password_hash)
            .map_err(|e| {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    "Stored password hash is unreadable"
                );
                AuthError::Internal(format!("Password verification failed: {}", e))
            })?;

        if !is_valid {
            tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::invalid_credentials());
        }

        if self.hasher.needs_rehash(&user.password_hash) {
            tracing::warn!(user_id = %user.id, "Password hash uses outdated cost parameters");
        }

        let pair = self
            .token_issuer
            .issue_pair(&user.id, &user.email, user.role)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(pair)
    }

    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        self.token_issuer
            .validate_access_token(token)
            .map_err(|e| match e {
                JwtError::TokenExpired => AuthError::TokenExpired,
                JwtError::InvalidToken(reason) => AuthError::TokenInvalid(reason),
                other => AuthError::Internal(other.to_string()),
            })
    }
}
