use chrono::Duration;
use chrono::Utc;

use crate::jwt::AccessClaims;
use crate::jwt::Expiring;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshClaims;
use crate::jwt::TokenType;

/// Signed access + refresh tokens minted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and validates access and refresh tokens.
///
/// Stateless: tokens are self-contained and bearer-valid until expiry.
#[derive(Clone)]
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    access_ttl: Duration,
    refresh_ttl: Duration,
    leeway: Duration,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing key
    /// * `access_ttl` - Lifetime of access tokens
    /// * `refresh_ttl` - Lifetime of refresh tokens, must exceed `access_ttl`
    ///
    /// # Errors
    /// * `InvalidConfiguration` - A lifetime is not positive, or access outlives refresh
    pub fn new(
        secret: &[u8],
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Result<Self, JwtError> {
        if access_ttl <= Duration::zero() || refresh_ttl <= Duration::zero() {
            return Err(JwtError::InvalidConfiguration(
                "token lifetimes must be positive".to_string(),
            ));
        }
        if access_ttl >= refresh_ttl {
            return Err(JwtError::InvalidConfiguration(format!(
                "access token lifetime ({}s) must be shorter than refresh token lifetime ({}s)",
                access_ttl.num_seconds(),
                refresh_ttl.num_seconds()
            )));
        }

        Ok(Self {
            jwt_handler: JwtHandler::new(secret),
            access_ttl,
            refresh_ttl,
            leeway: Duration::zero(),
        })
    }

    /// Tolerate clock skew when checking expiry.
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn issue_access_token(
        &self,
        subject: impl ToString,
        email: &str,
        role: &str,
    ) -> Result<String, JwtError> {
        self.issue_access_token_at(subject, email, role, Utc::now().timestamp())
    }

    pub fn issue_access_token_at(
        &self,
        subject: impl ToString,
        email: &str,
        role: &str,
        now: i64,
    ) -> Result<String, JwtError> {
        let claims = AccessClaims::new(
            subject,
            email,
            role,
            now,
            now + self.access_ttl.num_seconds(),
        );
        self.jwt_handler.encode(&claims)
    }

    pub fn issue_refresh_token(&self, subject: impl ToString) -> Result<String, JwtError> {
        self.issue_refresh_token_at(subject, Utc::now().timestamp())
    }

    pub fn issue_refresh_token_at(
        &self,
        subject: impl ToString,
        now: i64,
    ) -> Result<String, JwtError> {
        let claims = RefreshClaims::new(subject, now, now + self.refresh_ttl.num_seconds());
        self.jwt_handler.encode(&claims)
    }

    /// Issue both tokens from a single clock reading so the access token
    /// always expires before the refresh token.
    pub fn issue_pair(
        &self,
        subject: impl ToString,
        email: &str,
        role: &str,
    ) -> Result<TokenPair, JwtError> {
        let now = Utc::now().timestamp();
        let subject = subject.to_string();

        Ok(TokenPair {
            access_token: self.issue_access_token_at(&subject, email, role, now)?,
            refresh_token: self.issue_refresh_token_at(&subject, now)?,
        })
    }

    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.validate_access_token_at(token, Utc::now().timestamp())
    }

    /// Validate an access token against an explicit server time.
    ///
    /// # Errors
    /// * `TokenExpired` - `now` is at or past expiry (plus leeway)
    /// * `InvalidToken` - Bad signature, malformed token, or not an access token
    pub fn validate_access_token_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<AccessClaims, JwtError> {
        let claims: AccessClaims = self.jwt_handler.decode(token)?;
        self.check(claims.typ, TokenType::Access)?;
        self.check_lifetime(&claims, now)?;
        Ok(claims)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        self.validate_refresh_token_at(token, Utc::now().timestamp())
    }

    /// Validate a refresh token against an explicit server time.
    pub fn validate_refresh_token_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<RefreshClaims, JwtError> {
        let claims: RefreshClaims = self.jwt_handler.decode(token)?;
        self.check(claims.typ, TokenType::Refresh)?;
        self.check_lifetime(&claims, now)?;
        Ok(claims)
    }

    fn check(&self, actual: TokenType, expected: TokenType) -> Result<(), JwtError> {
        if actual != expected {
            return Err(JwtError::InvalidToken(format!(
                "expected {:?} token, got {:?}",
                expected, actual
            )));
        }
        Ok(())
    }

    fn check_lifetime(&self, claims: &impl Expiring, now: i64) -> Result<(), JwtError> {
        if claims.is_expired(now, self.leeway.num_seconds()) {
            return Err(JwtError::TokenExpired);
        }
        Ok(())
    }
}
