use serde::Deserialize;
use serde::Serialize;

/// Distinguishes the two token kinds so one cannot stand in for the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by a short-lived access token.
///
/// Timestamps are absolute Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    pub typ: TokenType,
}

impl AccessClaims {
    pub fn new(
        subject: impl ToString,
        email: impl ToString,
        role: impl ToString,
        issued_at: i64,
        expires_at: i64,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: issued_at,
            exp: expires_at,
            typ: TokenType::Access,
        }
    }
}

/// Claims carried by a long-lived refresh token. Deliberately minimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub typ: TokenType,
}

impl RefreshClaims {
    pub fn new(subject: impl ToString, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: expires_at,
            typ: TokenType::Refresh,
        }
    }
}

/// Expiry check shared by both claim kinds.
pub trait Expiring {
    fn expires_at(&self) -> i64;

    /// A token is expired once `now` reaches `exp + leeway_seconds`.
    fn is_expired(&self, now: i64, leeway_seconds: i64) -> bool {
        now >= self.expires_at().saturating_add(leeway_seconds)
    }
}

impl Expiring for AccessClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}

impl Expiring for RefreshClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}
