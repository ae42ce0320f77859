use auth::AccessClaims;
use auth::JwtError;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenIssuer;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::UserId;
use crate::user::ports::CredentialHasher;
use crate::user::ports::SessionTokenIssuer;

impl CredentialHasher for PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        PasswordHasher::hash(self, password)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        PasswordHasher::verify(self, password, hash)
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        PasswordHasher::needs_rehash(self, hash)
    }
}

impl SessionTokenIssuer for TokenIssuer {
    fn issue_pair(
        &self,
        subject: &UserId,
        email: &EmailAddress,
        role: Role,
    ) -> Result<TokenPair, JwtError> {
        TokenIssuer::issue_pair(self, subject, email.as_str(), role.as_str())
    }

    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        TokenIssuer::validate_access_token(self, token)
    }
}

#[cfg(test)]
mod tests {
    use auth::HashingParams;
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_token_issuer_adapter_embeds_domain_values() {
        let issuer = TokenIssuer::new(
            b"test_secret_key_at_least_32_bytes!",
            Duration::minutes(15),
            Duration::days(7),
        )
        .unwrap();
        let user_id = UserId::new();
        let email = EmailAddress::new("a@x.com").unwrap();

        let pair =
            SessionTokenIssuer::issue_pair(&issuer, &user_id, &email, Role::CaseManager).unwrap();
        let claims =
            SessionTokenIssuer::validate_access_token(&issuer, &pair.access_token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "case_manager");
    }

    #[test]
    fn test_token_issuer_adapter_issues_pair_from_one_clock_reading() {
        let issuer = TokenIssuer::new(
            b"test_secret_key_at_least_32_bytes!",
            Duration::minutes(15),
            Duration::days(7),
        )
        .unwrap();
        let user_id = UserId::new();
        let email = EmailAddress::new("a@x.com").unwrap();

        let pair = SessionTokenIssuer::issue_pair(&issuer, &user_id, &email, Role::Admin).unwrap();
        let access = issuer.validate_access_token(&pair.access_token).unwrap();
        let refresh = issuer.validate_refresh_token(&pair.refresh_token).unwrap();

        assert_eq!(access.iat, refresh.iat);
        assert!(access.exp < refresh.exp);
        assert_eq!(access.sub, refresh.sub);
    }

    #[test]
    fn test_password_hasher_adapter() {
        let hasher = PasswordHasher::with_params(HashingParams::new(1024, 1, 1)).unwrap();

        let hash = CredentialHasher::hash(&hasher, "longpassword1").unwrap();

        assert!(CredentialHasher::verify(&hasher, "longpassword1", &hash).unwrap());
        assert!(!CredentialHasher::verify(&hasher, "wrongpass", &hash).unwrap());
        assert!(!CredentialHasher::needs_rehash(&hasher, &hash));
    }
}
