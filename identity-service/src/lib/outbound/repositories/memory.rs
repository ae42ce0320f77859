use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AuthError;

/// In-process user store for tests and local runs.
///
/// The uniqueness check and the insert happen under one write lock, so
/// concurrent registrations of the same email cannot both succeed.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store, bypassing uniqueness checks.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|user| (user.id, user)).collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        let email_taken = users
            .values()
            .any(|existing| !existing.is_deleted() && existing.email == user.email);
        if email_taken {
            return Err(AuthError::email_already_registered());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;

        Ok(users
            .values()
            .find(|user| !user.is_deleted() && &user.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::Role;

    fn user(email: &str) -> User {
        User::new(
            EmailAddress::new(email).unwrap(),
            "$argon2id$test_hash".to_string(),
            Role::Admin,
        )
    }

    #[tokio::test]
    async fn test_create_and_find_case_insensitive() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(user("a@x.com")).await.unwrap();

        let found = repository
            .find_by_email(&EmailAddress::new("A@X.COM").unwrap())
            .await
            .unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_missing_is_none() {
        let repository = InMemoryUserRepository::new();

        let found = repository
            .find_by_email(&EmailAddress::new("missing@x.com").unwrap())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("a@x.com")).await.unwrap();

        let result = repository.create(user("A@x.com")).await;

        assert_eq!(result.unwrap_err(), AuthError::email_already_registered());
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_soft_deleted_user_releases_email() {
        let mut deleted = user("a@x.com");
        deleted.deleted_at = Some(Utc::now());
        let repository = InMemoryUserRepository::with_users([deleted]);

        let found = repository
            .find_by_email(&EmailAddress::new("a@x.com").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());

        assert!(repository.create(user("a@x.com")).await.is_ok());
        assert_eq!(repository.len().await, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_yield_one_winner() {
        let repository = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move { repository.create(user("race@x.com")).await })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AuthError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 15);
    }
}
