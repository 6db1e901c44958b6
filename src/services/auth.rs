use std::sync::Arc;

use crate::{
    auth::{PasswordHasher, TokenKeys},
    error::{is_unique_violation, AppError},
    models::user::{AuthResponse, PublicUser},
    repository::UserRepository,
};

/// Registration and login.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    hasher: PasswordHasher,
    tokens: Arc<TokenKeys>,
}

impl AuthService {
    pub fn new(users: UserRepository, hasher: PasswordHasher, tokens: Arc<TokenKeys>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, AppError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "name, email and password required".to_string(),
            ));
        }

        let password_hash = self.hasher.hash(password)?;

        let user = self
            .users
            .create(name, email, &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::DuplicateEmail
                } else {
                    AppError::Sqlx(e)
                }
            })?;

        tracing::info!("Registered user {} ({})", user.id, user.email);
        Ok(user.into())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let email = email.trim();
        let Some(user) = self.users.find_by_email(email).await? else {
            self.hasher.verify_dummy(password);
            tracing::warn!("Failed login attempt: {}", email);
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            tracing::warn!("Failed login attempt: {}", email);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!("Login successful: {} ({})", user.email, user.id);

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::password::fast_hasher, db::memory_pool};

    async fn service() -> (AuthService, Arc<TokenKeys>) {
        let tokens = Arc::new(TokenKeys::new("auth-test-secret"));
        let users = UserRepository::new(memory_pool().await);
        (AuthService::new(users, fast_hasher(), tokens.clone()), tokens)
    }

    #[tokio::test]
    async fn test_register_returns_public_fields() {
        let (auth, _) = service().await;
        let user = auth
            .register("John", "john@test.com", "password123")
            .await
            .unwrap();
        assert!(user.id > 0);
        assert_eq!(user.name, "John");
        assert_eq!(user.email, "john@test.com");
    }

    #[tokio::test]
    async fn test_register_twice_is_duplicate_email() {
        let (auth, _) = service().await;
        auth.register("John", "john@test.com", "password123")
            .await
            .unwrap();
        let err = auth
            .register("Johnny", "john@test.com", "other")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        let (auth, _) = service().await;
        for (name, email, password) in [
            ("", "john@test.com", "pw"),
            ("John", "  ", "pw"),
            ("John", "john@test.com", ""),
        ] {
            let err = auth.register(name, email, password).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (auth, tokens) = service().await;
        let user = auth
            .register("John", "john@test.com", "password123")
            .await
            .unwrap();

        let response = auth.login("john@test.com", "password123").await.unwrap();
        assert_eq!(response.user, user);

        let claims = tokens.verify(&response.token).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.name, "John");
    }

    #[tokio::test]
    async fn test_login_failures_are_undifferentiated() {
        let (auth, _) = service().await;
        auth.register("John", "john@test.com", "password123")
            .await
            .unwrap();

        let wrong_password = auth.login("john@test.com", "nope").await.unwrap_err();
        let unknown_email = auth.login("nobody@test.com", "password123").await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}
