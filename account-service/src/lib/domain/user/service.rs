use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use credentials::Claims;
use credentials::JwtHandler;
use credentials::PasswordHasher;

use crate::domain::user::models::LoginRequest;
use crate::domain::user::models::RegisterRequest;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and login.
///
/// Stateless: safe for unbounded concurrent invocation, all mutable state
/// lives in the repository. The duplicate pre-check and the insert are not
/// atomic across concurrent registrations; the repository's uniqueness
/// constraint is the authoritative conflict detector, the pre-check is a
/// fast path for a better error.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `jwt_handler` - Token signer, constructed from the process-wide
    ///   secret at startup
    pub fn new(repository: Arc<R>, jwt_handler: JwtHandler) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            jwt_handler,
        }
    }
}

#[async_trait]
impl<R> AuthServicePort for AuthService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        // Validation is the first gate: no store access, no hashing before it
        let (username, email) = request.validate()?;

        // Best-effort duplicate pre-check; the insert below is the
        // authoritative one. Storage errors propagate as internal, never as
        // a duplicate or validation failure.
        let existing = self
            .repository
            .find_by_email_or_username(email.as_str(), username.as_str())
            .await?;
        if existing.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash(&request.password)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create_user(user).await?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user.sanitized())
    }

    async fn login(&self, request: LoginRequest) -> Result<String, AuthError> {
        request.validate()?;

        let user = match self.repository.find_by_username(&request.username).await? {
            Some(user) => user,
            None => {
                // Unknown username and wrong password must be
                // indistinguishable; burn comparable hashing work so the
                // two paths take similar time.
                let _ = self.password_hasher.hash(&request.password);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let matches = self
            .password_hasher
            .verify(&request.password, &user.password_hash)
            .map_err(|e| AuthError::Internal(format!("Password verification failed: {}", e)))?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = Claims::for_user(user.id, user.username.as_str());
        let token = self
            .jwt_handler
            .encode(&claims)
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {}", e)))?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(token)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|user| user.sanitized())
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use credentials::TOKEN_TTL_HOURS;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Username;
    use crate::user::errors::ValidationError;

    const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create_user(&self, user: User) -> Result<User, AuthError>;
            async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;
            async fn find_by_email_or_username(
                &self,
                email: &str,
                username: &str,
            ) -> Result<Option<User>, AuthError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;
        }
    }

    fn service(repository: MockTestUserRepository) -> AuthService<MockTestUserRepository> {
        AuthService::new(Arc::new(repository), JwtHandler::new(JWT_SECRET))
    }

    fn stored_user(username: &str, email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            username: "alice01".to_string(),
            password: "s3cret!1".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email_or_username()
            .withf(|email, username| email == "alice@example.com" && username == "alice01")
            .times(1)
            .returning(|_, _| Ok(None));

        repository
            .expect_create_user()
            .withf(|user| {
                user.username.as_str() == "alice01"
                    && user.email.as_str() == "alice@example.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(Ok);

        let result = service(repository).register(register_request()).await;
        let user = result.expect("registration should succeed");

        assert_eq!(user.username.as_str(), "alice01");
        assert_eq!(user.email.as_str(), "alice@example.com");
        // Hash never leaves the service
        assert!(user.password_hash.is_empty());
        assert_eq!(user.created_at, user.updated_at);
        assert!(user.created_at.timestamp() > 0);
    }

    #[tokio::test]
    async fn test_register_validation_failures_touch_no_storage() {
        let invalid_requests = [
            RegisterRequest {
                username: "al".to_string(), // too short
                ..register_request()
            },
            RegisterRequest {
                username: "a".repeat(33), // too long
                ..register_request()
            },
            RegisterRequest {
                password: "short7!".to_string(), // below minimum length
                ..register_request()
            },
            RegisterRequest {
                email: "not-an-email".to_string(),
                ..register_request()
            },
        ];

        for request in invalid_requests {
            // No expectations set: any repository call panics
            let repository = MockTestUserRepository::new();

            let result = service(repository).register(request).await;
            assert!(matches!(
                result,
                Err(AuthError::ValidationFailed(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_detected_by_precheck() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email_or_username()
            .times(1)
            .returning(|_, username| {
                Ok(Some(stored_user(
                    username,
                    "taken@example.com",
                    "pass_word!",
                )))
            });

        repository.expect_create_user().times(0);

        let result = service(repository).register(register_request()).await;
        assert_eq!(result.unwrap_err(), AuthError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_register_duplicate_detected_at_write_time() {
        let mut repository = MockTestUserRepository::new();

        // Pre-check passes, a concurrent registration wins the race and the
        // uniqueness constraint fires on insert
        repository
            .expect_find_by_email_or_username()
            .times(1)
            .returning(|_, _| Ok(None));

        repository
            .expect_create_user()
            .times(1)
            .returning(|_| Err(AuthError::UserAlreadyExists));

        let result = service(repository).register(register_request()).await;
        assert_eq!(result.unwrap_err(), AuthError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_register_precheck_storage_failure_is_internal() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email_or_username()
            .times(1)
            .returning(|_, _| Err(AuthError::Internal("connection reset".to_string())));

        repository.expect_create_user().times(0);

        let result = service(repository).register(register_request()).await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn test_register_persist_failure_is_internal() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email_or_username()
            .times(1)
            .returning(|_, _| Ok(None));

        repository
            .expect_create_user()
            .times(1)
            .returning(|_| Err(AuthError::Internal("write failed".to_string())));

        let result = service(repository).register(register_request()).await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("alice01", "alice@example.com", "s3cret!1");
        let user_id = user.id;

        repository
            .expect_find_by_username()
            .withf(|username| username == "alice01")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repository)
            .login(LoginRequest {
                username: "alice01".to_string(),
                password: "s3cret!1".to_string(),
            })
            .await;

        let token = result.expect("login should succeed");
        assert!(!token.is_empty());

        let claims = JwtHandler::new(JWT_SECRET)
            .decode(&token)
            .expect("issued token should verify");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.usr, "alice01");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 60 * 60);
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_invalid_credentials() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository)
            .login(LoginRequest {
                username: "ghost".to_string(),
                password: "whatever!".to_string(),
            })
            .await;

        // Not a distinct not-found error
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_invalid_credentials() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("alice01", "alice@example.com", "s3cret!1");
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repository)
            .login(LoginRequest {
                username: "alice01".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_empty_fields_fail_validation() {
        for (username, password) in [("", "s3cret!1"), ("alice01", "")] {
            let repository = MockTestUserRepository::new();

            let result = service(repository)
                .login(LoginRequest {
                    username: username.to_string(),
                    password: password.to_string(),
                })
                .await;

            assert!(matches!(
                result,
                Err(AuthError::ValidationFailed(
                    ValidationError::MissingUsername | ValidationError::MissingPassword
                ))
            ));
        }
    }

    #[tokio::test]
    async fn test_login_storage_failure_is_internal() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(AuthError::Internal("connection reset".to_string())));

        let result = service(repository)
            .login(LoginRequest {
                username: "alice01".to_string(),
                password: "s3cret!1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AuthError::Internal(_))));
    }

    #[tokio::test]
    async fn test_get_user_success_is_sanitized() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("alice01", "alice@example.com", "s3cret!1");
        let user_id = user.id;

        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repository).get_user(&user_id).await;
        let user = result.expect("lookup should succeed");

        assert_eq!(user.id, user_id);
        assert!(user.password_hash.is_empty());
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository).get_user(&UserId::new()).await;
        assert_eq!(result.unwrap_err(), AuthError::UserNotFound);
    }
}
