use async_trait::async_trait;

use crate::domain::user::models::LoginRequest;
use crate::domain::user::models::RegisterRequest;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::AuthError;

/// Port for authentication domain operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// Validates the payload, rejects duplicates, hashes the password, and
    /// persists the record.
    ///
    /// # Returns
    /// Created user with `password_hash` cleared
    ///
    /// # Errors
    /// * `ValidationFailed` - Payload violates a registration constraint
    /// * `UserAlreadyExists` - Username or email is already taken
    /// * `Internal` - Storage or hashing failure
    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError>;

    /// Authenticate an account and issue a signed bearer token.
    ///
    /// # Returns
    /// Token string, valid for a fixed 72-hour window
    ///
    /// # Errors
    /// * `ValidationFailed` - Username or password missing
    /// * `InvalidCredentials` - Unknown username or wrong password
    ///   (deliberately indistinguishable)
    /// * `Internal` - Storage or signing failure
    async fn login(&self, request: LoginRequest) -> Result<String, AuthError>;

    /// Retrieve an account by unique identifier.
    ///
    /// # Returns
    /// User with `password_hash` cleared
    ///
    /// # Errors
    /// * `UserNotFound` - No account with this ID
    /// * `Internal` - Storage failure
    async fn get_user(&self, id: &UserId) -> Result<User, AuthError>;
}

/// Persistence operations for the user aggregate.
///
/// Any conforming storage engine can implement this; uniqueness of username
/// and email is ultimately enforced here, not in the service.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Uniqueness constraint violated at write time
    /// * `Internal` - Storage failure
    async fn create_user(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve a user by username.
    ///
    /// Takes a raw string: login applies existence-only validation, so the
    /// lookup key is not required to be a well-formed `Username`.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Internal` - Storage failure
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve a user matching the email or the username (single combined
    /// lookup, logical OR).
    ///
    /// # Returns
    /// Optional user entity (None if neither matches)
    ///
    /// # Errors
    /// * `Internal` - Storage failure
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Internal` - Storage failure
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;
}
