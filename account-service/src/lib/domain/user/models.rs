use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;
use crate::user::errors::ValidationError;

/// User aggregate entity.
///
/// Represents a registered account. Created exactly once at registration and
/// immutable thereafter; `password_hash` is cleared before the record leaves
/// the domain.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Copy of this record with the password hash cleared.
    ///
    /// The hash must never reach callers, on any path.
    pub fn sanitized(&self) -> Self {
        Self {
            password_hash: String::new(),
            ..self.clone()
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures the username is 3-32 characters. Stored case-sensitive, no
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Registration payload, as received from the calling layer.
///
/// Fields are raw strings; validation happens inside the service as the
/// first gate of the registration flow.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl RegisterRequest {
    const PASSWORD_MIN_LENGTH: usize = 8;

    /// Validate the payload, producing the domain value objects.
    ///
    /// # Errors
    /// * `Username` - Username missing or outside 3-32 characters
    /// * `Email` - Email missing or malformed
    /// * `PasswordTooShort` - Password shorter than 8 characters
    pub fn validate(&self) -> Result<(Username, EmailAddress), ValidationError> {
        let username = Username::new(self.username.clone())?;
        let email = EmailAddress::new(self.email.clone())?;

        let length = self.password.len();
        if length < Self::PASSWORD_MIN_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: Self::PASSWORD_MIN_LENGTH,
                actual: length,
            });
        }

        Ok((username, email))
    }
}

/// Login payload, as received from the calling layer.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Validate the payload.
    ///
    /// Login validation is existence-only: both fields must be non-empty.
    /// No length or format constraints apply here.
    ///
    /// # Errors
    /// * `MissingUsername` - Username is empty
    /// * `MissingPassword` - Password is empty
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(())
    }
}
