use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Input validation failures for registration and login payloads.
///
/// The inner variants record which rule failed, for logs and response
/// messages; callers dispatch on the wrapping `AuthError::ValidationFailed`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Password too short: minimum {min} characters, got {actual}")]
    PasswordTooShort { min: usize, actual: usize },

    #[error("Username is required")]
    MissingUsername,

    #[error("Password is required")]
    MissingPassword,
}

/// Closed set of failure kinds for authentication operations.
///
/// `ValidationFailed`, `UserAlreadyExists`, and `InvalidCredentials` are
/// domain errors returned verbatim to the caller. `UserNotFound` is an
/// internal store signal: register and login never surface it (login
/// translates it into `InvalidCredentials`). `Internal` collapses storage
/// and cryptographic failures; its detail is for logs only and must not
/// reach the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Input validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}
