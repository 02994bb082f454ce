//! Credential primitives library
//!
//! Provides the cryptographic building blocks for account services:
//! - Password hashing and verification (Argon2id)
//! - Bearer-token signing and verification (HS256 JWT)
//!
//! The service defines its own domain types and error taxonomy and adapts
//! these implementations. Nothing here knows about users, storage, or HTTP.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credentials::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use credentials::{JwtHandler, Claims};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user("user123", "alice");
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.usr, "alice");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TOKEN_TTL_HOURS;
pub use password::PasswordError;
pub use password::PasswordHasher;
