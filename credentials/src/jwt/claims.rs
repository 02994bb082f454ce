use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Fixed bearer-token lifetime.
pub const TOKEN_TTL_HOURS: i64 = 72;

/// Claims carried by an issued bearer token.
///
/// Compact wire format: subject id, username, issued-at, expiry
/// (Unix timestamps in seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Username at issuance time
    pub usr: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an authenticated user.
    ///
    /// Issued-at is the current time; expiry is fixed at
    /// [`TOKEN_TTL_HOURS`] past issuance.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username to embed in the token
    pub fn for_user(user_id: impl ToString, username: impl Into<String>) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(TOKEN_TTL_HOURS);

        Self {
            sub: user_id.to_string(),
            usr: username.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
