use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::RegisterRequest;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .auth_service
        .register(body.into_request())
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registration (raw JSON; validated by the service)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    username: String,
    password: String,
    email: String,
}

impl RegisterRequestBody {
    fn into_request(self) -> RegisterRequest {
        RegisterRequest {
            username: self.username,
            password: self.password,
            email: self.email,
        }
    }
}

/// Created-user payload. Carries no password field of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for RegisterResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
