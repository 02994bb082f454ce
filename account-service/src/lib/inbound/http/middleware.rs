use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;
use credentials::JwtError;
use credentials::JwtHandler;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

/// Extension type carrying the verified token subject through the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

/// Middleware that verifies bearer tokens on protected routes.
///
/// Expired and otherwise invalid tokens are both rejected with 401; the
/// response does not say which.
pub async fn authenticate(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = jwt_handler.decode(token).map_err(|e| {
        match e {
            JwtError::TokenExpired => tracing::warn!("Rejected expired token"),
            _ => tracing::warn!(error = %e, "Rejected invalid token"),
        }
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a valid user ID");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.usr,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
