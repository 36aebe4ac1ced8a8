use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Extract and validate the bearer token from the Authorization header,
/// returning the authenticated user id from the subject claim.
///
/// Every failure (missing header, bad signature, wrong issuer or audience,
/// expiry, non-numeric subject) is the same 401 so callers learn nothing
/// about which check failed.
pub fn extract_user_id(state: &AppState, headers: &HeaderMap) -> Result<i64, Response> {
    let token = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            let error = ErrorResponse {
                error: "Missing or invalid Authorization header".to_string(),
            };
            (StatusCode::UNAUTHORIZED, Json(error)).into_response()
        })?;

    state
        .auth_service
        .validate(token)
        .and_then(|claims| claims.subject_id())
        .map_err(|_| {
            let error = ErrorResponse {
                error: "Invalid token".to_string(),
            };
            (StatusCode::UNAUTHORIZED, Json(error)).into_response()
        })
}

/// Middleware to require authentication
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let user_id = extract_user_id(&state, request.headers())?;

    // Store the authenticated id in request extensions for handlers
    request.extensions_mut().insert(AuthUser(user_id));

    Ok(next.run(request).await)
}

/// Extractor for the authenticated user id.
/// Use this in handlers that are protected by the auth middleware.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().copied().ok_or_else(|| {
            let error = ErrorResponse {
                error: "User not authenticated".to_string(),
            };
            (StatusCode::UNAUTHORIZED, Json(error))
        })
    }
}
