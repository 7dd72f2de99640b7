use std::path::PathBuf;

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Identity context attached to an authenticated request.
///
/// Lives in the request extensions only, so it can never leak into another
/// request; the upload path is resolved here but not touched (directory I/O
/// belongs to the downstream handlers).
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub upload_path: PathBuf,
}

/// Middleware that verifies the bearer token and attaches the identity
/// context to the request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Verify the token; the identity it embeds is trusted as issued
    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        let message = match e {
            auth::TokenError::Expired => "Token expired",
            auth::TokenError::SignatureInvalid => "Invalid token signature",
            _ => "Malformed token",
        };
        unauthorized(message)
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse user ID from token");
        unauthorized("Invalid token format")
    })?;

    // Resolve (but do not create) this identity's upload directory
    let upload_path = state.storage.resolve(&user_id);

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        upload_path,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
        })?;

    if token.is_empty() {
        return Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    }

    Ok(token)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
