//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tracing::{info, warn};

use core_kernel::Session;

use crate::auth::{session_from_claims, validate_token};
use crate::error::ApiError;
use crate::AppState;

/// Session middleware
///
/// Resolves the bearer token into a [`Session`] and stores it in the request
/// extensions. A request without an `Authorization` header runs as a guest;
/// whether a guest may proceed is decided by the operation. A header that is
/// present but malformed, expired or forged is rejected with 401.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let session = match auth_header {
        None => Session::Guest,
        Some(header) => {
            let Some(token) = header.strip_prefix("Bearer ") else {
                warn!("Malformed Authorization header");
                return ApiError::Unauthorized.into_response();
            };

            match validate_token(token, &state.config.jwt_secret)
                .and_then(|claims| session_from_claims(&claims))
            {
                Ok(session) => session,
                Err(e) => {
                    warn!("Token validation failed: {}", e);
                    return ApiError::Unauthorized.into_response();
                }
            }
        }
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}

/// Audit logging middleware
///
/// Logs every API request with the acting user
pub async fn audit_middleware(
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let user = request
        .extensions()
        .get::<Session>()
        .map(Session::audit_name)
        .unwrap_or_else(|| "anonymous".to_string());

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        target: "audit",
        method = %method,
        uri = %uri,
        user = %user,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
