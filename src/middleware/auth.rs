//! Principal extraction middleware.
//!
//! Credential verification happens upstream: an authenticating reverse
//! proxy injects the authenticated user's id into a configurable identity
//! header. This middleware parses that header into a [`PrincipalId`]
//! request extension; whether the principal still exists is re-checked per
//! operation by the service layer.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{AppState, routes::ApiError};

/// Id of the authenticated principal, as asserted by the proxy.
#[derive(Debug, Clone, Copy)]
pub struct PrincipalId(pub Uuid);

/// Middleware that requires an identity header on every request.
pub async fn principal_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_name = state.config.auth.identity_header.as_str();

    let principal = match req.headers().get(header_name) {
        None => {
            return Err(ApiError::Unauthorized("Missing identity header".to_string()));
        }
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|raw| raw.parse::<Uuid>().ok())
            .ok_or_else(|| ApiError::Unauthorized("Invalid identity header".to_string()))?,
    };

    tracing::debug!(principal_id = %principal, "Request authenticated");
    req.extensions_mut().insert(PrincipalId(principal));

    Ok(next.run(req).await)
}
