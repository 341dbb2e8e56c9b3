//! Authentication middleware: Bearer token verification and role gating.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use clinic_core::auth::gate;
use clinic_core::models::{Role, TokenClaims};

use crate::AppState;
use crate::error::AppError;

/// Verified identity stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenClaims);

impl AuthenticatedUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies the JWT,
/// and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let claims = gate::verify_bearer(header, state.jwt_secret())?;

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}

/// Axum middleware: requires the authenticated identity to hold the admin
/// role. Must run after [`require_auth`].
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Owned copy: the request itself is not held across the store call.
    let email = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.email().to_string())
        .ok_or_else(|| AppError::Unauthorized("unauthorized access".into()))?;

    gate::authorize(state.store.as_ref(), &email, Role::Admin).await?;

    Ok(next.run(request).await)
}
