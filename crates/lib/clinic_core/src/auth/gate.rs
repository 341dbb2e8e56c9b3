//! Request gates: bearer verification, token issuance and role checks.
//!
//! Each request runs the chain from scratch:
//! `Unauthenticated -> Authenticated -> Authorized`, with any failure ending
//! the request as `Missing`, `Invalid` or `Forbidden`.

use tracing::{debug, info};

use super::AuthError;
use super::jwt::{generate_access_token, verify_access_token};
use crate::models::{Role, TokenClaims};
use crate::store::ClinicStore;

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let token = header
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AuthError::Missing)?;
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::Missing);
    }
    Ok(token)
}

/// Verify a raw `Authorization` header value and return the token claims.
pub fn verify_bearer(header: Option<&str>, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let token = bearer_token(header)?;
    verify_access_token(token, secret)
}

/// Issue an access token for a known identity.
///
/// Unknown emails yield [`AuthError::NotFound`]; callers surface that as
/// "unauthenticated" without saying more.
pub async fn issue_token(
    store: &dyn ClinicStore,
    email: &str,
    secret: &[u8],
) -> Result<String, AuthError> {
    if store.find_user_by_email(email).await?.is_none() {
        debug!("token requested for unknown identity");
        return Err(AuthError::NotFound);
    }
    let token = generate_access_token(email, secret)?;
    info!(email, "issued access token");
    Ok(token)
}

/// Check that the identity behind `email` holds `required`.
///
/// Unknown identities and role mismatches are both `Forbidden`.
pub async fn authorize(
    store: &dyn ClinicStore,
    email: &str,
    required: Role,
) -> Result<(), AuthError> {
    match store.find_user_by_email(email).await? {
        Some(user) if user.role == required => Ok(()),
        Some(user) => {
            debug!(email, role = %user.role, required = %required, "role mismatch");
            Err(AuthError::Forbidden)
        }
        None => {
            debug!(email, "role check for unknown identity");
            Err(AuthError::Forbidden)
        }
    }
}
