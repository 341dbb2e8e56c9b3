//! Token issuance for the login endpoint.

use clinic_core::auth::{AuthError, gate};
use clinic_core::store::ClinicStore;

use crate::error::AppResult;

/// Outcome of a token request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenGrant {
    Issued(String),
    /// The email does not belong to a known identity.
    Refused,
}

/// Issue an access token for `email`, folding "unknown identity" into
/// [`TokenGrant::Refused`].
pub async fn grant_token(
    store: &dyn ClinicStore,
    email: &str,
    secret: &[u8],
) -> AppResult<TokenGrant> {
    match gate::issue_token(store, email, secret).await {
        Ok(token) => Ok(TokenGrant::Issued(token)),
        Err(AuthError::NotFound) => Ok(TokenGrant::Refused),
        Err(e) => Err(e.into()),
    }
}
