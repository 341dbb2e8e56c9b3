//! JWT token generation and verification.
//!
//! Tokens are HS256 only. Verification pins the algorithm, so a token whose
//! header names anything else is rejected before the signature is looked at.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Access token lifetime: 2 days.
pub const ACCESS_TOKEN_EXPIRY_DAYS: i64 = 2;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Generate a signed access token for `email`, valid for two days from now.
pub fn generate_access_token(email: &str, secret: &[u8]) -> Result<String, AuthError> {
    generate_access_token_at(email, secret, Utc::now())
}

/// Generate a signed access token as if issued at `issued_at`.
pub fn generate_access_token_at(
    email: &str,
    secret: &[u8],
    issued_at: DateTime<Utc>,
) -> Result<String, AuthError> {
    let claims = TokenClaims {
        email: email.to_string(),
        exp: (issued_at + Duration::days(ACCESS_TOKEN_EXPIRY_DAYS)).timestamp(),
        iat: issued_at.timestamp(),
    };
    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Signing(format!("jwt encode: {e}")))
}

/// Verify an access token, returning its claims.
///
/// Bad signatures, foreign algorithms, malformed tokens and expired tokens
/// all collapse into [`AuthError::Invalid`].
pub fn verify_access_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);
    decode::<TokenClaims>(token, &key, &validation())
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(kind = ?e.kind(), "access token rejected");
            AuthError::Invalid
        })
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation
}
