//! Authentication and authorization logic.
//!
//! `jwt` mints and checks access tokens; `gate` turns a raw
//! `Authorization` header into a verified identity and checks roles against
//! the record store.

pub mod gate;
pub mod jwt;

use thiserror::Error;

use crate::store::StoreError;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing or malformed authorization header")]
    Missing,

    #[error("Invalid or expired token")]
    Invalid,

    #[error("Forbidden")]
    Forbidden,

    #[error("Identity not found")]
    NotFound,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
