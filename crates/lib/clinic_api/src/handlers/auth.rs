//! Token endpoint.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{EmailQuery, TokenResponse};
use crate::services::auth::{TokenGrant, grant_token};

/// `GET /jwt?email=` — issue an access token for a registered email.
///
/// Unknown emails get 401 with an empty `accessToken`.
pub async fn jwt_handler(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Response> {
    let email = query
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::Validation("email query parameter is required".into()))?;

    let response = match grant_token(state.store.as_ref(), &email, state.jwt_secret()).await? {
        TokenGrant::Issued(access_token) => Json(TokenResponse { access_token }).into_response(),
        TokenGrant::Refused => (
            StatusCode::UNAUTHORIZED,
            Json(TokenResponse {
                access_token: String::new(),
            }),
        )
            .into_response(),
    };
    Ok(response)
}
