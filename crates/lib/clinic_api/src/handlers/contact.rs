//! Contact form handler.

use axum::Json;
use axum::extract::State;
use clinic_core::models::NewContactMessage;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::models::InsertResponse;

/// `POST /contact` — store a contact message.
pub async fn create_contact_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewContactMessage>,
) -> AppResult<Json<InsertResponse>> {
    if body.email.trim().is_empty() || body.message.trim().is_empty() {
        return Err(AppError::Validation("email and message are required".into()));
    }
    let message = state.store.insert_contact(body.into_message()).await?;
    Ok(Json(InsertResponse::inserted(message.id)))
}
