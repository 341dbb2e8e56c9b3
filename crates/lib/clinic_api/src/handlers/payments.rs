//! Payment record handler.

use axum::Json;
use axum::extract::State;
use clinic_core::models::NewPayment;
use tracing::info;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::models::InsertResponse;

/// `POST /payments` — store a payment made for a booking.
pub async fn create_payment_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewPayment>,
) -> AppResult<Json<InsertResponse>> {
    if body.payment_method_id.trim().is_empty() {
        return Err(AppError::Validation("paymentMethodId is required".into()));
    }
    let payment = state.store.insert_payment(body.into_payment()).await?;
    info!(id = %payment.id, booking = %payment.booking.id, "payment recorded");
    Ok(Json(InsertResponse::inserted(payment.id)))
}
