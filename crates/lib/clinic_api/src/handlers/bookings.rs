//! Booking handlers.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use clinic_core::booking::{BookingOutcome, create_booking};
use clinic_core::ids::parse_id;
use clinic_core::models::{Booking, NewBooking};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{BookingCreated, BookingDeclined, BookingResponse, EmailQuery};

/// `GET /bookings?email=` — the caller's own bookings. Requires authentication.
pub async fn list_bookings_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    if query.email.as_deref() != Some(user.email()) {
        return Err(AppError::Forbidden("forbidden access".into()));
    }
    let bookings = state.store.bookings_for(user.email()).await?;
    Ok(Json(bookings))
}

/// `GET /bookings/{id}` — a single booking.
pub async fn get_booking_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let id = parse_id(&id).ok_or_else(|| AppError::Validation("invalid booking ID".into()))?;
    state
        .store
        .find_booking(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("booking not found".into()))
}

/// `POST /bookings` — book a slot.
///
/// A duplicate is answered with 200 and `acknowledged: false`.
pub async fn create_booking_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewBooking>,
) -> AppResult<Json<BookingResponse>> {
    let response = match create_booking(state.store.as_ref(), body).await? {
        BookingOutcome::Created(booking) => BookingResponse::Created(BookingCreated {
            acknowledged: true,
            inserted_id: booking.id,
            booking,
        }),
        BookingOutcome::Conflict { message, .. } => BookingResponse::Declined(BookingDeclined {
            acknowledged: false,
            message,
        }),
    };
    Ok(Json(response))
}
