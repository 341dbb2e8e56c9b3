//! Appointment catalog handlers.

use axum::Json;
use axum::extract::{Query, State};
use clinic_core::models::{Specialty, TreatmentOption};

use crate::AppState;
use crate::error::AppResult;
use crate::models::{DataQuery, DateQuery};
use crate::services::availability::{options_for_date, require_date};

/// `GET /appointmentOptions?date=` — catalog with the day's free slots.
pub async fn appointment_options_handler(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<Vec<TreatmentOption>>> {
    let date = require_date(query.date, "date")?;
    let options = options_for_date(state.store.as_ref(), &date).await?;
    Ok(Json(options))
}

/// `GET /v2/appointmentOptions?data=` — same result, computed by the store.
pub async fn appointment_options_v2_handler(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> AppResult<Json<Vec<TreatmentOption>>> {
    let date = require_date(query.data, "data")?;
    let options = state.store.available_treatments(&date).await?;
    Ok(Json(options))
}

/// `GET /appointmentSpecialty` — treatment names only.
pub async fn specialty_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Specialty>>> {
    Ok(Json(state.store.list_specialties().await?))
}
