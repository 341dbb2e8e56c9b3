//! Doctor roster handlers. All routes are admin only.

use axum::Json;
use axum::extract::{Path, State};
use clinic_core::ids::parse_id;
use clinic_core::models::{Doctor, NewDoctor};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::models::{DeleteResponse, InsertResponse};

/// `GET /doctors`
pub async fn list_doctors_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Doctor>>> {
    Ok(Json(state.store.list_doctors().await?))
}

/// `POST /doctors`
pub async fn create_doctor_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewDoctor>,
) -> AppResult<Json<InsertResponse>> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    let doctor = state.store.insert_doctor(body.into_doctor()).await?;
    Ok(Json(InsertResponse::inserted(doctor.id)))
}

/// `DELETE /doctors/{id}`
pub async fn delete_doctor_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let id = parse_id(&id).ok_or_else(|| AppError::Validation("invalid doctor ID".into()))?;
    let deleted_count = state.store.delete_doctor(id).await?;
    Ok(Json(DeleteResponse {
        acknowledged: true,
        deleted_count,
    }))
}
