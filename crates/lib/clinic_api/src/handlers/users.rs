//! User handlers.

use axum::Json;
use axum::extract::{Path, State};
use clinic_core::ids::parse_id;
use clinic_core::models::{NewUser, Role, User};
use clinic_core::store::{UpdateOutcome, UserInsert};
use tracing::info;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::models::{AdminStatusResponse, InsertResponse};

/// `GET /users` — all users.
pub async fn list_users_handler(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.store.list_users().await?))
}

/// `POST /users` — register a user with the default role.
pub async fn create_user_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewUser>,
) -> AppResult<Json<InsertResponse>> {
    if body.email.trim().is_empty() {
        return Err(AppError::Validation("email is required".into()));
    }
    let response = match state.store.insert_user_if_absent(body.into_user()).await? {
        UserInsert::Inserted(user) => InsertResponse::inserted(user.id),
        UserInsert::AlreadyExists => InsertResponse::skipped("user already exists"),
    };
    Ok(Json(response))
}

/// `GET /users/admin/{email}` — whether `email` belongs to an admin.
pub async fn admin_status_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<AdminStatusResponse>> {
    let is_admin = state
        .store
        .find_user_by_email(&email)
        .await?
        .is_some_and(|u| u.role == Role::Admin);
    Ok(Json(AdminStatusResponse { is_admin }))
}

/// `PUT /users/admin/{id}` — elevate a user to admin. Admin only.
pub async fn make_admin_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UpdateOutcome>> {
    let id = parse_id(&id).ok_or_else(|| AppError::Validation("invalid user ID".into()))?;
    let outcome = state.store.set_user_role(id, Role::Admin, true).await?;
    info!(%id, ?outcome, "admin role granted");
    Ok(Json(outcome))
}
