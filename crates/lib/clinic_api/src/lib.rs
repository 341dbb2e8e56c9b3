//! # clinic_api
//!
//! HTTP API library for the clinic booking backend.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use clinic_core::store::ClinicStore;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{appointments, auth, bookings, contact, doctors, health, payments, users};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store shared by every request.
    pub store: Arc<dyn ClinicStore>,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn ClinicStore>, config: ApiConfig) -> Self {
        Self { store, config }
    }

    pub(crate) fn jwt_secret(&self) -> &[u8] {
        self.config.jwt_secret.as_bytes()
    }
}

/// Run embedded database migrations.
///
/// Delegates to `clinic_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    clinic_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_HEALTH, get(health::health_handler))
        .route(
            routes::APPOINTMENT_OPTIONS,
            get(appointments::appointment_options_handler),
        )
        .route(
            routes::APPOINTMENT_OPTIONS_V2,
            get(appointments::appointment_options_v2_handler),
        )
        .route(
            routes::APPOINTMENT_SPECIALTY,
            get(appointments::specialty_handler),
        )
        .route(routes::BOOKINGS, post(bookings::create_booking_handler))
        .route(routes::BOOKINGS_ID, get(bookings::get_booking_handler))
        .route(routes::JWT, get(auth::jwt_handler))
        .route(
            routes::USERS,
            get(users::list_users_handler).post(users::create_user_handler),
        )
        .route(routes::USERS_ADMIN_KEY, get(users::admin_status_handler))
        .route(routes::CONTACT, post(contact::create_contact_handler))
        .route(routes::PAYMENTS, post(payments::create_payment_handler));

    // Authenticated routes (valid token required)
    let authenticated = Router::new()
        .route(routes::BOOKINGS, get(bookings::list_bookings_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    // Admin routes (valid token + admin role). Layers run bottom-up, so the
    // token is verified before the role lookup.
    let admin = Router::new()
        .route(routes::USERS_ADMIN_KEY, put(users::make_admin_handler))
        .route(
            routes::DOCTORS,
            get(doctors::list_doctors_handler).post(doctors::create_doctor_handler),
        )
        .route(routes::DOCTORS_ID, delete(doctors::delete_doctor_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
