//! Shared helpers for router-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use clinic_api::{AppState, config::ApiConfig};
use clinic_core::auth::jwt::generate_access_token;
use clinic_core::ids::new_id;
use clinic_core::models::{NewUser, Role, TreatmentOption};
use clinic_core::store::{ClinicStore, MemoryStore, UserInsert};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "test-secret";

pub fn test_config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: None,
        jwt_secret: SECRET.into(),
    }
}

pub fn catalog() -> Vec<TreatmentOption> {
    vec![
        TreatmentOption {
            id: new_id(),
            name: "Cleaning".into(),
            slots: vec!["9am".into(), "10am".into()],
            price: 50.0,
        },
        TreatmentOption {
            id: new_id(),
            name: "Whitening".into(),
            slots: vec!["1pm".into(), "2pm".into(), "3pm".into()],
            price: 120.0,
        },
    ]
}

/// Router over a fresh in-memory store seeded with [`catalog`].
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_treatments(catalog()));
    let shared: Arc<dyn ClinicStore> = store.clone();
    let router = clinic_api::router(AppState::new(shared, test_config()));
    (router, store)
}

pub async fn seed_user(store: &MemoryStore, email: &str, role: Role) -> Uuid {
    let user = NewUser {
        name: "Test User".into(),
        email: email.into(),
    }
    .into_user();
    let id = user.id;
    let inserted = store.insert_user_if_absent(user).await.expect("insert user");
    assert!(matches!(inserted, UserInsert::Inserted(_)));
    if role != Role::User {
        store
            .set_user_role(id, role, false)
            .await
            .expect("set role");
    }
    id
}

pub fn bearer(email: &str) -> String {
    let token = generate_access_token(email, SECRET.as_bytes()).expect("token");
    format!("Bearer {token}")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = authorization {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Send a request and decode the JSON body (`Null` when the body is not JSON).
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
