//! Token issuance and the auth/role gate chain.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use clinic_core::auth::jwt::{generate_access_token_at, verify_access_token};
use clinic_core::models::{Role, TokenClaims};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::json;

use common::{SECRET, bearer, get, get_with_auth, json_request, seed_user, send, test_app};

#[tokio::test]
async fn jwt_for_unknown_email_is_unauthorized_with_empty_token() {
    let (app, _store) = test_app();
    let (status, body) = send(&app, get("/jwt?email=unknown@x.com")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"accessToken": ""}));
}

#[tokio::test]
async fn jwt_requires_email() {
    let (app, _store) = test_app();
    let (status, _) = send(&app, get("/jwt")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn jwt_for_known_email_round_trips() {
    let (app, store) = test_app();
    seed_user(&store, "a@x.com", Role::User).await;

    let (status, body) = send(&app, get("/jwt?email=a@x.com")).await;
    assert_eq!(status, StatusCode::OK);
    let token = body["accessToken"].as_str().expect("token");
    let claims = verify_access_token(token, SECRET.as_bytes()).expect("valid token");
    assert_eq!(claims.email, "a@x.com");
}

#[tokio::test]
async fn non_admin_cannot_elevate_users() {
    let (app, store) = test_app();
    seed_user(&store, "pat@x.com", Role::User).await;
    let target = seed_user(&store, "target@x.com", Role::User).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/users/admin/{target}"),
            &json!({}),
            Some(&bearer("pat@x.com")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (_, status_body) = send(&app, get("/users/admin/target@x.com")).await;
    assert_eq!(status_body, json!({"isAdmin": false}));
}

#[tokio::test]
async fn admin_can_elevate_users() {
    let (app, store) = test_app();
    seed_user(&store, "boss@x.com", Role::Admin).await;
    let target = seed_user(&store, "target@x.com", Role::User).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/users/admin/{target}"),
            &json!({}),
            Some(&bearer("boss@x.com")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], 1);
    assert_eq!(body["modifiedCount"], 1);

    let (_, status_body) = send(&app, get("/users/admin/target@x.com")).await;
    assert_eq!(status_body, json!({"isAdmin": true}));
}

#[tokio::test]
async fn admin_elevation_upserts_unknown_id() {
    let (app, store) = test_app();
    seed_user(&store, "boss@x.com", Role::Admin).await;
    let id = uuid::Uuid::now_v7();

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/users/admin/{id}"),
            &json!({}),
            Some(&bearer("boss@x.com")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["upsertedCount"], 1);
    assert_eq!(body["upsertedId"], id.to_string());
}

#[tokio::test]
async fn admin_routes_reject_missing_malformed_and_expired_tokens() {
    let (app, store) = test_app();
    seed_user(&store, "boss@x.com", Role::Admin).await;

    let (status, _) = send(&app, get("/doctors")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_with_auth("/doctors", "Token abc")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = generate_access_token_at(
        "boss@x.com",
        SECRET.as_bytes(),
        Utc::now() - Duration::days(3),
    )
    .expect("token");
    let (status, _) = send(&app, get_with_auth("/doctors", &format!("Bearer {expired}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn foreign_algorithm_token_is_rejected() {
    let (app, store) = test_app();
    seed_user(&store, "boss@x.com", Role::Admin).await;

    let now = Utc::now();
    let claims = TokenClaims {
        email: "boss@x.com".into(),
        exp: (now + Duration::days(1)).timestamp(),
        iat: now.timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("encode");

    let (status, _) = send(&app, get_with_auth("/doctors", &format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_for_unknown_identity_is_forbidden() {
    let (app, _store) = test_app();
    let (status, _) = send(&app, get_with_auth("/doctors", &bearer("ghost@x.com"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_manages_doctor_roster() {
    let (app, store) = test_app();
    seed_user(&store, "boss@x.com", Role::Admin).await;
    let auth = bearer("boss@x.com");

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/doctors",
            &json!({"name": "Dr. Who", "email": "who@x.com", "img": "https://img/who.png"}),
            Some(&auth),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["insertedId"].as_str().expect("id").to_string();

    let (status, doctors) = send(&app, get_with_auth("/doctors", &auth)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doctors[0]["name"], "Dr. Who");
    assert_eq!(doctors[0]["img"], "https://img/who.png");

    let (status, deleted) = send(
        &app,
        json_request("DELETE", &format!("/doctors/{id}"), &json!({}), Some(&auth)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deletedCount"], 1);

    let (_, doctors) = send(&app, get_with_auth("/doctors", &auth)).await;
    assert_eq!(doctors, json!([]));
}

#[tokio::test]
async fn registration_cannot_claim_admin_role() {
    let (app, _store) = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/users",
            &json!({"name": "Mallory", "email": "m@x.com", "role": "admin"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], true);

    let (_, status_body) = send(&app, get("/users/admin/m@x.com")).await;
    assert_eq!(status_body, json!({"isAdmin": false}));

    let (_, again) = send(
        &app,
        json_request("POST", "/users", &json!({"name": "M", "email": "m@x.com"}), None),
    )
    .await;
    assert_eq!(again["acknowledged"], false);

    let (_, users) = send(&app, get("/users")).await;
    assert_eq!(users.as_array().expect("array").len(), 1);
    assert_eq!(users[0]["role"], "user");
}
