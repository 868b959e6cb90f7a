mod common;

use axum::{
    body::Body,
    http::{Method, StatusCode},
};
use serde_json::json;

use magitrak_types::api::{LoginResponse, RegisterResponse};

use common::{app, send};

#[tokio::test]
async fn registered_user_can_record_and_list_matches() {
    let app = app();
    let res = send(
        &app,
        Method::POST,
        "/v1/auth/register",
        None,
        json!({"username": "levi", "password": "correct horse"}).to_string(),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let registered: RegisterResponse = serde_json::from_slice(&res.body).unwrap();

    let body = json!({
        "ownerId": registered.user_id,
        "playerDeck": "burn",
        "opponentDeck": "bloom",
        "date": chrono::Utc::now(),
    });
    let res = send(&app, Method::POST, "/v1/match", Some(&registered.token), body.to_string()).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = send(&app, Method::GET, "/v1/match", Some(&registered.token), Body::empty()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_username_returns_409() {
    let app = app();
    let body = json!({"username": "levi", "password": "correct horse"}).to_string();

    let first = send(&app, Method::POST, "/v1/auth/register", None, body.clone()).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(&app, Method::POST, "/v1/auth/register", None, body).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn short_credentials_are_rejected() {
    let app = app();
    for body in [
        json!({"username": "lv", "password": "correct horse"}),
        json!({"username": "levi", "password": "short"}),
    ] {
        let res = send(&app, Method::POST, "/v1/auth/register", None, body.to_string()).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn login_checks_password() {
    let app = app();
    let res = send(
        &app,
        Method::POST,
        "/v1/auth/register",
        None,
        json!({"username": "levi", "password": "correct horse"}).to_string(),
    )
    .await;
    let registered: RegisterResponse = serde_json::from_slice(&res.body).unwrap();

    let res = send(
        &app,
        Method::POST,
        "/v1/auth/login",
        None,
        json!({"username": "levi", "password": "correct horse"}).to_string(),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let login: LoginResponse = serde_json::from_slice(&res.body).unwrap();
    assert_eq!(login.user_id, registered.user_id);
    assert_eq!(login.username, "levi");

    let res = send(
        &app,
        Method::POST,
        "/v1/auth/login",
        None,
        json!({"username": "levi", "password": "battery staple"}).to_string(),
    )
    .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = send(
        &app,
        Method::POST,
        "/v1/auth/login",
        None,
        json!({"username": "nobody", "password": "battery staple"}).to_string(),
    )
    .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
