#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use magitrak_api::auth::{AppStateInner, create_token};
use magitrak_db::{Database, MatchStore};

pub const SECRET: &str = "integration-test-secret";
pub const SESSION_USER_ID: i64 = 1;
pub const OTHER_USER_ID: i64 = 2;

pub fn app() -> Router {
    let db = Arc::new(Database::open_in_memory().expect("in-memory database"));
    magitrak_api::router(Arc::new(AppStateInner::new(
        db,
        SECRET.into(),
        chrono::Duration::days(1),
    )))
}

pub fn app_with_store(store: Arc<dyn MatchStore>) -> Router {
    let db = Arc::new(Database::open_in_memory().expect("in-memory database"));
    let state = AppStateInner::new(db, SECRET.into(), chrono::Duration::days(1))
        .with_match_store(store);
    magitrak_api::router(Arc::new(state))
}

pub fn token_for(user_id: i64) -> String {
    create_token(SECRET, user_id, &format!("user{user_id}"), chrono::Duration::days(1))
        .expect("token")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: impl Into<Body>,
) -> TestResponse {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let response = app
        .clone()
        .oneshot(builder.body(body.into()).expect("request"))
        .await
        .expect("infallible");

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec();

    TestResponse { status, body }
}

pub fn valid_match() -> Value {
    serde_json::json!({
        "ownerId": SESSION_USER_ID,
        "playerDeck": "burn",
        "opponentDeck": "bloom",
        "date": chrono::Utc::now(),
    })
}

/// Create `body` as `user_id` and return the assigned match id.
pub async fn create(app: &Router, user_id: i64, body: &Value) -> String {
    let res = send(
        app,
        Method::POST,
        "/v1/match",
        Some(&token_for(user_id)),
        body.to_string(),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.text());
    res.json()["MatchId"].as_str().expect("MatchId").to_string()
}
