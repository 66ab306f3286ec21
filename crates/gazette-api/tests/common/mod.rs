#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use gazette_api::auth::{AppState, AppStateInner};
use gazette_db::Database;

pub const HOME_PAGE_SIZE: u32 = 10;

pub fn test_state() -> AppState {
    Arc::new(AppStateInner {
        db: Database::open_in_memory().expect("in-memory db"),
        jwt_secret: "test-secret".into(),
        home_page_size: HOME_PAGE_SIZE,
    })
}

pub fn app(state: &AppState) -> Router {
    gazette_api::router(state.clone())
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("infallible")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_authed(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn delete_req(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(res: Response<Body>) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}

pub fn location(res: &Response<Body>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
}

/// Register a user through the API and hand back its id and bearer token.
/// Plays the role of the original suite's author/reader client fixtures.
pub async fn register(app: &Router, username: &str) -> (Uuid, String) {
    let res = send(
        app,
        post_json(
            "/auth/register",
            None,
            &serde_json::json!({ "username": username, "password": "correct-horse-battery" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let v = body_json(res).await;
    let user_id = v["user_id"].as_str().unwrap().parse().unwrap();
    let token = v["token"].as_str().unwrap().to_string();
    (user_id, token)
}

pub fn seed_news(state: &AppState, title: &str, date: chrono::DateTime<chrono::Utc>) -> Uuid {
    let id = Uuid::new_v4();
    state
        .db
        .insert_news(&id.to_string(), title, "Просто текст.", &date.to_rfc3339())
        .unwrap();
    id
}

pub fn seed_comment(
    state: &AppState,
    news_id: Uuid,
    author_id: Uuid,
    text: &str,
    created: chrono::DateTime<chrono::Utc>,
) -> Uuid {
    let id = Uuid::new_v4();
    state
        .db
        .insert_comment(
            &id.to_string(),
            &news_id.to_string(),
            &author_id.to_string(),
            text,
            &created.to_rfc3339(),
        )
        .unwrap();
    id
}
