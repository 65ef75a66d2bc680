//! Test helpers module
//!
//! Builds the chat router in-process and drives it with `tower::ServiceExt::oneshot`,
//! plus the known-good answers for every scripted flow.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use NaviChat::{
    config::Settings,
    flows::FlowRegistry,
    handlers::{create_router, AppState},
    middleware::LoggingMiddleware,
    state::ConversationEngine,
};

pub const CHAT_PATH: &str = "/.chat";

/// Answers that walk each flow from its first step to the summary
pub const FLOW_ANSWERS: &[(&str, &[&str])] = &[
    (
        "行方不明者の根拠",
        &["17", "参加者推移", "村内住民が減っている", "広報こだま", "1、2、3、4"],
    ),
    (
        "行方不明者の特徴",
        &["贄、光泉ダム建設計画反対運動ビラ", "篝森山を守る会", "田島里江"],
    ),
    ("行方不明になった場所", &["杉山陽子", "佐久間圭介", "裏道ルート"]),
    (
        "真相",
        &["毒ガス", "広報こだま、霧籠郷土館民俗史第八六九号", "地図記号", "竹林辰雄"],
    ),
];

/// A response captured from the router
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Build the router with default settings
pub fn test_app() -> Router {
    let settings = Settings::default();
    let registry = FlowRegistry::new(&settings.chat.tail_labels()).expect("flows should build");
    let engine = ConversationEngine::new(Arc::new(registry));
    create_router(AppState::new(engine, LoggingMiddleware::default()), CHAT_PATH)
}

/// Send a raw request through a fresh router
pub async fn send(request: Request<Body>) -> TestResponse {
    let response = test_app().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable")
        .to_vec();

    TestResponse { status, headers, body }
}

/// POST raw bytes to the chat path
pub async fn post_raw(body: impl Into<Body>) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(CHAT_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request should build");
    send(request).await
}

/// POST a JSON value to the chat path
pub async fn post_json(body: Value) -> TestResponse {
    post_raw(body.to_string()).await
}

/// POST an answer for `step`, carrying `context`
pub async fn answer(keyword: &str, step: &str, answer: &str, context: &Value) -> Value {
    let response = post_json(json!({
        "keyword": keyword,
        "step": step,
        "answer": answer,
        "context": context,
    }))
    .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text());
    response.json()
}
