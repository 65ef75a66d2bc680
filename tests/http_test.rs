//! HTTP adapter integration tests
//!
//! These tests drive the chat router in-process and check status codes,
//! headers and the exact response shapes.

mod helpers;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

use helpers::*;

#[tokio::test]
async fn test_start_returns_first_prompt() {
    let response = post_json(json!({
        "keyword": "行方不明者の根拠",
        "step": "_start",
        "answer": "",
        "context": {}
    }))
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CACHE_CONTROL], "no-store");
    assert!(response.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let body = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["role"], "nAVi");
    assert_eq!(body["next"], "s1");
    assert_eq!(body["context"], json!({}));
    assert_eq!(body["sendText"], serde_json::Value::Null);
    assert!(body["prompt"]
        .as_str()
        .unwrap()
        .starts_with("それでは、回答をまとめていきましょう。"));
}

#[tokio::test]
async fn test_accepted_answer_captures_and_praises() {
    let body = answer("行方不明者の根拠", "s1", "17", &json!({})).await;

    assert_eq!(body["next"], "s2");
    assert_eq!(body["context"], json!({"page": "17"}));
    assert!(body.get("retry").is_none());
    assert!(body["prompt"].as_str().unwrap().contains("\n\n"));
}

#[tokio::test]
async fn test_rejected_answer_offers_hints() {
    let body = answer("行方不明者の根拠", "s1", "5", &json!({"keep": "me"})).await;

    assert_eq!(body["next"], "s1");
    assert_eq!(body["retry"], true);
    assert_eq!(body["context"], json!({"keep": "me"}));
    assert_eq!(body["hints"], json!([{"id": "0", "label": "ヒント1"}]));

    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.starts_with("💡 "));
    assert!(prompt.ends_with("\n\n必要であれば、ヒントボタンを押してみてください。"));
}

#[tokio::test]
async fn test_rejected_answer_lists_every_hint() {
    let body = answer("行方不明者の根拠", "s5", "5", &json!({})).await;

    assert_eq!(body["next"], "s5");
    assert_eq!(
        body["hints"],
        json!([{"id": "0", "label": "ヒント1"}, {"id": "1", "label": "ヒント2"}])
    );
}

#[tokio::test]
async fn test_hint_request() {
    let response = post_json(json!({
        "keyword": "真相",
        "step": "s1",
        "answer": "",
        "context": {},
        "hintIndex": 0
    }))
    .await;
    let body = response.json();

    assert_eq!(body["next"], "s1");
    assert!(body["prompt"].as_str().unwrap().starts_with("🔍 ヒント1："));

    let response = post_json(json!({
        "keyword": "真相",
        "step": "s1",
        "hintIndex": 99
    }))
    .await;
    assert_eq!(
        response.json()["prompt"],
        "このステップには、その番号のヒントは登録されていません。"
    );
}

#[tokio::test]
async fn test_unknown_keyword_is_not_found() {
    let response = post_json(json!({"keyword": "存在しない", "step": "_start"})).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.headers[header::CACHE_CONTROL], "no-store");
    assert_eq!(response.json(), json!({"ok": false, "error": "not_found"}));
}

#[tokio::test]
async fn test_malformed_body_is_treated_as_empty() {
    // No keyword survives parsing, so the lookup fails rather than the request
    let response = post_raw("{not json").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "not_found");
}

#[tokio::test]
async fn test_non_post_is_rejected() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let request = Request::builder()
            .method(method)
            .uri(CHAT_PATH)
            .body(Body::empty())
            .unwrap();
        let response = send(request).await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.text(), "Method Not Allowed");
    }
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"status": "ok", "flows": 4}));
}
