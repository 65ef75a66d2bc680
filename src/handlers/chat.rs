//! Chat request handler
//!
//! The stateless transport adapter: parse a turn out of the request body,
//! run it through the engine, serialize the reply.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::types::{ChatResponse, ErrorResponse, HealthResponse};
use crate::flows::START_KEY;
use crate::middleware::LoggingMiddleware;
use crate::state::{ChatTurn, ConversationEngine, SessionContext};
use crate::utils::errors::NaviChatError;

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConversationEngine>,
    pub logger: LoggingMiddleware,
}

impl AppState {
    pub fn new(engine: ConversationEngine, logger: LoggingMiddleware) -> Self {
        Self {
            engine: Arc::new(engine),
            logger,
        }
    }
}

/// Create the router with the chat handler mounted at `path`
pub fn create_router(state: AppState, path: &str) -> Router {
    Router::new()
        .route(path, post(chat).fallback(method_not_allowed))
        .route("/health", get(health))
        .with_state(state)
}

async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let turn = parse_turn(&body);
    let exchange = state.logger.begin(&turn);

    match state.engine.respond(turn) {
        Ok(reply) => {
            state.logger.log_reply(&exchange, &reply);
            json_response(StatusCode::OK, &ChatResponse::from(reply))
        }
        Err(NaviChatError::FlowNotFound { .. }) => {
            state.logger.log_not_found(&exchange);
            json_response(StatusCode::NOT_FOUND, &ErrorResponse::not_found())
        }
        Err(e) => {
            state.logger.log_error(&exchange, &e);
            json_response(StatusCode::INTERNAL_SERVER_ERROR, &ErrorResponse::new("internal_error"))
        }
    }
}

async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        flows: state.engine.registry().len(),
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Json(body),
    )
        .into_response()
}

/// Parse a request body into a turn
///
/// Malformed bodies never fail the request: unparseable JSON, non-object
/// bodies and ill-typed fields all fall back to neutral defaults.
pub fn parse_turn(body: &[u8]) -> ChatTurn {
    let fields = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => fields,
        _ => return ChatTurn::default(),
    };

    let step = text_field(&fields, "step");

    ChatTurn {
        keyword: text_field(&fields, "keyword"),
        step: if step.is_empty() { START_KEY.to_string() } else { step },
        answer: text_field(&fields, "answer"),
        context: SessionContext::from_value(fields.get("context").cloned().unwrap_or(Value::Null)),
        hint_index: hint_index(fields.get("hintIndex")),
    }
}

fn text_field(fields: &Map<String, Value>, name: &str) -> String {
    match fields.get(name) {
        Some(Value::String(text)) => trim_input(text).to_string(),
        Some(Value::Number(number)) => number_text(number),
        _ => String::new(),
    }
}

/// Strip whitespace and byte-order marks from both ends
fn trim_input(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Integral floats print without a fractional part (`17.0` -> `17`)
fn number_text(number: &Number) -> String {
    if number.is_f64() {
        number.as_f64().map(|value| value.to_string()).unwrap_or_default()
    } else {
        number.to_string()
    }
}

/// `None` means "not a hint request"; present but unusable indices stay `Some`
fn hint_index(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => trim_input(text).parse::<f64>().ok().filter(|index| !index.is_nan()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_body() {
        let body = r#"{"keyword":" 真相 ","step":"s2","answer":" 地図記号 ","context":{"facility":"毒ガス"},"hintIndex":1}"#;
        let turn = parse_turn(body.as_bytes());

        assert_eq!(turn.keyword, "真相");
        assert_eq!(turn.step, "s2");
        assert_eq!(turn.answer, "地図記号");
        assert_eq!(turn.context.get_str("facility"), Some("毒ガス"));
        assert_eq!(turn.hint_index, Some(1.0));
    }

    #[test]
    fn test_malformed_bodies_default() {
        let bodies: [&[u8]; 5] = [b"not json", b"", b"null", b"[1,2]", b"\"text\""];
        for body in bodies {
            let turn = parse_turn(body);
            assert_eq!(turn, ChatTurn::default());
        }
    }

    #[test]
    fn test_field_coercion() {
        let turn = parse_turn(br#"{"keyword":"k","step":"","answer":17,"context":[1],"hintIndex":null}"#);
        assert_eq!(turn.step, START_KEY);
        assert_eq!(turn.answer, "17");
        assert!(turn.context.is_empty());
        assert_eq!(turn.hint_index, None);
    }

    #[test]
    fn test_numbers_and_byte_order_marks_normalize() {
        let turn = parse_turn(br#"{"answer":17.0,"step":2}"#);
        assert_eq!(turn.answer, "17");
        assert_eq!(turn.step, "2");

        assert_eq!(parse_turn(br#"{"answer":0.5}"#).answer, "0.5");
        assert_eq!(parse_turn(br#"{"answer":-3}"#).answer, "-3");

        let turn = parse_turn(br#"{"answer":"\ufeff17\u3000","hintIndex":"\ufeff1"}"#);
        assert_eq!(turn.answer, "17");
        assert_eq!(turn.hint_index, Some(1.0));
    }

    #[test]
    fn test_hint_index_forms() {
        assert_eq!(parse_turn(br#"{"hintIndex":"2"}"#).hint_index, Some(2.0));
        assert_eq!(parse_turn(br#"{"hintIndex":-1}"#).hint_index, Some(-1.0));
        assert_eq!(parse_turn(br#"{"hintIndex":0.5}"#).hint_index, Some(0.5));
        assert_eq!(parse_turn(br#"{"hintIndex":"abc"}"#).hint_index, None);
        assert_eq!(parse_turn(br#"{"hintIndex":true}"#).hint_index, None);
    }
}
