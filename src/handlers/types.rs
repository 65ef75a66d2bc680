//! Wire request and response types

use serde::{Deserialize, Serialize};

use crate::flows::START_KEY;
use crate::state::{HintButton, Reply, SessionContext};

/// Request body posted to the chat handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub keyword: String,
    pub step: String,
    pub answer: String,
    pub context: SessionContext,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_index: Option<u32>,
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            step: START_KEY.to_string(),
            answer: String::new(),
            context: SessionContext::new(),
            hint_index: None,
        }
    }
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub ok: bool,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub next: String,
    #[serde(default)]
    pub context: SessionContext,
    #[serde(default)]
    pub send_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<HintButton>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Reply> for ChatResponse {
    fn from(reply: Reply) -> Self {
        let retry = reply.is_retry().then_some(true);
        Self {
            ok: true,
            role: reply.role,
            prompt: reply.prompt,
            next: reply.next,
            context: reply.context,
            send_text: reply.send_text,
            hints: reply.hints,
            retry,
            error: None,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new("not_found")
    }
}

/// Health check body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub flows: usize,
}
