//! Chat HTTP client
//!
//! Posts turns to the chat endpoint and decodes the replies. Session state
//! lives in [`crate::state::ChatSession`]; this type is transport only.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::handlers::types::{ChatRequest, ChatResponse};
use crate::utils::errors::{NaviChatError, Result};

/// HTTP client for the chat endpoint
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    endpoint: String,
}

impl ChatClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("NaviChat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post one turn and decode the reply
    ///
    /// An unknown keyword comes back as [`NaviChatError::FlowNotFound`] whether the
    /// server signals it with a 404 or with an `ok: false` body.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        debug!(
            keyword = %request.keyword,
            step = %request.step,
            hint = ?request.hint_index,
            "Posting chat turn"
        );

        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(NaviChatError::FlowNotFound {
                keyword: request.keyword.clone(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Chat endpoint returned an error status");
            return Err(NaviChatError::UnexpectedStatus(status.as_u16()));
        }

        let reply: ChatResponse = response.json().await?;

        if !reply.ok {
            return match reply.error.as_deref() {
                Some("not_found") => Err(NaviChatError::FlowNotFound {
                    keyword: request.keyword.clone(),
                }),
                other => Err(NaviChatError::InvalidInput(format!(
                    "chat endpoint rejected the turn: {}",
                    other.unwrap_or("unknown")
                ))),
            };
        }

        debug!(next = %reply.next, retry = reply.retry.unwrap_or(false), "Received chat reply");
        Ok(reply)
    }
}
