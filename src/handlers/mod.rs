//! HTTP handlers module
//!
//! The transport adapter in front of the conversation engine.

pub mod chat;
pub mod types;

pub use chat::{create_router, parse_turn, AppState};
pub use types::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
