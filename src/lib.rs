//! NaviChat
//!
//! A stateless, keyword-routed guided-dialogue engine. Each keyword selects a
//! scripted flow of question steps; the server validates answers, hands out
//! hints and praise, and builds a closing summary, while the caller carries the
//! conversation context between turns.

#![allow(non_snake_case)]

pub mod config;
pub mod flows;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{NaviChatError, Result};

// Re-export main components for easy access
pub use flows::FlowRegistry;
pub use handlers::{create_router, AppState};
pub use services::ChatClient;
pub use state::{ChatSession, ConversationEngine, SessionContext};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
