//! State management module
//!
//! This module handles the conversation engine, the per-traversal context it
//! threads through each turn, and the client-side session that carries both.

pub mod context;
pub mod engine;
pub mod session;

// Re-export commonly used state components
pub use context::{SessionContext, SEND_TEXT_KEY};
pub use engine::{ChatTurn, ConversationEngine, HintButton, Reply, TurnKind};
pub use session::{ChatSession, SessionEvent};
