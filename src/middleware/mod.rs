//! Middleware module
//!
//! Cross-cutting concerns wrapped around the chat handler.

pub mod logging;

pub use logging::{Exchange, LoggingMiddleware};
