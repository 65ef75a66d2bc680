//! Services module
//!
//! This module contains the outbound HTTP client used by the terminal front end.

pub mod client;

pub use client::ChatClient;
