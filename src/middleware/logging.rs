//! Logging middleware
//!
//! This module provides per-exchange logging for the chat handler: a request
//! id, the turn being evaluated, its outcome and how long it took.

use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::state::{ChatTurn, Reply};
use crate::utils::errors::{ErrorSeverity, NaviChatError};

/// Bookkeeping for one request/response exchange
#[derive(Debug, Clone)]
pub struct Exchange {
    pub id: Uuid,
    pub keyword: String,
    pub step: String,
    started: Instant,
}

impl Exchange {
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Logging middleware for chat exchanges
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_answers: bool,
    log_performance: bool,
}

impl LoggingMiddleware {
    /// Create a new LoggingMiddleware instance
    pub fn new(log_answers: bool, log_performance: bool) -> Self {
        Self {
            log_answers,
            log_performance,
        }
    }

    /// Log an incoming turn and start timing it
    pub fn begin(&self, turn: &ChatTurn) -> Exchange {
        let exchange = Exchange {
            id: Uuid::new_v4(),
            keyword: turn.keyword.clone(),
            step: turn.step.clone(),
            started: Instant::now(),
        };

        // Answers can be puzzle solutions; keep them out of info-level logs
        if self.log_answers {
            debug!(
                request_id = %exchange.id,
                keyword = %exchange.keyword,
                step = %exchange.step,
                answer = %turn.answer,
                hint_index = ?turn.hint_index,
                "Chat turn received"
            );
        } else {
            debug!(
                request_id = %exchange.id,
                keyword = %exchange.keyword,
                step = %exchange.step,
                "Chat turn received"
            );
        }

        exchange
    }

    /// Log the engine's reply
    pub fn log_reply(&self, exchange: &Exchange, reply: &Reply) {
        info!(
            request_id = %exchange.id,
            keyword = %exchange.keyword,
            step = %exchange.step,
            kind = reply.kind.as_str(),
            next = %reply.next,
            handoff = reply.send_text.is_some(),
            "Chat turn handled"
        );
        self.log_performance(exchange);
    }

    /// Log a turn that named no known flow
    pub fn log_not_found(&self, exchange: &Exchange) {
        info!(
            request_id = %exchange.id,
            keyword = %exchange.keyword,
            "Unknown flow keyword"
        );
        self.log_performance(exchange);
    }

    /// Log a failed exchange at a level matching the error's severity
    pub fn log_error(&self, exchange: &Exchange, err: &NaviChatError) {
        match err.severity() {
            ErrorSeverity::Info => info!(request_id = %exchange.id, error = %err, "Chat turn failed"),
            ErrorSeverity::Warning => warn!(request_id = %exchange.id, error = %err, "Chat turn failed"),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                error!(request_id = %exchange.id, error = %err, severity = %err.severity(), "Chat turn failed")
            }
        }
        self.log_performance(exchange);
    }

    fn log_performance(&self, exchange: &Exchange) {
        if !self.log_performance {
            return;
        }

        let duration_ms = exchange.elapsed().as_millis() as u64;
        if duration_ms > 100 {
            warn!(request_id = %exchange.id, duration_ms = duration_ms, "Slow chat turn");
        } else {
            debug!(request_id = %exchange.id, duration_ms = duration_ms, "Chat turn timing");
        }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(false, true)
    }
}
