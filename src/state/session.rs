//! Client-side chat session
//!
//! The only mutable conversation state in the system: which flow the player
//! is in, where they are in it and what they have answered so far. The session
//! builds each request and folds each response back in; it never talks to the
//! network itself.

use super::context::SessionContext;
use crate::flows::{CONFIRM_KEY, END_KEY, START_KEY};
use crate::handlers::types::{ChatRequest, ChatResponse};
use crate::state::HintButton;
use crate::utils::errors::NaviChatError;
use crate::utils::helpers::{build_handoff_payload, FALLBACK_LABEL};

pub const GREETING: &str = "初めまして。n▲▼i（ナビ）です。奇録会の報告書を、一緒に読み解くお手伝いをしますね。 まずは、奇録会の公式LINEで出された問（例：行方不明者の根拠）を、この下の入力欄に入れてみてくださいね。";
pub const NOT_FOUND_MESSAGE: &str = "ごめんなさい。このナビサイトは、奇録会公式LINEから案内されたキーワードだけに反応するように設定されています。 奇録会公式LINEで届いた言葉を、そのまま入力してみてくださいね。";
pub const TRANSPORT_ERROR_MESSAGE: &str = "通信エラーが発生しました。時間をおいて再度お試しください。";
pub const RESET_NOTICE: &str = "ありがとうございます。それでは別の問について考えましょうか。新しいキーワードを入力してください。";

/// What the caller should do after a response has been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Keep the conversation going
    Continue,
    /// The flow reached its terminal state; hand this text off and start over
    Finished { keyword: String, handoff_text: String },
}

/// Per-player session state carried across requests
#[derive(Debug, Clone)]
pub struct ChatSession {
    keyword: Option<String>,
    step: String,
    context: SessionContext,
    handoff_text: Option<String>,
    payload_limit: usize,
}

impl ChatSession {
    pub fn new(payload_limit: usize) -> Self {
        Self {
            keyword: None,
            step: START_KEY.to_string(),
            context: SessionContext::new(),
            handoff_text: None,
            payload_limit,
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Whether a keyword has been accepted by the server
    pub fn is_bound(&self) -> bool {
        self.keyword.is_some()
    }

    pub fn step(&self) -> &str {
        &self.step
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn handoff_text(&self) -> Option<&str> {
        self.handoff_text.as_deref()
    }

    /// First request for a candidate keyword; the session is bound only once the server accepts it
    pub fn begin(&self, keyword: &str) -> ChatRequest {
        ChatRequest {
            keyword: keyword.trim().to_string(),
            step: self.step.clone(),
            answer: String::new(),
            context: self.context.clone(),
            hint_index: None,
        }
    }

    /// Bind the session to a keyword the server accepted
    pub fn bind(&mut self, keyword: &str) {
        self.keyword = Some(keyword.trim().to_string());
    }

    /// Request carrying a player's answer for the current step
    pub fn answer_request(&self, answer: &str) -> Option<ChatRequest> {
        let keyword = self.keyword.as_ref()?;
        Some(ChatRequest {
            keyword: keyword.clone(),
            step: self.step.clone(),
            answer: answer.trim().to_string(),
            context: self.context.clone(),
            hint_index: None,
        })
    }

    /// Request for one of the hints offered after a rejected answer
    pub fn hint_request(&self, hint: &HintButton) -> Option<ChatRequest> {
        let keyword = self.keyword.as_ref()?;
        let index = hint.id.parse::<u32>().ok()?;
        Some(ChatRequest {
            keyword: keyword.clone(),
            step: self.step.clone(),
            answer: String::new(),
            context: self.context.clone(),
            hint_index: Some(index),
        })
    }

    /// Fold a server response into the session
    pub fn apply(&mut self, response: &ChatResponse) -> SessionEvent {
        if response.next == CONFIRM_KEY && !response.prompt.is_empty() {
            self.handoff_text = Some(build_handoff_payload(
                self.keyword.as_deref(),
                &response.prompt,
                self.payload_limit,
            ));
        }

        self.context = response.context.clone();
        if !response.next.is_empty() {
            self.step = response.next.clone();
        }

        if let Some(text) = response.send_text.as_deref().filter(|text| !text.is_empty()) {
            self.handoff_text = Some(text.to_string());
        }

        if self.step == END_KEY {
            let keyword = self.keyword.clone().unwrap_or_default();
            let handoff_text = self
                .handoff_text
                .clone()
                .or_else(|| self.keyword.clone())
                .unwrap_or_else(|| FALLBACK_LABEL.to_string());
            self.reset();
            return SessionEvent::Finished { keyword, handoff_text };
        }

        SessionEvent::Continue
    }

    /// Message shown to the player when a turn could not be completed
    pub fn failure_message(err: &NaviChatError) -> &'static str {
        if err.is_not_found() {
            NOT_FOUND_MESSAGE
        } else {
            TRANSPORT_ERROR_MESSAGE
        }
    }

    /// Forget the current flow entirely
    pub fn reset(&mut self) {
        self.keyword = None;
        self.step = START_KEY.to_string();
        self.context = SessionContext::new();
        self.handoff_text = None;
    }
}
