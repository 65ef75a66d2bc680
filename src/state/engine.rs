//! Conversation engine
//!
//! A stateless step evaluator. Every call receives the traversal position and
//! the session context from the caller and hands back the new ones; nothing is
//! retained between calls.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::context::SessionContext;
use crate::flows::{Flow, FlowRegistry, Node, END_KEY, START_KEY, SUMMARY_KEY};
use crate::utils::errors::Result;

/// Acknowledgment used when a step defines no praise of its own
pub const DEFAULT_PRAISE: &str = "ありがとうございます。";

/// Shown after an answer that does not fit; always encouraging, never "wrong"
pub const RETRY_MESSAGES: [&str; 4] = [
    "少しだけずれているみたいです。でも大丈夫ですよ、もう一度一緒に考えてみましょう。",
    "惜しいです。視点は悪くありません。もう一度資料を見直してみませんか？",
    "うーん…この答えだと辻褄が合わないかもしれません。もう一度ゆっくり考えてみましょう。",
    "方向性は良いと思います。もう少しだけ条件を絞ってみましょうか。",
];

pub const RETRY_FOOTER: &str = "必要であれば、ヒントボタンを押してみてください。";
pub const NO_HINT_MESSAGE: &str = "このステップには、その番号のヒントは登録されていません。";

/// Prompt returned for an answer posted after the terminal state
pub const CLOSING_FALLBACK: &str = "ここまで一緒に整理できました。";

/// One inbound turn
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub keyword: String,
    pub step: String,
    pub answer: String,
    pub context: SessionContext,
    pub hint_index: Option<f64>,
}

impl ChatTurn {
    /// A prompt-only turn at the start of a flow
    pub fn start(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            ..Self::default()
        }
    }

    pub fn answer(keyword: &str, step: &str, answer: &str, context: SessionContext) -> Self {
        Self {
            keyword: keyword.to_string(),
            step: step.to_string(),
            answer: answer.to_string(),
            context,
            hint_index: None,
        }
    }

    pub fn hint(keyword: &str, step: &str, index: f64, context: SessionContext) -> Self {
        Self {
            keyword: keyword.to_string(),
            step: step.to_string(),
            answer: String::new(),
            context,
            hint_index: Some(index),
        }
    }
}

impl Default for ChatTurn {
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

/// Which branch of the engine produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Hint,
    Prompt,
    Retry,
    Advance,
}

impl TurnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnKind::Hint => "hint",
            TurnKind::Prompt => "prompt",
            TurnKind::Retry => "retry",
            TurnKind::Advance => "advance",
        }
    }
}

/// Selectable hint offered after a rejected answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintButton {
    pub id: String,
    pub label: String,
}

/// Engine output for one turn
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub kind: TurnKind,
    pub role: String,
    pub prompt: String,
    pub next: String,
    pub context: SessionContext,
    pub send_text: Option<String>,
    pub hints: Option<Vec<HintButton>>,
}

impl Reply {
    fn at(node: &Node, kind: TurnKind, prompt: String, context: SessionContext) -> Self {
        Self {
            kind,
            role: node.role.clone(),
            prompt,
            next: node.key.clone(),
            context,
            send_text: None,
            hints: None,
        }
    }

    pub fn is_retry(&self) -> bool {
        self.kind == TurnKind::Retry
    }
}

/// Stateless step evaluator over the flow registry
#[derive(Debug, Clone)]
pub struct ConversationEngine {
    registry: Arc<FlowRegistry>,
}

impl ConversationEngine {
    pub fn new(registry: Arc<FlowRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FlowRegistry {
        &self.registry
    }

    /// Evaluate a turn
    pub fn respond(&self, turn: ChatTurn) -> Result<Reply> {
        self.respond_with_rng(turn, &mut rand::thread_rng())
    }

    /// Evaluate a turn with an explicit source of randomness for retry phrasing
    pub fn respond_with_rng<R: Rng + ?Sized>(&self, turn: ChatTurn, rng: &mut R) -> Result<Reply> {
        let flow = self.registry.lookup(&turn.keyword)?;
        // Unknown positions, including the start pseudo-state, resume at the first step
        let node = flow.map.resolve(&turn.step);
        let ChatTurn { answer, context, hint_index, .. } = turn;

        if let Some(index) = hint_index.filter(|index| !index.is_nan()) {
            return Ok(hint_reply(node, index, context));
        }

        let answer = answer.trim();
        if answer.is_empty() {
            // The summary node has no fixed text of its own
            let prompt = if node.key == SUMMARY_KEY {
                flow.summarize(&context, answer)
            } else {
                node.prompt.clone()
            };
            return Ok(Reply::at(node, TurnKind::Prompt, prompt, context));
        }

        if !node.accepts(answer) {
            return Ok(retry_reply(node, context, rng));
        }

        Ok(advance(flow, node, answer, context))
    }
}

fn hint_reply(node: &Node, index: f64, context: SessionContext) -> Reply {
    let prompt = match node.hint(index) {
        Some(hint) => format!("🔍 ヒント{}：{}", index as usize + 1, hint),
        None => NO_HINT_MESSAGE.to_string(),
    };
    Reply::at(node, TurnKind::Hint, prompt, context)
}

fn retry_reply<R: Rng + ?Sized>(node: &Node, context: SessionContext, rng: &mut R) -> Reply {
    let message = RETRY_MESSAGES.choose(rng).copied().unwrap_or(RETRY_MESSAGES[0]);
    let hints = (0..node.hints.len())
        .map(|idx| HintButton {
            id: idx.to_string(),
            label: format!("ヒント{}", idx + 1),
        })
        .collect();

    let mut reply = Reply::at(
        node,
        TurnKind::Retry,
        format!("💡 {}\n\n{}", message, RETRY_FOOTER),
        context,
    );
    reply.hints = Some(hints);
    reply
}

fn advance(flow: &Flow, node: &Node, answer: &str, mut context: SessionContext) -> Reply {
    if let Some(capture) = &node.capture {
        context.capture(capture, answer);
    }

    let mut send_text = context.send_text().map(str::to_string);

    let next_key = if flow.map.is_last(&node.key) {
        Some(SUMMARY_KEY)
    } else {
        flow.map.successor(&node.key)
    };

    let (next, role, body) = match next_key.and_then(|key| flow.map.node(key)) {
        Some(next) if next.key == SUMMARY_KEY => {
            let summary = flow.summarize(&context, answer);
            if let Some(short_answer) = &flow.short_answer {
                context.set_send_text(short_answer);
                send_text = Some(short_answer.clone());
            }
            (next.key.clone(), next.role.clone(), summary)
        }
        Some(next) => (next.key.clone(), next.role.clone(), next.prompt.clone()),
        // Past the terminal state: stay put and close politely
        None => (END_KEY.to_string(), node.role.clone(), CLOSING_FALLBACK.to_string()),
    };

    let praise = node.praise.as_deref().unwrap_or(DEFAULT_PRAISE);

    Reply {
        kind: TurnKind::Advance,
        role,
        prompt: format!("{}\n\n{}", praise, body),
        next,
        context,
        send_text,
        hints: None,
    }
}
