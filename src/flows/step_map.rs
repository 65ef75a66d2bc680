//! Step map construction
//!
//! Turns an ordered list of step definitions into keyed nodes with linear
//! successor links, followed by the fixed `summary -> confirm -> end` tail.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::warn;

use crate::utils::errors::{NaviChatError, Result};

/// Pseudo-state a fresh traversal starts from
pub const START_KEY: &str = "_start";
pub const SUMMARY_KEY: &str = "summary";
pub const CONFIRM_KEY: &str = "confirm";
pub const END_KEY: &str = "end";

pub const DEFAULT_ROLE: &str = "nAVi";
pub const DEFAULT_CONFIRM_TOKEN: &str = "送信";
pub const DEFAULT_CONFIRM_PROMPT: &str = "この内容で奇録会に送信する準備ができました。よければ「LINEで送る」をタップしてください。（PCの場合は、クリップボードに送信内容がコピーされます。）";
pub const DEFAULT_END_PROMPT: &str = "ありがとうございます。あなたの整理した回答を、奇録会への報告に反映しておきますね。";

/// Never shown; the flow's summary builder replaces it at traversal time
const SUMMARY_PLACEHOLDER: &str = "(dynamic)";

/// Static definition of one question step
#[derive(Debug, Clone, Copy, Default)]
pub struct StepSpec {
    /// Question shown to the player
    pub prompt: &'static str,
    /// Patterns that must all match the trimmed answer; empty accepts anything
    pub expect: &'static [&'static str],
    /// Context key the accepted answer is stored under
    pub capture: Option<&'static str>,
    /// Acknowledgment prepended to the next prompt
    pub praise: Option<&'static str>,
    pub hints: &'static [&'static str],
}

/// Optional overrides for the synthesized tail nodes
#[derive(Debug, Clone, Default)]
pub struct TailLabels {
    pub role: Option<String>,
    pub confirm_token: Option<String>,
    pub confirm_prompt: Option<String>,
    pub end_prompt: Option<String>,
}

/// Compiled answer check for a node
#[derive(Debug, Clone)]
pub struct Validation {
    patterns: Vec<Regex>,
}

impl Validation {
    /// Compile a step's patterns; `None` when the step takes free-form input
    pub fn compile(step: &str, sources: &[&str]) -> Result<Option<Self>> {
        if sources.is_empty() {
            return Ok(None);
        }

        let patterns = sources
            .iter()
            .map(|source| {
                Regex::new(source).map_err(|source| NaviChatError::InvalidPattern {
                    step: step.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Self { patterns }))
    }

    /// Exact, whole-string match of a literal token
    pub fn exact(step: &str, token: &str) -> Result<Self> {
        let source = format!("^{}$", regex::escape(token));
        let pattern = Regex::new(&source).map_err(|source| NaviChatError::InvalidPattern {
            step: step.to_string(),
            source,
        })?;

        Ok(Self { patterns: vec![pattern] })
    }

    /// Unanchored, case-sensitive test; every pattern must match
    pub fn accepts(&self, answer: &str) -> bool {
        self.patterns.iter().all(|pattern| pattern.is_match(answer))
    }
}

/// A single state in a flow
#[derive(Debug, Clone)]
pub struct Node {
    pub key: String,
    pub role: String,
    pub prompt: String,
    pub validation: Option<Validation>,
    pub capture: Option<String>,
    pub praise: Option<String>,
    pub hints: Vec<String>,
}

impl Node {
    fn tail(key: &str, role: &str, prompt: &str, validation: Option<Validation>) -> Self {
        Self {
            key: key.to_string(),
            role: role.to_string(),
            prompt: prompt.to_string(),
            validation,
            capture: None,
            praise: None,
            hints: Vec::new(),
        }
    }

    /// Whether an answer satisfies this node; nodes without a check accept anything
    pub fn accepts(&self, answer: &str) -> bool {
        self.validation
            .as_ref()
            .map(|validation| validation.accepts(answer))
            .unwrap_or(true)
    }

    /// Hint at a zero-based index; negative or fractional indices find nothing
    pub fn hint(&self, index: f64) -> Option<&str> {
        if !index.is_finite() || index < 0.0 || index.fract() != 0.0 {
            return None;
        }
        self.hints.get(index as usize).map(String::as_str)
    }
}

/// Keyed nodes plus canonical order and successor links
#[derive(Debug, Clone)]
pub struct StepMap {
    nodes: HashMap<String, Node>,
    order: Vec<String>,
    successors: HashMap<String, String>,
}

impl StepMap {
    /// Build the node graph for a flow
    pub fn build(steps: &[StepSpec], tail: &TailLabels) -> Result<Self> {
        if steps.is_empty() {
            return Err(NaviChatError::InvalidFlow(
                "A flow needs at least one step".to_string(),
            ));
        }

        let role = tail.role.as_deref().unwrap_or(DEFAULT_ROLE);
        let mut nodes = HashMap::with_capacity(steps.len() + 3);
        let mut order = Vec::with_capacity(steps.len());
        let mut successors = HashMap::with_capacity(steps.len() + 2);
        let mut captures = HashSet::new();

        for (idx, spec) in steps.iter().enumerate() {
            let key = format!("s{}", idx + 1);

            if let Some(capture) = spec.capture {
                if !captures.insert(capture) {
                    warn!(step = %key, capture = capture, "Capture key reused within flow; earlier answer will be overwritten");
                }
            }

            nodes.insert(key.clone(), Node {
                key: key.clone(),
                role: role.to_string(),
                prompt: spec.prompt.to_string(),
                validation: Validation::compile(&key, spec.expect)?,
                capture: spec.capture.map(str::to_string),
                praise: spec.praise.map(str::to_string),
                hints: spec.hints.iter().map(|hint| hint.to_string()).collect(),
            });

            if idx + 1 < steps.len() {
                successors.insert(key.clone(), format!("s{}", idx + 2));
            }
            order.push(key);
        }

        let token = tail.confirm_token.as_deref().unwrap_or(DEFAULT_CONFIRM_TOKEN);
        let confirm_prompt = tail.confirm_prompt.as_deref().unwrap_or(DEFAULT_CONFIRM_PROMPT);
        let end_prompt = tail.end_prompt.as_deref().unwrap_or(DEFAULT_END_PROMPT);

        nodes.insert(SUMMARY_KEY.to_string(), Node::tail(SUMMARY_KEY, role, SUMMARY_PLACEHOLDER, None));
        nodes.insert(
            CONFIRM_KEY.to_string(),
            Node::tail(CONFIRM_KEY, role, confirm_prompt, Some(Validation::exact(CONFIRM_KEY, token)?)),
        );
        nodes.insert(END_KEY.to_string(), Node::tail(END_KEY, role, end_prompt, None));

        if let Some(last) = order.last() {
            successors.insert(last.clone(), SUMMARY_KEY.to_string());
        }
        successors.insert(SUMMARY_KEY.to_string(), CONFIRM_KEY.to_string());
        successors.insert(CONFIRM_KEY.to_string(), END_KEY.to_string());

        Ok(Self { nodes, order, successors })
    }

    pub fn node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Look up a node, falling back to the first step for unknown keys
    pub fn resolve(&self, key: &str) -> &Node {
        self.nodes.get(key).unwrap_or_else(|| self.first())
    }

    pub fn first(&self) -> &Node {
        // build() rejects empty step lists, so the first key always exists
        &self.nodes[&self.order[0]]
    }

    pub fn first_key(&self) -> &str {
        &self.order[0]
    }

    pub fn is_last(&self, key: &str) -> bool {
        self.order.last().map(|last| last == key).unwrap_or(false)
    }

    pub fn successor(&self, key: &str) -> Option<&str> {
        self.successors.get(key).map(String::as_str)
    }

    /// Question step keys in traversal order (tail nodes excluded)
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Number of question steps
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
