//! Flow registry
//!
//! The fixed table of scripted flows, keyed by the keyword a player receives
//! from the official channel. Built once at startup and read-only afterwards.

use std::collections::HashMap;

use tracing::{debug, info};

use super::content;
use super::step_map::{StepMap, StepSpec, TailLabels};
use crate::state::SessionContext;
use crate::utils::errors::{NaviChatError, Result};

/// Produces the summary text from accumulated answers and the last answer
pub type SummaryBuilder = fn(&SessionContext, &str) -> String;

/// Static definition of a flow
#[derive(Debug, Clone, Copy)]
pub struct FlowDefinition {
    pub keyword: &'static str,
    pub steps: &'static [StepSpec],
    pub summary: Option<SummaryBuilder>,
    /// Fixed hand-off text stored once the summary is reached
    pub short_answer: Option<&'static str>,
}

/// A built, immutable flow
#[derive(Debug, Clone)]
pub struct Flow {
    pub keyword: String,
    pub map: StepMap,
    summary_builder: Option<SummaryBuilder>,
    pub short_answer: Option<String>,
}

impl Flow {
    /// Build a flow from its definition
    pub fn build(definition: &FlowDefinition, tail: &TailLabels) -> Result<Self> {
        let map = StepMap::build(definition.steps, tail).map_err(|e| match e {
            NaviChatError::InvalidFlow(reason) => {
                NaviChatError::InvalidFlow(format!("{}: {}", definition.keyword, reason))
            }
            other => other,
        })?;

        Ok(Self {
            keyword: definition.keyword.to_string(),
            map,
            summary_builder: definition.summary,
            short_answer: definition.short_answer.map(str::to_string),
        })
    }

    /// Summary text, using the generic builder when the flow has none
    pub fn summarize(&self, context: &SessionContext, last_answer: &str) -> String {
        let builder = self.summary_builder.unwrap_or(content::default_summary);
        builder(context, last_answer)
    }
}

/// Registry of all flows by keyword
#[derive(Debug, Clone)]
pub struct FlowRegistry {
    flows: HashMap<String, Flow>,
}

impl FlowRegistry {
    /// Create the registry with the built-in flows
    pub fn new(tail: &TailLabels) -> Result<Self> {
        Self::from_definitions(content::definitions(), tail)
    }

    /// Create a registry from explicit definitions
    pub fn from_definitions(definitions: &[FlowDefinition], tail: &TailLabels) -> Result<Self> {
        let mut flows = HashMap::with_capacity(definitions.len());

        for definition in definitions {
            let flow = Flow::build(definition, tail)?;
            debug!(keyword = %flow.keyword, steps = flow.map.len(), "Flow built");

            if flows.insert(flow.keyword.clone(), flow).is_some() {
                return Err(NaviChatError::InvalidFlow(format!(
                    "Duplicate flow keyword: {}",
                    definition.keyword
                )));
            }
        }

        info!(flows = flows.len(), "Flow registry initialized");
        Ok(Self { flows })
    }

    /// Look up a flow by keyword
    pub fn lookup(&self, keyword: &str) -> Result<&Flow> {
        self.flows
            .get(keyword)
            .ok_or_else(|| NaviChatError::FlowNotFound { keyword: keyword.to_string() })
    }

    pub fn get(&self, keyword: &str) -> Option<&Flow> {
        self.flows.get(keyword)
    }

    /// All registered keywords
    pub fn keywords(&self) -> Vec<&str> {
        self.flows.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn echo_summary(context: &SessionContext, last: &str) -> String {
        format!("{}:{}", context.get_str("name").unwrap_or("-"), last)
    }

    const STEPS: &[StepSpec] = &[StepSpec {
        prompt: "name?",
        expect: &[],
        capture: Some("name"),
        praise: None,
        hints: &[],
    }];

    #[test]
    fn test_builtin_registry() {
        let registry = FlowRegistry::new(&TailLabels::default()).unwrap();

        assert_eq!(registry.len(), 4);
        assert!(registry.get("行方不明者の根拠").is_some());
        assert!(registry.get("行方不明者の特徴").is_some());
        assert!(registry.get("行方不明になった場所").is_some());
        assert!(registry.get("真相").is_some());
    }

    #[test]
    fn test_lookup_not_found() {
        let registry = FlowRegistry::new(&TailLabels::default()).unwrap();

        assert_matches!(
            registry.lookup("行方不明者"),
            Err(NaviChatError::FlowNotFound { ref keyword }) if keyword == "行方不明者"
        );
        assert_matches!(registry.lookup(""), Err(NaviChatError::FlowNotFound { .. }));
    }

    #[test]
    fn test_duplicate_keyword_rejected() {
        let definition = FlowDefinition {
            keyword: "dup",
            steps: STEPS,
            summary: None,
            short_answer: None,
        };
        assert_matches!(
            FlowRegistry::from_definitions(&[definition, definition], &TailLabels::default()),
            Err(NaviChatError::InvalidFlow(_))
        );
    }

    #[test]
    fn test_summary_builder_selection() {
        let custom = FlowDefinition {
            keyword: "custom",
            steps: STEPS,
            summary: Some(echo_summary),
            short_answer: Some("short"),
        };
        let plain = FlowDefinition { keyword: "plain", summary: None, ..custom };
        let registry = FlowRegistry::from_definitions(&[custom, plain], &TailLabels::default()).unwrap();

        let mut context = SessionContext::new();
        context.capture("name", "ada");

        let flow = registry.lookup("custom").unwrap();
        assert_eq!(flow.summarize(&context, "ada"), "ada:ada");
        assert_eq!(flow.short_answer.as_deref(), Some("short"));

        let flow = registry.lookup("plain").unwrap();
        assert_eq!(flow.summarize(&context, "ada"), content::default_summary(&context, "ada"));
    }
}
