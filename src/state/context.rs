//! Session context
//!
//! Captured answers accumulated over one traversal of one flow. The context is
//! owned by the client and round-tripped with every request; the engine only
//! ever adds or overwrites entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved key holding the finalized hand-off text
pub const SEND_TEXT_KEY: &str = "__sendText";

/// Capture-key to answer mapping for one traversal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionContext {
    entries: Map<String, Value>,
}

impl SessionContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a client-supplied value; anything but a JSON object becomes empty
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(entries) => Self { entries },
            _ => Self::default(),
        }
    }

    /// Store an accepted answer, overwriting any previous value
    pub fn capture(&mut self, key: &str, answer: &str) {
        self.entries.insert(key.to_string(), Value::String(answer.to_string()));
    }

    /// Get a string entry
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Hand-off text finalized at the summary, if any
    pub fn send_text(&self) -> Option<&str> {
        self.get_str(SEND_TEXT_KEY).filter(|text| !text.is_empty())
    }

    pub fn set_send_text(&mut self, text: &str) {
        self.capture(SEND_TEXT_KEY, text);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        let context = SessionContext::from_value(json!({"page": "17", "n": 3}));
        assert_eq!(context.get_str("page"), Some("17"));
        assert_eq!(context.get_str("n"), None);
        assert_eq!(context.len(), 2);

        assert!(SessionContext::from_value(json!([1, 2])).is_empty());
        assert!(SessionContext::from_value(json!("text")).is_empty());
        assert!(SessionContext::from_value(Value::Null).is_empty());
    }

    #[test]
    fn test_capture_overwrites() {
        let mut context = SessionContext::new();
        context.capture("page", "5");
        context.capture("page", "17");
        assert_eq!(context.get_str("page"), Some("17"));
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn test_send_text_slot() {
        let mut context = SessionContext::new();
        assert_eq!(context.send_text(), None);

        context.set_send_text("答え");
        assert_eq!(context.send_text(), Some("答え"));
        assert!(context.contains_key(SEND_TEXT_KEY));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut context = SessionContext::new();
        context.capture("group", "篝森山を守る会");

        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(value, json!({"group": "篝森山を守る会"}));

        let back: SessionContext = serde_json::from_value(value).unwrap();
        assert_eq!(back, context);
    }
}
