//! The value of a single interview variable, as seen by overflow logic.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A variable's value: either text, measured in characters, or an ordered
/// sequence, measured in elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<Value>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Converts a stored JSON answer. `null` means the variable is unset.
    pub fn from_json(value: &Value) -> Option<FieldValue> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Array(items) => Some(FieldValue::List(items.clone())),
            Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
            Value::Number(n) => Some(FieldValue::Text(n.to_string())),
            Value::Object(_) => Some(FieldValue::Text(value.to_string())),
        }
    }

    /// Length in chars for text, in elements for lists.
    pub fn len(&self) -> usize {
        match self {
            FieldValue::Text(s) => s.chars().count(),
            FieldValue::List(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FieldValue::Text(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// The first `n` chars or elements.
    pub fn head(&self, n: usize) -> FieldValue {
        match self {
            FieldValue::Text(s) => FieldValue::Text(s.chars().take(n).collect()),
            FieldValue::List(items) => FieldValue::List(items.iter().take(n).cloned().collect()),
        }
    }

    /// Everything after the first `n` chars or elements.
    pub fn tail(&self, n: usize) -> FieldValue {
        match self {
            FieldValue::Text(s) => FieldValue::Text(s.chars().skip(n).collect()),
            FieldValue::List(items) => FieldValue::List(items.iter().skip(n).cloned().collect()),
        }
    }

    /// An empty value of the same kind.
    pub fn empty_like(&self) -> FieldValue {
        match self {
            FieldValue::Text(_) => FieldValue::Text(String::new()),
            FieldValue::List(_) => FieldValue::List(Vec::new()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::List(items) => {
                let rendered: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                f.write_str(&rendered.join(", "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<Value>> for FieldValue {
    fn from(items: Vec<Value>) -> Self {
        FieldValue::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_is_sliced_on_char_boundaries() {
        let value = FieldValue::from("Zoë Ångström");
        assert_eq!(value.len(), 12);
        assert_eq!(value.head(3), FieldValue::from("Zoë"));
        assert_eq!(value.tail(4), FieldValue::from("Ångström"));
    }

    #[test]
    fn json_scalars_become_text_and_null_is_unset() {
        assert_eq!(FieldValue::from_json(&json!(42)), Some(FieldValue::from("42")));
        assert_eq!(FieldValue::from_json(&json!(true)), Some(FieldValue::from("true")));
        assert_eq!(FieldValue::from_json(&json!(null)), None);
        assert_eq!(
            FieldValue::from_json(&json!(["a", "b"])),
            Some(FieldValue::List(vec![json!("a"), json!("b")]))
        );
    }

    #[test]
    fn list_display_joins_items() {
        let value = FieldValue::List(vec![json!("Ann"), json!(3)]);
        assert_eq!(value.to_string(), "Ann, 3");
    }
}
