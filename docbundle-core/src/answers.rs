//! In-memory interview answers backed by a JSON object.

use serde_json::{Map, Value};
use tracing::debug;

use crate::contract::ValueStore;
use crate::path::{self, Segment};
use crate::value::FieldValue;

/// A [`ValueStore`] over a JSON object of answers.
///
/// A name is looked up as a literal top-level key first, then as a path:
/// `users[0].name.first` walks `users`, its first element, then `name` and `first`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerStore {
    answers: Map<String, Value>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(answers: Map<String, Value>) -> Self {
        Self { answers }
    }

    /// Parses a JSON object. Anything other than an object is rejected.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let answers: Map<String, Value> = serde_json::from_str(json)?;
        debug!(top_level_keys = answers.len(), "Parsed interview answers");
        Ok(Self { answers })
    }

    /// Sets a top-level answer.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.answers.insert(name.into(), value.into());
    }

    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.answers.remove(name)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    fn resolve(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.answers.get(name) {
            return Some(value);
        }
        let segments = path::parse(name)?;
        let (first, rest) = segments.split_first()?;
        let Segment::Key(root) = first else {
            return None;
        };
        let mut current = self.answers.get(*root)?;
        for segment in rest {
            current = match segment {
                Segment::Key(key) => current.get(*key)?,
                Segment::Index(index) => current.get(*index)?,
            };
        }
        Some(current)
    }
}

impl ValueStore for AnswerStore {
    fn lookup(&self, name: &str) -> Option<FieldValue> {
        self.resolve(name).and_then(FieldValue::from_json)
    }
}
