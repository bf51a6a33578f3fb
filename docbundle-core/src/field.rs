//! A single overflow-tracked field.

use crate::contract::ValueStore;
use crate::value::FieldValue;

/// One interview variable and the length that fits in its template slot.
///
/// Values are read from the [`ValueStore`] on every call so late answers are
/// always reflected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    overflow_trigger: usize,
    headers: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, overflow_trigger: usize) -> Self {
        Self {
            name: name.into(),
            overflow_trigger,
            headers: Vec::new(),
        }
    }

    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overflow_trigger(&self) -> usize {
        self.overflow_trigger
    }

    /// Column labels for showing a list value as a table in an addendum.
    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    pub fn is_defined(&self, store: &dyn ValueStore) -> bool {
        store.lookup(&self.name).is_some()
    }

    /// The stored value, or empty text while the variable is unset.
    pub fn full_value(&self, store: &dyn ValueStore) -> FieldValue {
        store.lookup(&self.name).unwrap_or_default()
    }

    /// The part beyond the trigger. Empty when the value fits.
    pub fn overflow_value(&self, store: &dyn ValueStore) -> FieldValue {
        let value = self.full_value(store);
        if value.len() > self.overflow_trigger {
            value.tail(self.overflow_trigger)
        } else {
            value.empty_like()
        }
    }

    /// The part that fits in the template. `marker` is appended only to text
    /// that was actually cut.
    pub fn safe_value(&self, marker: &str, store: &dyn ValueStore) -> FieldValue {
        let value = self.full_value(store);
        if value.len() <= self.overflow_trigger {
            return value;
        }
        match value.head(self.overflow_trigger) {
            FieldValue::Text(mut text) => {
                text.push_str(marker);
                FieldValue::Text(text)
            }
            list => list,
        }
    }

    /// Display form of the full value.
    pub fn text(&self, store: &dyn ValueStore) -> String {
        self.full_value(store).to_string()
    }
}
