//! Ordered collections of overflow fields.
//!
//! A [`FieldCollection`] is the list of template slots a document can overflow.
//! Fields are registered once at setup with [`FieldCollection::add_field`]; during
//! rendering the collection answers which of them currently overflow, which is
//! what decides whether a document needs its addendum.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::contract::ValueStore;
use crate::error::AssemblyError;
use crate::field::Field;
use crate::path;

/// Which fields [`FieldCollection::defined_fields`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    /// Only defined fields that currently overflow.
    #[default]
    OverflowOnly,
    /// Every defined field.
    All,
}

/// Bulk-load record for [`FieldCollection::from_records`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub field_name: String,
    pub overflow_trigger: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
}

impl FieldRecord {
    pub fn new(field_name: impl Into<String>, overflow_trigger: usize) -> Self {
        Self {
            field_name: field_name.into(),
            overflow_trigger,
            headers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldCollection {
    fields: Vec<Field>,
    index: HashMap<String, usize>,
    display_style: DisplayStyle,
}

impl FieldCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display_style(mut self, style: DisplayStyle) -> Self {
        self.display_style = style;
        self
    }

    /// Builds a collection from records, keeping their order.
    pub fn from_records(records: &[FieldRecord]) -> Result<Self, AssemblyError> {
        let mut collection = Self::new();
        collection.extend_from_records(records)?;
        Ok(collection)
    }

    pub fn extend_from_records(&mut self, records: &[FieldRecord]) -> Result<(), AssemblyError> {
        for record in records {
            let field = Field::new(record.field_name.as_str(), record.overflow_trigger)
                .with_headers(record.headers.clone());
            self.insert(field)?;
        }
        Ok(())
    }

    /// Registers a new field bound to `name`.
    ///
    /// Fails if the name is already registered, is not a valid variable name,
    /// or if `overflow_trigger` is zero.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        overflow_trigger: usize,
    ) -> Result<&Field, AssemblyError> {
        self.insert(Field::new(name, overflow_trigger))
    }

    fn insert(&mut self, field: Field) -> Result<&Field, AssemblyError> {
        let name = field.name();
        if self.index.contains_key(name) {
            return Err(AssemblyError::DuplicateField {
                name: name.to_string(),
            });
        }
        if !path::is_valid(name) {
            return Err(AssemblyError::InvalidFieldName {
                name: name.to_string(),
            });
        }
        if field.overflow_trigger() == 0 {
            return Err(AssemblyError::InvalidOverflowTrigger {
                name: name.to_string(),
            });
        }
        debug!(field = %name, overflow_trigger = field.overflow_trigger(), "Registered overflow field");
        let position = self.fields.len();
        self.index.insert(name.to_string(), position);
        self.fields.push(field);
        Ok(&self.fields[position])
    }

    pub fn display_style(&self) -> DisplayStyle {
        self.display_style
    }

    pub fn set_display_style(&mut self, style: DisplayStyle) {
        self.display_style = style;
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Defined fields in registration order; with [`DisplayStyle::OverflowOnly`]
    /// only those whose overflow value is non-empty.
    pub fn defined_fields(&self, style: DisplayStyle, store: &dyn ValueStore) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|field| field.is_defined(store))
            .filter(|field| match style {
                DisplayStyle::All => true,
                DisplayStyle::OverflowOnly => !field.overflow_value(store).is_empty(),
            })
            .collect()
    }

    /// The fields that currently overflow their slot.
    pub fn overflow(&self, store: &dyn ValueStore) -> Vec<&Field> {
        self.defined_fields(DisplayStyle::OverflowOnly, store)
    }

    /// [`Self::defined_fields`] using the collection's own display style.
    pub fn displayed_fields(&self, store: &dyn ValueStore) -> Vec<&Field> {
        self.defined_fields(self.display_style, store)
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
