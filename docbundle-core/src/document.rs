//! # document: one logical output document
//!
//! A [`Document`] is one canonical form in its different states: the final version,
//! a preview version (before signature), and optionally an addendum that carries
//! whatever did not fit in the template's fixed slots. Multiple documents may share
//! an addendum template; the rendition carries the owning document's filename so the
//! renderer can tell them apart.
//!
//! Whether the addendum is included is recomputed from live answers every time;
//! nothing about overflow is stored on the document.

use std::cell::Cell;
use tracing::{debug, info};

use crate::contract::{Artifact, AssemblyContext, OutputKey, Rendition, RenditionRole, ValueStore};
use crate::error::AssemblyError;
use crate::field::Field;
use crate::fields::FieldCollection;
use crate::value::FieldValue;

#[derive(Debug)]
pub struct Document {
    filename: String,
    enabled: Cell<bool>,
    final_rendition: Rendition,
    preview_rendition: Rendition,
    addendum: Option<Rendition>,
    default_overflow_marker: String,
    overflow_fields: FieldCollection,
}

impl Document {
    /// A document without an addendum, such as a fixed-layout form that can never overflow.
    pub fn new(
        filename: impl Into<String>,
        final_template: impl Into<String>,
        preview_template: impl Into<String>,
    ) -> Self {
        let filename = filename.into();
        Self {
            final_rendition: Rendition::new(filename.as_str(), RenditionRole::Final, final_template),
            preview_rendition: Rendition::new(
                filename.as_str(),
                RenditionRole::Preview,
                preview_template,
            ),
            filename,
            enabled: Cell::new(true),
            addendum: None,
            default_overflow_marker: String::new(),
            overflow_fields: FieldCollection::new(),
        }
    }

    pub fn with_addendum(mut self, template: impl Into<String>) -> Self {
        self.addendum = Some(Rendition::new(
            self.filename.as_str(),
            RenditionRole::Addendum,
            template,
        ));
        self
    }

    pub fn with_overflow_marker(mut self, marker: impl Into<String>) -> Self {
        self.default_overflow_marker = marker.into();
        self
    }

    pub fn with_overflow_fields(mut self, fields: FieldCollection) -> Self {
        self.overflow_fields = fields;
        self
    }

    pub fn with_enabled(self, enabled: bool) -> Self {
        self.enabled.set(enabled);
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Turns the document on or off in every bundle that references it.
    pub fn set_enabled(&self, enabled: bool) {
        debug!(document = %self.filename, enabled, "Document enablement changed");
        self.enabled.set(enabled);
    }

    pub fn has_addendum(&self) -> bool {
        self.addendum.is_some()
    }

    pub fn default_overflow_marker(&self) -> &str {
        &self.default_overflow_marker
    }

    pub fn overflow_fields(&self) -> &FieldCollection {
        &self.overflow_fields
    }

    pub fn overflow_fields_mut(&mut self) -> &mut FieldCollection {
        &mut self.overflow_fields
    }

    pub fn rendition(&self, key: OutputKey) -> &Rendition {
        match key {
            OutputKey::Final => &self.final_rendition,
            OutputKey::Preview => &self.preview_rendition,
        }
    }

    pub fn addendum(&self) -> Option<&Rendition> {
        self.addendum.as_ref()
    }

    /// Fields that currently overflow.
    pub fn overflow(&self, store: &dyn ValueStore) -> Vec<&Field> {
        self.overflow_fields.overflow(store)
    }

    /// Always false for documents without an addendum rendition.
    pub fn needs_addendum(&self, store: &dyn ValueStore) -> bool {
        self.has_addendum() && !self.overflow(store).is_empty()
    }

    /// The renditions that make up this document for `key`: the main one, followed by
    /// the addendum when something overflows.
    pub fn combined_output(&self, key: OutputKey, store: &dyn ValueStore) -> Vec<Rendition> {
        let main = self.rendition(key).clone();
        match &self.addendum {
            Some(addendum) if self.needs_addendum(store) => {
                debug!(document = %self.filename, %key, "Including addendum");
                vec![main, addendum.clone()]
            }
            _ => vec![main],
        }
    }

    /// Renders and merges [`Self::combined_output`] into one file named after the document.
    pub fn as_single_pdf(
        &self,
        key: OutputKey,
        ctx: &AssemblyContext<'_>,
    ) -> Result<Artifact, AssemblyError> {
        let renditions = self.combined_output(key, ctx.store);
        info!(document = %self.filename, %key, parts = renditions.len(), "Assembling document");
        ctx.render_and_merge(&renditions, &self.filename)
    }

    /// The template-safe part of `field_name`, using the document's default marker
    /// unless `marker` is given.
    ///
    /// Asking for a field that was never registered is a setup mistake and fails.
    pub fn safe_value(
        &self,
        field_name: &str,
        marker: Option<&str>,
        store: &dyn ValueStore,
    ) -> Result<FieldValue, AssemblyError> {
        let field = self
            .overflow_fields
            .get(field_name)
            .ok_or_else(|| AssemblyError::UnknownField {
                document: self.filename.clone(),
                field: field_name.to_string(),
            })?;
        let marker = marker.unwrap_or(&self.default_overflow_marker);
        Ok(field.safe_value(marker, store))
    }
}
