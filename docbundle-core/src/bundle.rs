//! # bundle: ordered, nested delivery sets
//!
//! A [`Bundle`] lists documents in the order they are delivered, e.g. a cover page,
//! the main motion, then a notice of interpreter request. Bundles may contain other
//! bundles, so the same documents can be packaged one way for the court and another
//! way for the user.
//!
//! Documents are shared between bundles through `Rc`. Disabling a document therefore
//! removes it from every bundle's flattened output while leaving each bundle's declared
//! structure untouched.
//!
//! A bundle only ever holds children that were fully built before it, so a bundle
//! cannot end up containing itself.

use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

use crate::contract::{Artifact, AssemblyContext, OutputKey, Rendition, ValueStore};
use crate::document::Document;
use crate::error::AssemblyError;

/// A bundle child.
#[derive(Debug, Clone)]
pub enum BundleItem {
    Document(Rc<Document>),
    Bundle(Rc<Bundle>),
}

impl BundleItem {
    pub fn filename(&self) -> &str {
        match self {
            BundleItem::Document(document) => document.filename(),
            BundleItem::Bundle(bundle) => bundle.filename(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            BundleItem::Document(document) => document.is_enabled(),
            BundleItem::Bundle(bundle) => bundle.is_enabled(),
        }
    }

    /// One merged file for this child.
    pub fn as_single_pdf(
        &self,
        key: OutputKey,
        ctx: &AssemblyContext<'_>,
    ) -> Result<Artifact, AssemblyError> {
        match self {
            BundleItem::Document(document) => document.as_single_pdf(key, ctx),
            BundleItem::Bundle(bundle) => bundle.as_single_pdf(key, ctx),
        }
    }
}

impl From<Rc<Document>> for BundleItem {
    fn from(document: Rc<Document>) -> Self {
        BundleItem::Document(document)
    }
}

impl From<Rc<Bundle>> for BundleItem {
    fn from(bundle: Rc<Bundle>) -> Self {
        BundleItem::Bundle(bundle)
    }
}

#[derive(Debug)]
pub struct Bundle {
    filename: String,
    enabled: Cell<bool>,
    items: Vec<BundleItem>,
}

impl Bundle {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            enabled: Cell::new(true),
            items: Vec::new(),
        }
    }

    pub fn with_enabled(self, enabled: bool) -> Self {
        self.enabled.set(enabled);
        self
    }

    pub fn with_item(mut self, item: impl Into<BundleItem>) -> Self {
        self.push(item);
        self
    }

    pub fn push(&mut self, item: impl Into<BundleItem>) {
        self.items.push(item.into());
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Recorded for callers; flattening never consults a bundle's own flag.
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn items(&self) -> &[BundleItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every enabled rendition in the tree, in delivery order.
    ///
    /// Nested bundles are flattened in full; documents are skipped when disabled.
    pub fn flatten(&self, key: OutputKey, store: &dyn ValueStore) -> Vec<Rendition> {
        let mut flat = Vec::new();
        for item in &self.items {
            match item {
                BundleItem::Bundle(bundle) => flat.extend(bundle.flatten(key, store)),
                BundleItem::Document(document) if document.is_enabled() => {
                    flat.extend(document.combined_output(key, store))
                }
                BundleItem::Document(document) => {
                    debug!(bundle = %self.filename, document = %document.filename(), "Skipping disabled document");
                }
            }
        }
        flat
    }

    /// The flattened bundle merged into one file. An empty bundle is passed through
    /// to the concatenator, which rejects it.
    pub fn as_single_pdf(
        &self,
        key: OutputKey,
        ctx: &AssemblyContext<'_>,
    ) -> Result<Artifact, AssemblyError> {
        let renditions = self.flatten(key, ctx.store);
        info!(bundle = %self.filename, %key, parts = renditions.len(), "Assembling bundle");
        ctx.render_and_merge(&renditions, &self.filename)
    }

    pub fn preview(&self, ctx: &AssemblyContext<'_>) -> Result<Artifact, AssemblyError> {
        self.as_single_pdf(OutputKey::Preview, ctx)
    }

    /// One merged file per direct child, regardless of the children's enabled flags.
    pub fn as_pdf_list(
        &self,
        key: OutputKey,
        ctx: &AssemblyContext<'_>,
    ) -> Result<Vec<Artifact>, AssemblyError> {
        info!(bundle = %self.filename, %key, children = self.items.len(), "Assembling per-child outputs");
        self.items
            .iter()
            .map(|item| item.as_single_pdf(key, ctx))
            .collect()
    }
}
