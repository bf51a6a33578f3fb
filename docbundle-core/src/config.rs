//! Declarative description of an interview's output documents and bundles.
//!
//! These are plain serde types; parsing a file into them is left to the caller.
//! [`crate::assembly::Assembly::from_config`] turns them into live structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::fields::{DisplayStyle, FieldRecord};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Appended to truncated text by documents that do not set their own message.
    #[serde(default)]
    pub default_overflow_message: String,
    #[serde(default)]
    pub documents: Vec<DocumentConfig>,
    #[serde(default)]
    pub bundles: Vec<BundleConfig>,
    /// Role name (e.g. `court_bundle`) to bundle id.
    #[serde(default)]
    pub roles: BTreeMap<String, String>,
}

impl AssemblyConfig {
    pub fn trace_loaded(&self) {
        info!(
            documents = self.documents.len(),
            bundles = self.bundles.len(),
            roles = self.roles.len(),
            "Loaded AssemblyConfig"
        );
        debug!(?self, "AssemblyConfig loaded (full debug)");
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub id: String,
    pub filename: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub overflow_message: Option<String>,
    #[serde(default)]
    pub display_style: DisplayStyle,
    pub templates: TemplateConfig,
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
}

/// Attachment block names for each rendition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(rename = "final")]
    pub final_template: String,
    pub preview: String,
    /// Leave unset for documents that can never overflow.
    #[serde(default)]
    pub addendum: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    pub id: String,
    pub filename: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub items: Vec<ItemRef>,
}

/// A bundle child, referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemRef {
    Document { id: String },
    Bundle { id: String },
}

fn enabled_by_default() -> bool {
    true
}
