//! Bundles grouped by delivery role.

use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::info;

use crate::bundle::Bundle;
use crate::contract::{Artifact, AssemblyContext, OutputKey};
use crate::error::AssemblyError;

/// Role of the bundle filed with the court.
pub const COURT_BUNDLE: &str = "court_bundle";
/// Role of the bundle given to the person using the interview.
pub const USER_BUNDLE: &str = "user_bundle";

/// Named bundles, e.g. one combination for the court and one for the user.
#[derive(Debug, Clone, Default)]
pub struct BundleSet {
    bundles: BTreeMap<String, Rc<Bundle>>,
}

impl BundleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: impl Into<String>, bundle: Rc<Bundle>) -> Option<Rc<Bundle>> {
        self.bundles.insert(role.into(), bundle)
    }

    pub fn get(&self, role: &str) -> Option<&Rc<Bundle>> {
        self.bundles.get(role)
    }

    pub fn bundle(&self, role: &str) -> Result<&Rc<Bundle>, AssemblyError> {
        self.get(role).ok_or_else(|| AssemblyError::UnknownBundleRole {
            role: role.to_string(),
        })
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// The role's bundle as one preview file, suitable for showing before signature.
    pub fn preview(&self, role: &str, ctx: &AssemblyContext<'_>) -> Result<Artifact, AssemblyError> {
        info!(role, "Building preview");
        self.bundle(role)?.preview(ctx)
    }

    /// The role's final documents, one file per direct child, e.g. to attach to an email.
    pub fn as_attachment_list(
        &self,
        role: &str,
        ctx: &AssemblyContext<'_>,
    ) -> Result<Vec<Artifact>, AssemblyError> {
        info!(role, "Building attachment list");
        self.bundle(role)?.as_pdf_list(OutputKey::Final, ctx)
    }

    pub fn user_preview(&self, ctx: &AssemblyContext<'_>) -> Result<Artifact, AssemblyError> {
        self.preview(USER_BUNDLE, ctx)
    }

    pub fn court_attachments(&self, ctx: &AssemblyContext<'_>) -> Result<Vec<Artifact>, AssemblyError> {
        self.as_attachment_list(COURT_BUNDLE, ctx)
    }
}
