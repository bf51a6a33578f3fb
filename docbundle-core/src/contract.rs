//! # contract: the external services this crate coordinates
//!
//! Three collaborators sit outside the crate and are reached only through the traits here:
//! - [`ValueStore`]: the interview runtime's answers. An unset variable is `None`, never an error.
//! - [`Renderer`]: turns one [`Rendition`] (a named attachment block for a document) into an [`Artifact`].
//! - [`Concatenator`]: merges an ordered list of artifacts into one output file.
//!
//! ## Mocking & Testing
//! - Every trait is annotated for `mockall`; the mocks are exported under the
//!   `test-export-mocks` feature so integration tests can use them.
//!
//! ## Errors
//! - Service failures are boxed ([`ServiceError`]) and wrapped by the caller into
//!   [`AssemblyError`] with the document or output name attached.

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info};

use crate::error::AssemblyError;
use crate::value::FieldValue;

/// Error type returned by the external services.
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;

/// One rendered file. The content is opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Which of a document's attachment blocks a rendition refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenditionRole {
    Final,
    Preview,
    Addendum,
}

impl fmt::Display for RenditionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenditionRole::Final => "final",
            RenditionRole::Preview => "preview",
            RenditionRole::Addendum => "addendum",
        })
    }
}

/// The key a caller asks output for. The addendum is never asked for directly;
/// it rides along with whichever main rendition is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKey {
    #[default]
    Final,
    Preview,
}

impl OutputKey {
    pub fn role(self) -> RenditionRole {
        match self {
            OutputKey::Final => RenditionRole::Final,
            OutputKey::Preview => RenditionRole::Preview,
        }
    }
}

impl fmt::Display for OutputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.role().fmt(f)
    }
}

impl FromStr for OutputKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "final" => Ok(OutputKey::Final),
            "preview" => Ok(OutputKey::Preview),
            other => Err(format!(
                "unknown output key '{other}', expected 'final' or 'preview'"
            )),
        }
    }
}

/// Descriptor handed to the [`Renderer`]: which template, for which document, in which role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendition {
    /// Output filename of the owning document.
    pub document: String,
    pub role: RenditionRole,
    /// Name of the attachment block to render.
    pub template: String,
}

impl Rendition {
    pub fn new(document: impl Into<String>, role: RenditionRole, template: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            role,
            template: template.into(),
        }
    }
}

/// Read access to the interview's answers.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait ValueStore {
    /// The current value of `name`, or `None` while it is unset.
    fn lookup(&self, name: &str) -> Option<FieldValue>;
}

/// Renders a single attachment block. Must be deterministic for identical input.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Renderer {
    fn render(&self, rendition: &Rendition) -> Result<Artifact, ServiceError>;
}

/// Merges artifacts, in order, into one file named `output_name`.
/// Implementations must fail on an empty `parts` list.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Concatenator {
    fn concatenate(&self, parts: &[Artifact], output_name: &str)
        -> Result<Artifact, ServiceError>;
}

/// The three services needed to turn renditions into files.
#[derive(Clone, Copy)]
pub struct AssemblyContext<'a> {
    pub store: &'a dyn ValueStore,
    pub renderer: &'a dyn Renderer,
    pub concatenator: &'a dyn Concatenator,
}

impl<'a> AssemblyContext<'a> {
    pub fn new(
        store: &'a dyn ValueStore,
        renderer: &'a dyn Renderer,
        concatenator: &'a dyn Concatenator,
    ) -> Self {
        Self {
            store,
            renderer,
            concatenator,
        }
    }

    /// Renders every rendition in order and merges the results into `output_name`.
    pub fn render_and_merge(
        &self,
        renditions: &[Rendition],
        output_name: &str,
    ) -> Result<Artifact, AssemblyError> {
        let mut parts = Vec::with_capacity(renditions.len());
        for rendition in renditions {
            debug!(
                document = %rendition.document,
                role = %rendition.role,
                template = %rendition.template,
                "Rendering attachment"
            );
            let artifact = self.renderer.render(rendition).map_err(|source| {
                error!(document = %rendition.document, role = %rendition.role, error = %source, "Rendering failed");
                AssemblyError::Render {
                    document: rendition.document.clone(),
                    role: rendition.role,
                    source,
                }
            })?;
            parts.push(artifact);
        }

        let merged = self
            .concatenator
            .concatenate(&parts, output_name)
            .map_err(|source| {
                error!(output = output_name, parts = parts.len(), error = %source, "Concatenation failed");
                AssemblyError::Concatenate {
                    output: output_name.to_string(),
                    source,
                }
            })?;
        info!(output = output_name, parts = parts.len(), "Merged output");
        Ok(merged)
    }
}
