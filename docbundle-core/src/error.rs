use crate::contract::{RenditionRole, ServiceError};

/// Every failure this crate reports.
///
/// Configuration mistakes (duplicate or unknown names, cycles) are surfaced when an
/// assembly is set up. Service failures are wrapped with the name of what was being built.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("field '{name}' is already registered")]
    DuplicateField { name: String },

    #[error("field '{name}' needs a positive overflow trigger")]
    InvalidOverflowTrigger { name: String },

    #[error("'{name}' is not a valid variable name")]
    InvalidFieldName { name: String },

    #[error("document '{document}' has no overflow field named '{field}'")]
    UnknownField { document: String, field: String },

    #[error("document '{id}' referenced by bundle '{bundle}' is not defined")]
    UnknownDocument { id: String, bundle: String },

    #[error("bundle '{id}' referenced by '{referenced_by}' is not defined")]
    UnknownBundle { id: String, referenced_by: String },

    #[error("no bundle is registered for role '{role}'")]
    UnknownBundleRole { role: String },

    #[error("document id '{id}' is defined more than once")]
    DuplicateDocument { id: String },

    #[error("bundle id '{id}' is defined more than once")]
    DuplicateBundle { id: String },

    #[error("bundle cycle: {path}")]
    BundleCycle { path: String },

    #[error("rendering the {role} rendition of '{document}' failed: {source}")]
    Render {
        document: String,
        role: RenditionRole,
        #[source]
        source: ServiceError,
    },

    #[error("concatenating '{output}' failed: {source}")]
    Concatenate {
        output: String,
        #[source]
        source: ServiceError,
    },
}
