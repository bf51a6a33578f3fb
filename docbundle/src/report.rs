//! Serializable views of an assembly printed by the CLI.

use docbundle_core::assembly::Assembly;
use docbundle_core::bundle::{Bundle, BundleItem};
use docbundle_core::contract::{OutputKey, Rendition, ValueStore};
use docbundle_core::document::Document;
use docbundle_core::value::FieldValue;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub documents: Vec<DocumentSummary>,
    pub bundles: Vec<BundleSummary>,
    pub roles: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub filename: String,
    pub enabled: bool,
    pub has_addendum: bool,
    pub fields: usize,
}

#[derive(Debug, Serialize)]
pub struct BundleSummary {
    pub id: String,
    pub filename: String,
    pub children: Vec<String>,
}

impl CheckSummary {
    pub fn from_assembly(assembly: &Assembly) -> Self {
        let documents = assembly
            .documents()
            .map(|(id, document)| DocumentSummary {
                id: id.to_string(),
                filename: document.filename().to_string(),
                enabled: document.is_enabled(),
                has_addendum: document.has_addendum(),
                fields: document.overflow_fields().len(),
            })
            .collect();
        let bundles = assembly
            .bundles()
            .map(|(id, bundle)| BundleSummary {
                id: id.to_string(),
                filename: bundle.filename().to_string(),
                children: bundle
                    .items()
                    .iter()
                    .map(|item| item.filename().to_string())
                    .collect(),
            })
            .collect();
        let roles = assembly
            .roles()
            .roles()
            .filter_map(|role| {
                let bundle = assembly.roles().get(role)?;
                Some((role.to_string(), bundle.filename().to_string()))
            })
            .collect();
        Self {
            documents,
            bundles,
            roles,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OverflowReport {
    pub document: String,
    pub filename: String,
    pub needs_addendum: bool,
    pub fields: Vec<FieldReport>,
}

#[derive(Debug, Serialize)]
pub struct FieldReport {
    pub field_name: String,
    pub overflow_trigger: usize,
    pub safe_value: FieldValue,
    pub overflow_value: FieldValue,
}

impl OverflowReport {
    /// Lists the document's fields according to its display style.
    pub fn for_document(id: &str, document: &Document, store: &dyn ValueStore) -> Self {
        let marker = document.default_overflow_marker();
        let fields = document
            .overflow_fields()
            .displayed_fields(store)
            .into_iter()
            .map(|field| FieldReport {
                field_name: field.name().to_string(),
                overflow_trigger: field.overflow_trigger(),
                safe_value: field.safe_value(marker, store),
                overflow_value: field.overflow_value(store),
            })
            .collect();
        Self {
            document: id.to_string(),
            filename: document.filename().to_string(),
            needs_addendum: document.needs_addendum(store),
            fields,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub role: String,
    pub key: OutputKey,
    pub outputs: Vec<PlannedOutput>,
}

/// One file to produce and the renditions merged into it, in order.
#[derive(Debug, Serialize)]
pub struct PlannedOutput {
    pub output: String,
    pub renditions: Vec<Rendition>,
}

impl PlanReport {
    /// The whole bundle as a single output.
    pub fn flattened(role: &str, key: OutputKey, bundle: &Bundle, store: &dyn ValueStore) -> Self {
        Self {
            role: role.to_string(),
            key,
            outputs: vec![PlannedOutput {
                output: bundle.filename().to_string(),
                renditions: bundle.flatten(key, store),
            }],
        }
    }

    /// One output per direct child, matching what an attachment list would hold.
    pub fn per_child(role: &str, key: OutputKey, bundle: &Bundle, store: &dyn ValueStore) -> Self {
        let outputs = bundle
            .items()
            .iter()
            .map(|item| PlannedOutput {
                output: item.filename().to_string(),
                renditions: match item {
                    BundleItem::Document(document) => document.combined_output(key, store),
                    BundleItem::Bundle(nested) => nested.flatten(key, store),
                },
            })
            .collect();
        Self {
            role: role.to_string(),
            key,
            outputs,
        }
    }
}
