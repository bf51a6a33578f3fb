//! # assembly: resolving an [`AssemblyConfig`] into documents, bundles and roles
//!
//! Resolution is where every configuration mistake surfaces: duplicate ids, dangling
//! references, malformed or duplicate field names, and bundles that contain themselves.
//! Bundles are built children-first, so a cycle is reported with its path before any
//! bundle exists.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use tracing::{debug, error, info};

use crate::bundle::Bundle;
use crate::bundle_set::BundleSet;
use crate::config::{AssemblyConfig, BundleConfig, DocumentConfig, ItemRef};
use crate::document::Document;
use crate::error::AssemblyError;
use crate::fields::FieldCollection;

/// All documents and bundles of one interview, by id, plus the role map.
#[derive(Debug, Default)]
pub struct Assembly {
    documents: BTreeMap<String, Rc<Document>>,
    bundles: BTreeMap<String, Rc<Bundle>>,
    roles: BundleSet,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl Assembly {
    pub fn from_config(config: &AssemblyConfig) -> Result<Self, AssemblyError> {
        info!(
            documents = config.documents.len(),
            bundles = config.bundles.len(),
            "Resolving assembly"
        );
        let documents = build_documents(config)?;
        let bundles = build_bundles(&config.bundles, &documents)?;

        let mut roles = BundleSet::new();
        for (role, bundle_id) in &config.roles {
            let bundle = bundles.get(bundle_id).ok_or_else(|| {
                error!(role = %role, bundle = %bundle_id, "Role points at an undefined bundle");
                AssemblyError::UnknownBundle {
                    id: bundle_id.clone(),
                    referenced_by: format!("role {role}"),
                }
            })?;
            roles.insert(role.clone(), Rc::clone(bundle));
        }

        info!(roles = roles.len(), "Assembly resolved");
        Ok(Self {
            documents,
            bundles,
            roles,
        })
    }

    pub fn document(&self, id: &str) -> Option<&Rc<Document>> {
        self.documents.get(id)
    }

    pub fn bundle(&self, id: &str) -> Option<&Rc<Bundle>> {
        self.bundles.get(id)
    }

    pub fn documents(&self) -> impl Iterator<Item = (&str, &Rc<Document>)> {
        self.documents.iter().map(|(id, document)| (id.as_str(), document))
    }

    pub fn bundles(&self) -> impl Iterator<Item = (&str, &Rc<Bundle>)> {
        self.bundles.iter().map(|(id, bundle)| (id.as_str(), bundle))
    }

    pub fn roles(&self) -> &BundleSet {
        &self.roles
    }
}

fn build_documents(
    config: &AssemblyConfig,
) -> Result<BTreeMap<String, Rc<Document>>, AssemblyError> {
    let mut documents = BTreeMap::new();
    for doc_config in &config.documents {
        if documents.contains_key(&doc_config.id) {
            return Err(AssemblyError::DuplicateDocument {
                id: doc_config.id.clone(),
            });
        }
        let document = build_document(doc_config, &config.default_overflow_message)?;
        documents.insert(doc_config.id.clone(), Rc::new(document));
    }
    Ok(documents)
}

fn build_document(config: &DocumentConfig, default_message: &str) -> Result<Document, AssemblyError> {
    let fields = FieldCollection::from_records(&config.fields)
        .map_err(|e| {
            error!(document = %config.id, error = %e, "Invalid overflow fields");
            e
        })?
        .with_display_style(config.display_style);
    let marker = config.overflow_message.as_deref().unwrap_or(default_message);

    let mut document = Document::new(
        config.filename.as_str(),
        config.templates.final_template.as_str(),
        config.templates.preview.as_str(),
    )
    .with_overflow_marker(marker)
    .with_overflow_fields(fields)
    .with_enabled(config.enabled);
    if let Some(addendum) = &config.templates.addendum {
        document = document.with_addendum(addendum.as_str());
    }
    debug!(
        document = %config.id,
        fields = document.overflow_fields().len(),
        has_addendum = document.has_addendum(),
        "Built document"
    );
    Ok(document)
}

fn build_bundles(
    configs: &[BundleConfig],
    documents: &BTreeMap<String, Rc<Document>>,
) -> Result<BTreeMap<String, Rc<Bundle>>, AssemblyError> {
    let mut by_id: HashMap<&str, &BundleConfig> = HashMap::new();
    for config in configs {
        if by_id.insert(config.id.as_str(), config).is_some() {
            return Err(AssemblyError::DuplicateBundle {
                id: config.id.clone(),
            });
        }
    }

    let mut marks = HashMap::new();
    let mut order = Vec::with_capacity(configs.len());
    for config in configs {
        let mut path = Vec::new();
        visit(config.id.as_str(), &by_id, &mut marks, &mut path, &mut order)?;
    }

    let mut bundles: BTreeMap<String, Rc<Bundle>> = BTreeMap::new();
    for id in order {
        let Some(&config) = by_id.get(id) else {
            continue;
        };
        let mut bundle = Bundle::new(config.filename.as_str()).with_enabled(config.enabled);
        for item in &config.items {
            match item {
                ItemRef::Document { id: doc_id } => {
                    let document =
                        documents
                            .get(doc_id)
                            .ok_or_else(|| AssemblyError::UnknownDocument {
                                id: doc_id.clone(),
                                bundle: config.id.clone(),
                            })?;
                    bundle.push(Rc::clone(document));
                }
                ItemRef::Bundle { id: child_id } => {
                    let child =
                        bundles
                            .get(child_id)
                            .ok_or_else(|| AssemblyError::UnknownBundle {
                                id: child_id.clone(),
                                referenced_by: config.id.clone(),
                            })?;
                    bundle.push(Rc::clone(child));
                }
            }
        }
        debug!(bundle = %config.id, items = bundle.len(), "Built bundle");
        bundles.insert(config.id.clone(), Rc::new(bundle));
    }
    Ok(bundles)
}

/// Depth-first post-order over bundle references; children land in `order` before parents.
fn visit<'c>(
    id: &'c str,
    by_id: &HashMap<&'c str, &'c BundleConfig>,
    marks: &mut HashMap<&'c str, Mark>,
    path: &mut Vec<&'c str>,
    order: &mut Vec<&'c str>,
) -> Result<(), AssemblyError> {
    match marks.get(id) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = path.iter().position(|step| *step == id).unwrap_or(0);
            let mut cycle: Vec<&str> = path[start..].to_vec();
            cycle.push(id);
            let path = cycle.join(" -> ");
            error!(cycle = %path, "Bundle contains itself");
            return Err(AssemblyError::BundleCycle { path });
        }
        None => {}
    }

    let Some(&config) = by_id.get(id) else {
        let referenced_by = path.last().copied().unwrap_or(id).to_string();
        return Err(AssemblyError::UnknownBundle {
            id: id.to_string(),
            referenced_by,
        });
    };

    marks.insert(id, Mark::Visiting);
    path.push(id);
    for item in &config.items {
        if let ItemRef::Bundle { id: child } = item {
            visit(child.as_str(), by_id, marks, path, order)?;
        }
    }
    path.pop();
    marks.insert(id, Mark::Done);
    order.push(id);
    Ok(())
}
