#![doc = "docbundle-core: overflow fields, addenda, documents and nested bundles."]

//! This crate holds the coordination layer between an interview's answers and the
//! services that render and merge its output documents.
//!
//! The building blocks, bottom-up:
//! - [`field::Field`] and [`fields::FieldCollection`]: which answers overflow their template slot.
//! - [`document::Document`]: final/preview renditions plus an optional addendum.
//! - [`bundle::Bundle`] and [`bundle_set::BundleSet`]: ordered, nested delivery sets.
//! - [`assembly::Assembly`]: all of the above resolved from an [`config::AssemblyConfig`].
//!
//! Rendering, merging and answer storage are external; see [`contract`].

pub mod answers;
pub mod assembly;
pub mod bundle;
pub mod bundle_set;
pub mod config;
pub mod contract;
pub mod document;
pub mod error;
pub mod field;
pub mod fields;
mod path;
pub mod value;

pub use error::AssemblyError;
