mod common;

use common::{echo_renderer, joining_concatenator, labels, parts_of};
use docbundle_core::answers::AnswerStore;
use docbundle_core::bundle::{Bundle, BundleItem};
use docbundle_core::contract::{AssemblyContext, OutputKey};
use docbundle_core::document::Document;
use docbundle_core::error::AssemblyError;
use std::rc::Rc;

fn document(filename: &str) -> Rc<Document> {
    let stem = filename.trim_end_matches(".pdf");
    Rc::new(Document::new(
        filename,
        format!("{stem}_final"),
        format!("{stem}_preview"),
    ))
}

fn document_with_addendum(filename: &str, field: &str, trigger: usize) -> Rc<Document> {
    let stem = filename.trim_end_matches(".pdf");
    let mut document = Document::new(filename, format!("{stem}_final"), format!("{stem}_preview"))
        .with_addendum("addendum");
    document.overflow_fields_mut().add_field(field, trigger).unwrap();
    Rc::new(document)
}

#[test]
fn test_flatten_skips_disabled_documents_but_keeps_them_in_the_structure() {
    let a = document("a.pdf");
    let c = document("c.pdf");
    c.set_enabled(false);
    let bundle = Bundle::new("bundle.pdf")
        .with_item(Rc::clone(&a))
        .with_item(Rc::clone(&c));
    let store = AnswerStore::new();

    assert_eq!(labels(&bundle.flatten(OutputKey::Final, &store)), vec!["a.pdf/final"]);
    assert_eq!(bundle.len(), 2);
}

#[test]
fn test_as_pdf_list_yields_one_artifact_per_direct_child_even_when_disabled() {
    let a = document("a.pdf");
    let c = document("c.pdf");
    c.set_enabled(false);
    let bundle = Bundle::new("bundle.pdf").with_item(a).with_item(c);
    let store = AnswerStore::new();
    let renderer = echo_renderer();
    let concatenator = joining_concatenator();
    let ctx = AssemblyContext::new(&store, &renderer, &concatenator);

    let artifacts = bundle.as_pdf_list(OutputKey::Final, &ctx).unwrap();
    let names: Vec<&str> = artifacts.iter().map(|a| a.filename.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "c.pdf"]);
}

#[test]
fn test_flatten_recurses_through_nested_bundles_in_order() {
    let cover = document("cover.pdf");
    let motion = document_with_addendum("motion.pdf", "reasons", 10);
    let notice = document("notice.pdf");
    let exhibits = Rc::new(
        Bundle::new("exhibits.pdf")
            .with_item(document("exhibit_a.pdf"))
            .with_item(document("exhibit_b.pdf")),
    );
    let bundle = Bundle::new("court.pdf")
        .with_item(cover)
        .with_item(motion)
        .with_item(Rc::clone(&exhibits))
        .with_item(notice);
    let mut store = AnswerStore::new();
    store.set("reasons", "far too long for the box");

    assert_eq!(
        labels(&bundle.flatten(OutputKey::Final, &store)),
        vec![
            "cover.pdf/final",
            "motion.pdf/final",
            "motion.pdf/addendum",
            "exhibit_a.pdf/final",
            "exhibit_b.pdf/final",
            "notice.pdf/final",
        ]
    );
}

#[test]
fn test_as_pdf_list_length_matches_direct_children_regardless_of_nesting() {
    let inner = Rc::new(
        Bundle::new("inner.pdf")
            .with_item(document("x.pdf"))
            .with_item(document("y.pdf"))
            .with_item(document("z.pdf")),
    );
    let middle = Rc::new(Bundle::new("middle.pdf").with_item(inner).with_item(document("w.pdf")));
    let bundle = Bundle::new("outer.pdf")
        .with_item(document("v.pdf"))
        .with_item(middle);
    let store = AnswerStore::new();
    let renderer = echo_renderer();
    let concatenator = joining_concatenator();
    let ctx = AssemblyContext::new(&store, &renderer, &concatenator);

    let artifacts = bundle.as_pdf_list(OutputKey::Final, &ctx).unwrap();
    assert_eq!(artifacts.len(), bundle.len());
    assert_eq!(artifacts[1].filename, "middle.pdf");
    assert_eq!(parts_of(&artifacts[1]).len(), 4);
    assert!(bundle.flatten(OutputKey::Final, &store).len() > artifacts.len());
}

#[test]
fn test_disabling_a_shared_document_removes_every_occurrence() {
    let shared = document("shared.pdf");
    let other = document("other.pdf");
    let nested = Rc::new(
        Bundle::new("nested.pdf")
            .with_item(Rc::clone(&shared))
            .with_item(Rc::clone(&other)),
    );
    let bundle = Bundle::new("outer.pdf")
        .with_item(Rc::clone(&shared))
        .with_item(nested)
        .with_item(Rc::clone(&shared));
    let store = AnswerStore::new();
    assert_eq!(bundle.flatten(OutputKey::Final, &store).len(), 4);

    shared.set_enabled(false);
    assert_eq!(
        labels(&bundle.flatten(OutputKey::Final, &store)),
        vec!["other.pdf/final"]
    );
}

#[test]
fn test_nested_bundle_own_enabled_flag_is_not_consulted() {
    let nested = Rc::new(Bundle::new("nested.pdf").with_item(document("a.pdf")).with_enabled(false));
    let bundle = Bundle::new("outer.pdf").with_item(Rc::clone(&nested));
    let store = AnswerStore::new();

    assert!(!nested.is_enabled());
    assert_eq!(labels(&bundle.flatten(OutputKey::Final, &store)), vec!["a.pdf/final"]);
}

#[test]
fn test_disabled_top_level_bundle_still_renders_its_preview() {
    let bundle = Bundle::new("user.pdf").with_item(document("a.pdf")).with_enabled(false);
    let store = AnswerStore::new();
    let renderer = echo_renderer();
    let concatenator = joining_concatenator();
    let ctx = AssemblyContext::new(&store, &renderer, &concatenator);

    let artifact = bundle.preview(&ctx).unwrap();
    assert_eq!(artifact.filename, "user.pdf");
    assert_eq!(parts_of(&artifact), vec!["a.pdf/preview/a_preview"]);
}

#[test]
fn test_as_single_pdf_merges_the_flattened_renditions() {
    let motion = document_with_addendum("motion.pdf", "reasons", 3);
    let bundle = Bundle::new("court.pdf")
        .with_item(document("cover.pdf"))
        .with_item(motion);
    let mut store = AnswerStore::new();
    store.set("reasons", "overflowing");
    let renderer = echo_renderer();
    let concatenator = joining_concatenator();
    let ctx = AssemblyContext::new(&store, &renderer, &concatenator);

    let artifact = bundle.as_single_pdf(OutputKey::Final, &ctx).unwrap();
    assert_eq!(artifact.filename, "court.pdf");
    assert_eq!(
        parts_of(&artifact),
        vec![
            "cover.pdf/final/cover_final",
            "motion.pdf/final/motion_final",
            "motion.pdf/addendum/addendum",
        ]
    );
}

#[test]
fn test_empty_bundle_flattens_to_nothing_and_concatenation_error_propagates() {
    let bundle = Bundle::new("empty.pdf");
    let store = AnswerStore::new();
    let renderer = echo_renderer();
    let concatenator = joining_concatenator();
    let ctx = AssemblyContext::new(&store, &renderer, &concatenator);

    assert!(bundle.flatten(OutputKey::Final, &store).is_empty());
    let err = bundle.as_single_pdf(OutputKey::Final, &ctx).unwrap_err();
    assert!(matches!(err, AssemblyError::Concatenate { ref output, .. } if output == "empty.pdf"));
}

#[test]
fn test_bundle_of_only_disabled_documents_also_reaches_the_concatenator_empty() {
    let a = document("a.pdf");
    a.set_enabled(false);
    let bundle = Bundle::new("quiet.pdf").with_item(a);
    let store = AnswerStore::new();
    let renderer = echo_renderer();
    let concatenator = joining_concatenator();
    let ctx = AssemblyContext::new(&store, &renderer, &concatenator);

    assert!(bundle.as_single_pdf(OutputKey::Final, &ctx).is_err());
}

#[test]
fn test_items_report_their_kind_and_filename() {
    let nested = Rc::new(Bundle::new("nested.pdf"));
    let bundle = Bundle::new("outer.pdf")
        .with_item(document("a.pdf"))
        .with_item(nested);

    let kinds: Vec<(&str, bool)> = bundle
        .items()
        .iter()
        .map(|item| (item.filename(), matches!(item, BundleItem::Bundle(_))))
        .collect();
    assert_eq!(kinds, vec![("a.pdf", false), ("nested.pdf", true)]);
}
