use docbundle_core::answers::AnswerStore;
use docbundle_core::error::AssemblyError;
use docbundle_core::fields::{DisplayStyle, FieldCollection, FieldRecord};
use serde_json::json;

fn names<'a>(fields: impl IntoIterator<Item = &'a docbundle_core::field::Field>) -> Vec<&'a str> {
    fields.into_iter().map(|f| f.name()).collect()
}

fn sample_collection() -> FieldCollection {
    FieldCollection::from_records(&[
        FieldRecord::new("petitioner", 10),
        FieldRecord::new("respondent", 10),
        FieldRecord::new("reasons", 20),
        FieldRecord::new("children", 2),
    ])
    .expect("records are valid")
}

fn sample_answers() -> AnswerStore {
    AnswerStore::from_json_str(
        r#"{
            "petitioner": "Alexandria Ocasio",
            "reasons": "short",
            "children": ["Ann", "Ben", "Cal"]
        }"#,
    )
    .unwrap()
}

#[test]
fn test_from_records_preserves_order() {
    let collection = sample_collection();
    assert_eq!(
        names(&collection),
        vec!["petitioner", "respondent", "reasons", "children"]
    );
    assert_eq!(collection.len(), 4);
    assert_eq!(collection.get("reasons").unwrap().overflow_trigger(), 20);
}

#[test]
fn test_overflow_returns_defined_overflowing_fields_in_registration_order() {
    let collection = sample_collection();
    let store = sample_answers();

    assert_eq!(names(collection.overflow(&store)), vec!["petitioner", "children"]);
}

#[test]
fn test_defined_fields_with_all_style_skips_only_unset_fields() {
    let collection = sample_collection();
    let store = sample_answers();

    assert_eq!(
        names(collection.defined_fields(DisplayStyle::All, &store)),
        vec!["petitioner", "reasons", "children"]
    );
    assert_eq!(
        names(collection.defined_fields(DisplayStyle::OverflowOnly, &store)),
        names(collection.overflow(&store))
    );
}

#[test]
fn test_displayed_fields_follow_the_collection_style() {
    let store = sample_answers();
    let overflow_only = sample_collection();
    assert_eq!(overflow_only.display_style(), DisplayStyle::OverflowOnly);
    assert_eq!(overflow_only.displayed_fields(&store).len(), 2);

    let all = sample_collection().with_display_style(DisplayStyle::All);
    assert_eq!(all.displayed_fields(&store).len(), 3);
}

#[test]
fn test_duplicate_field_name_is_rejected() {
    let mut collection = FieldCollection::new();
    collection.add_field("petitioner", 10).unwrap();

    let err = collection.add_field("petitioner", 30).unwrap_err();
    assert!(matches!(err, AssemblyError::DuplicateField { ref name } if name == "petitioner"));
    assert_eq!(collection.get("petitioner").unwrap().overflow_trigger(), 10);
}

#[test]
fn test_zero_trigger_is_rejected() {
    let mut collection = FieldCollection::new();
    let err = collection.add_field("petitioner", 0).unwrap_err();
    assert!(matches!(err, AssemblyError::InvalidOverflowTrigger { .. }));
    assert!(collection.is_empty());
}

#[test]
fn test_malformed_field_name_is_rejected() {
    let mut collection = FieldCollection::new();
    let err = collection.add_field("users[0]..name", 5).unwrap_err();
    assert!(matches!(err, AssemblyError::InvalidFieldName { .. }));
}

#[test]
fn test_add_field_binds_name_and_trigger() {
    let mut collection = FieldCollection::new();
    let field = collection.add_field("users[0].name.first", 12).unwrap();
    assert_eq!(field.name(), "users[0].name.first");
    assert_eq!(field.overflow_trigger(), 12);
}

#[test]
fn test_nested_variable_names_resolve_against_answers() {
    let mut collection = FieldCollection::new();
    collection.add_field("users[0].address.street", 8).unwrap();
    let store = AnswerStore::from_json_str(
        &json!({ "users": [{ "address": { "street": "1600 Pennsylvania Avenue" } }] }).to_string(),
    )
    .unwrap();

    let overflow = collection.overflow(&store);
    assert_eq!(overflow.len(), 1);
    assert_eq!(overflow[0].overflow_value(&store).to_string(), "nsylvania Avenue");
}

#[test]
fn test_headers_survive_bulk_load() {
    let records: Vec<FieldRecord> = serde_json::from_value(json!([
        { "field_name": "children", "overflow_trigger": 2, "headers": ["Name", "Age"] },
        { "field_name": "reasons", "overflow_trigger": 20 }
    ]))
    .unwrap();
    let collection = FieldCollection::from_records(&records).unwrap();

    assert_eq!(collection.get("children").unwrap().columns().len(), 2);
    assert!(collection.get("reasons").unwrap().columns().is_empty());
}
