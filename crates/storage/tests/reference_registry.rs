#![forbid(unsafe_code)]

use chk_storage::{ReferenceUpdateRequest, SqliteStore, StoreError, TemplateCreateRequest};

fn step(store: &mut SqliteStore) -> i64 {
    let template_id = store
        .template_create(TemplateCreateRequest {
            title: "Network".to_string(),
            description: "Switch config".to_string(),
            long_description: None,
        })
        .expect("create template")
        .id;
    store
        .step_insert(template_id, "configure vlan", None)
        .expect("insert step")
        .id
}

#[test]
fn seeded_types_exist_on_a_fresh_store() {
    let store = SqliteStore::open_in_memory().expect("open store");
    let names: Vec<String> = store
        .reference_types_list()
        .expect("list")
        .into_iter()
        .map(|row| row.name)
        .collect();
    assert_eq!(names, vec!["API".to_string(), "URL".to_string()]);
}

#[test]
fn get_or_create_is_idempotent_and_case_insensitive() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let url = store.reference_type_get_or_create("url").expect("url");
    assert_eq!(store.reference_type_get_or_create(" Url ").expect("Url"), url);
    assert_eq!(store.reference_type_get_or_create("URL").expect("URL"), url);

    let wiki = store.reference_type_get_or_create("wiki").expect("wiki");
    assert_ne!(wiki, url);
    assert_eq!(store.reference_type_get_or_create("WIKI").expect("WIKI"), wiki);

    let created = store
        .reference_types_list()
        .expect("list")
        .into_iter()
        .find(|row| row.id == wiki)
        .expect("wiki row");
    assert_eq!(created.name, "WIKI");
    assert_eq!(created.description, "Auto-created reference type: WIKI");
    assert_eq!(store.reference_types_list().expect("list").len(), 3);
}

#[test]
fn invalid_type_names_are_rejected() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    for bad in ["", "   ", "tab\tname"] {
        let err = store
            .reference_type_get_or_create(bad)
            .expect_err("invalid name");
        assert!(matches!(err, StoreError::InvalidName(_)), "{bad:?}");
    }
    let err = store
        .reference_type_get_or_create(&"X".repeat(65))
        .expect_err("too long");
    assert!(err.is_validation());
}

#[test]
fn a_step_can_carry_several_references() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let step_id = step(&mut store);

    let doc = store
        .reference_add(step_id, "https://wiki.example/vlan", "wiki")
        .expect("add wiki");
    let api = store
        .reference_add(step_id, "https://api.example/v1/vlans", "api")
        .expect("add api");
    store
        .reference_add(step_id, "https://api.example/v1/vlans", "api")
        .expect("duplicates are allowed");

    let listed = store.references_list(step_id).expect("list");
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].id, doc.id);
    assert_eq!(listed[0].reference_type, "WIKI");
    assert_eq!(listed[1].reference_type, "API");

    let updated = store
        .reference_update(ReferenceUpdateRequest {
            reference_id: api.id,
            url: None,
            reference_type: Some("url".to_string()),
        })
        .expect("update");
    assert_eq!(updated.reference_type, "URL");
    assert_eq!(updated.url, api.url);

    store.reference_delete(step_id, doc.id).expect("delete");
    let err = store
        .reference_delete(step_id, doc.id)
        .expect_err("already deleted");
    assert!(matches!(err, StoreError::UnknownReference(_)));
    assert_eq!(store.references_list(step_id).expect("list").len(), 2);
}

#[test]
fn references_need_an_existing_step_and_url() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let step_id = step(&mut store);

    let err = store
        .reference_add(step_id, "  ", "url")
        .expect_err("blank url");
    assert!(err.is_validation());

    let err = store
        .reference_add(step_id + 100, "https://example.com", "url")
        .expect_err("unknown step");
    assert!(matches!(err, StoreError::UnknownStep(_)));
}
