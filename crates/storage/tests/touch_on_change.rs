#![forbid(unsafe_code)]

use chk_storage::{
    InstanceCreateRequest, SqliteStore, Status, StepUpdateRequest, StoreConfig,
    TemplateCreateRequest, TemplateUpdateRequest,
};
use std::thread::sleep;
use std::time::Duration;

fn tick() {
    sleep(Duration::from_millis(5));
}

fn create(store: &mut SqliteStore) -> i64 {
    store
        .template_create(TemplateCreateRequest {
            title: "Backup".to_string(),
            description: "Nightly backup check".to_string(),
            long_description: None,
        })
        .expect("create template")
        .id
}

#[test]
fn restating_stored_values_does_not_touch_the_row() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let template_id = create(&mut store);
    let before = store.template_get(template_id).expect("template");
    tick();

    let after = store
        .template_update(TemplateUpdateRequest {
            template_id,
            title: Some("Backup".to_string()),
            description: Some(" Nightly backup check ".to_string()),
            ..TemplateUpdateRequest::default()
        })
        .expect("no-op update");
    assert_eq!(after, before);
}

#[test]
fn a_real_change_bumps_updated_at() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let template_id = create(&mut store);
    let before = store.template_get(template_id).expect("template");
    tick();

    let after = store
        .template_update(TemplateUpdateRequest {
            template_id,
            long_description: Some("Verify restore of one table".to_string()),
            ..TemplateUpdateRequest::default()
        })
        .expect("update");
    assert!(after.updated_at_ms > before.updated_at_ms);
    assert_eq!(after.created_at_ms, before.created_at_ms);
    assert_eq!(
        after.long_description.as_deref(),
        Some("Verify restore of one table")
    );
}

#[test]
fn shifted_steps_are_touched_and_untouched_steps_are_not() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let template_id = create(&mut store);
    let a = store.step_insert(template_id, "A", None).expect("A");
    let b = store.step_insert(template_id, "B", None).expect("B");
    tick();

    store.step_insert(template_id, "C", Some(2)).expect("C at 2");
    let a_after = store.step_get(a.id).expect("A");
    let b_after = store.step_get(b.id).expect("B");
    assert_eq!(a_after.updated_at_ms, a.updated_at_ms);
    assert_eq!(b_after.order_index, 3);
    assert!(b_after.updated_at_ms > b.updated_at_ms);

    tick();
    let same = store
        .step_update(StepUpdateRequest {
            step_id: a.id,
            text: Some("A".to_string()),
            order_index: Some(1),
        })
        .expect("no-op step update");
    assert_eq!(same.updated_at_ms, a.updated_at_ms);
}

#[test]
fn setting_the_same_status_is_a_no_op_and_modifier_is_stamped() {
    let config = StoreConfig {
        modifier: "ops-bot".to_string(),
        ..StoreConfig::default()
    };
    let storage_dir = std::env::temp_dir().join(format!(
        "chk_storage_modifier_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
    ));
    let mut store = SqliteStore::open_with(StoreConfig {
        storage_dir,
        ..config
    })
    .expect("open store");

    let template_id = create(&mut store);
    let step = store.step_insert(template_id, "verify", None).expect("step");
    assert_eq!(step.modified_by, "ops-bot");
    let instance = store
        .instantiate(InstanceCreateRequest {
            template_id,
            name: "tonight".to_string(),
            description: None,
            target_date: None,
        })
        .expect("instantiate");

    let state = store
        .instance_step_get(instance.id, step.id)
        .expect("state");
    tick();
    let same = store
        .instance_step_status_set(instance.id, step.id, Status::NotStarted)
        .expect("same status");
    assert_eq!(same.updated_at_ms, state.updated_at_ms);

    let started = store
        .instance_step_status_set(instance.id, step.id, Status::InProgress)
        .expect("start");
    assert!(started.updated_at_ms > state.updated_at_ms);
}
