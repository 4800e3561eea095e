#![forbid(unsafe_code)]

use chk_storage::{InstanceCreateRequest, SqliteStore, Status, TemplateCreateRequest};

fn instance_with_steps(store: &mut SqliteStore, count: usize) -> (i64, Vec<i64>) {
    let template_id = store
        .template_create(TemplateCreateRequest {
            title: "Rollout".to_string(),
            description: "Staged rollout".to_string(),
            long_description: None,
        })
        .expect("create template")
        .id;
    for index in 0..count {
        store
            .step_insert(template_id, &format!("stage {index}"), None)
            .expect("insert step");
    }
    let instance_id = store
        .instantiate(InstanceCreateRequest {
            template_id,
            name: "rollout-1".to_string(),
            description: None,
            target_date: None,
        })
        .expect("instantiate")
        .id;
    let step_ids = store
        .template_steps(template_id)
        .expect("steps")
        .iter()
        .map(|step| step.id)
        .collect();
    (instance_id, step_ids)
}

#[test]
fn rollup_of_an_empty_instance_is_zero_and_not_started() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let (instance_id, _) = instance_with_steps(&mut store, 0);

    let rollup = store.instance_rollup(instance_id).expect("rollup");
    assert_eq!(rollup.total, 0);
    assert_eq!(rollup.percentage, 0.0);
    assert_eq!(rollup.counts.len(), 3);
    assert_eq!(rollup.derive_status(), Status::NotStarted);
}

#[test]
fn rollup_counts_each_status() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let (instance_id, steps) = instance_with_steps(&mut store, 3);

    store
        .instance_step_status_set(instance_id, steps[0], Status::Completed)
        .expect("complete");
    store
        .instance_step_status_set(instance_id, steps[1], Status::Completed)
        .expect("complete");
    store
        .instance_step_status_set(instance_id, steps[2], Status::InProgress)
        .expect("start");

    let rollup = store.instance_rollup(instance_id).expect("rollup");
    assert_eq!(rollup.total, 3);
    assert_eq!(rollup.count(Status::Completed), 2);
    assert_eq!(rollup.count(Status::InProgress), 1);
    assert_eq!(rollup.count(Status::NotStarted), 0);
    assert!((rollup.percentage - 66.666).abs() < 0.01);
    assert_eq!(rollup.derive_status(), Status::InProgress);
}

#[test]
fn stored_status_stays_stale_until_applied() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let (instance_id, steps) = instance_with_steps(&mut store, 2);

    for step_id in steps.iter() {
        store
            .instance_step_status_set(instance_id, *step_id, Status::Completed)
            .expect("complete");
    }
    assert_eq!(
        store.instance_get(instance_id).expect("instance").status,
        Status::NotStarted
    );
    assert_eq!(
        store.instance_rollup(instance_id).expect("rollup").derive_status(),
        Status::Completed
    );

    let applied = store.instance_apply_status(instance_id).expect("apply");
    assert_eq!(applied.previous, Status::NotStarted);
    assert_eq!(applied.current, Status::Completed);
    assert!(applied.changed);
    assert_eq!(
        store.instance_get(instance_id).expect("instance").status,
        Status::Completed
    );

    let again = store.instance_apply_status(instance_id).expect("apply again");
    assert!(!again.changed);
}

#[test]
fn reopening_a_step_moves_the_status_back_to_in_progress() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let (instance_id, steps) = instance_with_steps(&mut store, 2);
    for step_id in steps.iter() {
        store
            .instance_step_status_set(instance_id, *step_id, Status::Completed)
            .expect("complete");
    }
    store.instance_apply_status(instance_id).expect("apply");

    store
        .instance_step_status_set(instance_id, steps[0], Status::NotStarted)
        .expect("reopen");
    let applied = store.instance_apply_status(instance_id).expect("apply");
    assert_eq!(applied.current, Status::InProgress);
}

#[test]
fn status_strings_parse_leniently() {
    assert_eq!(Status::parse("in_progress").expect("parse"), Status::InProgress);
    assert_eq!(Status::parse("Completed").expect("parse"), Status::Completed);
    assert!(Status::parse("done").is_err());
}
