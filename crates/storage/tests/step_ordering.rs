#![forbid(unsafe_code)]

use chk_storage::{
    ErrorKind, SqliteStore, StepRow, StepUpdateRequest, StoreError, TemplateCreateRequest,
};
use proptest::prelude::*;
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("chk_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn create_template(store: &mut SqliteStore, title: &str) -> i64 {
    store
        .template_create(TemplateCreateRequest {
            title: title.to_string(),
            description: format!("{title} checklist"),
            long_description: None,
        })
        .expect("create template")
        .id
}

fn layout(store: &SqliteStore, template_id: i64) -> Vec<(String, i64)> {
    store
        .template_steps(template_id)
        .expect("template steps")
        .into_iter()
        .map(|step: StepRow| (step.text, step.order_index))
        .collect()
}

fn pairs(expected: &[(&str, i64)]) -> Vec<(String, i64)> {
    expected
        .iter()
        .map(|(text, index)| (text.to_string(), *index))
        .collect()
}

#[test]
fn move_insert_remove_scenario_keeps_order_dense() {
    let storage_dir = temp_dir("move_insert_remove_scenario_keeps_order_dense");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let template_id = create_template(&mut store, "Release");

    store.step_insert(template_id, "A", None).expect("insert A");
    store.step_insert(template_id, "B", None).expect("insert B");
    let c = store.step_insert(template_id, "C", None).expect("insert C");
    assert_eq!(layout(&store, template_id), pairs(&[("A", 1), ("B", 2), ("C", 3)]));

    let moved = store.step_move(template_id, c.id, 3, 1).expect("move C");
    assert_eq!(moved.order_index, 1);
    assert_eq!(layout(&store, template_id), pairs(&[("C", 1), ("A", 2), ("B", 3)]));

    let d = store.step_insert(template_id, "D", Some(2)).expect("insert D");
    assert_eq!(d.order_index, 2);
    assert_eq!(
        layout(&store, template_id),
        pairs(&[("C", 1), ("D", 2), ("A", 3), ("B", 4)])
    );

    store.step_remove(template_id, d.id).expect("remove D");
    assert_eq!(layout(&store, template_id), pairs(&[("C", 1), ("A", 2), ("B", 3)]));
    assert!(store.template_order_is_dense(template_id).expect("dense"));
}

#[test]
fn moving_down_shifts_the_block_up() {
    let storage_dir = temp_dir("moving_down_shifts_the_block_up");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let template_id = create_template(&mut store, "Onboarding");

    let a = store.step_insert(template_id, "A", None).expect("insert A");
    for text in ["B", "C", "D"] {
        store.step_insert(template_id, text, None).expect("insert");
    }

    store.step_move(template_id, a.id, 1, 3).expect("move A");
    assert_eq!(
        layout(&store, template_id),
        pairs(&[("B", 1), ("C", 2), ("A", 3), ("D", 4)])
    );

    let noop = store.step_move(template_id, a.id, 3, 3).expect("no-op move");
    assert_eq!(noop.order_index, 3);
}

#[test]
fn out_of_range_positions_are_rejected_without_side_effects() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let template_id = create_template(&mut store, "Audit");
    let a = store.step_insert(template_id, "A", None).expect("insert A");
    store.step_insert(template_id, "B", None).expect("insert B");

    for position in [0, 4, -1] {
        let err = store
            .step_insert(template_id, "X", Some(position))
            .expect_err("position out of range");
        assert_eq!(err.kind(), ErrorKind::Validation, "position {position}");
    }

    let err = store
        .step_move(template_id, a.id, 1, 3)
        .expect_err("move target past the end");
    assert!(err.is_validation());

    let err = store
        .step_move(template_id, a.id, 2, 1)
        .expect_err("stale from index");
    assert!(matches!(err, StoreError::Order(_)));

    assert_eq!(layout(&store, template_id), pairs(&[("A", 1), ("B", 2)]));
}

#[test]
fn insert_at_end_plus_one_appends() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let template_id = create_template(&mut store, "Append");
    store.step_insert(template_id, "A", None).expect("insert A");

    let b = store.step_insert(template_id, "B", Some(2)).expect("insert B");
    assert_eq!(b.order_index, 2);

    let first = store
        .step_insert(template_id, "Z", Some(1))
        .expect("insert at front");
    assert_eq!(first.order_index, 1);
    assert_eq!(layout(&store, template_id), pairs(&[("Z", 1), ("A", 2), ("B", 3)]));
}

#[test]
fn steps_are_scoped_to_their_template() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let first = create_template(&mut store, "First");
    let second = create_template(&mut store, "Second");
    let step = store.step_insert(first, "A", None).expect("insert");
    store.step_insert(second, "B", None).expect("insert");

    let err = store
        .step_remove(second, step.id)
        .expect_err("step of another template");
    assert!(matches!(
        err,
        StoreError::StepNotInTemplate { template_id, step_id } if template_id == second && step_id == step.id
    ));

    let err = store
        .step_insert(9_999, "orphan", None)
        .expect_err("unknown template");
    assert!(err.is_not_found());
}

#[test]
fn step_update_changes_text_and_position() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let template_id = create_template(&mut store, "Update");
    for text in ["A", "B", "C"] {
        store.step_insert(template_id, text, None).expect("insert");
    }
    let c = store.template_steps(template_id).expect("steps")[2].clone();

    let updated = store
        .step_update(StepUpdateRequest {
            step_id: c.id,
            text: Some("  C prime ".to_string()),
            order_index: Some(1),
        })
        .expect("update");
    assert_eq!(updated.text, "C prime");
    assert_eq!(updated.order_index, 1);
    assert_eq!(
        layout(&store, template_id),
        pairs(&[("C prime", 1), ("A", 2), ("B", 3)])
    );

    let err = store
        .step_update(StepUpdateRequest {
            step_id: c.id,
            text: Some("   ".to_string()),
            order_index: None,
        })
        .expect_err("blank text");
    assert!(err.is_validation());
}

#[test]
fn removing_a_step_deletes_its_references() {
    let mut store = SqliteStore::open_in_memory().expect("open store");
    let template_id = create_template(&mut store, "Refs");
    let a = store.step_insert(template_id, "A", None).expect("insert A");
    store
        .reference_add(a.id, "https://example.com/a", "url")
        .expect("reference");

    store.step_remove(template_id, a.id).expect("remove A");
    let err = store.references_list(a.id).expect_err("step is gone");
    assert!(matches!(err, StoreError::UnknownStep(id) if id == a.id));
}

#[derive(Clone, Debug)]
enum Edit {
    Insert(u16),
    Move(u16, u16),
    Remove(u16),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        2 => any::<u16>().prop_map(Edit::Insert),
        1 => (any::<u16>(), any::<u16>()).prop_map(|(from, to)| Edit::Move(from, to)),
        1 => any::<u16>().prop_map(Edit::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_edit_sequence_keeps_order_dense(edits in prop::collection::vec(edit(), 1..40)) {
        let mut store = SqliteStore::open_in_memory().expect("open store");
        let template_id = create_template(&mut store, "Churn");
        let mut model: Vec<i64> = Vec::new();

        for (round, edit) in edits.into_iter().enumerate() {
            let count = model.len();
            match edit {
                Edit::Insert(at) => {
                    let slot = usize::from(at) % (count + 1);
                    let step = store
                        .step_insert(template_id, &format!("step {round}"), Some(slot as i64 + 1))
                        .expect("insert");
                    prop_assert_eq!(step.order_index, slot as i64 + 1);
                    model.insert(slot, step.id);
                }
                Edit::Move(_, _) | Edit::Remove(_) if count == 0 => continue,
                Edit::Move(from, to) => {
                    let from = usize::from(from) % count;
                    let to = usize::from(to) % count;
                    let step_id = model.remove(from);
                    let moved = store
                        .step_move(template_id, step_id, from as i64 + 1, to as i64 + 1)
                        .expect("move");
                    prop_assert_eq!(moved.order_index, to as i64 + 1);
                    model.insert(to, step_id);
                }
                Edit::Remove(at) => {
                    let step_id = model.remove(usize::from(at) % count);
                    store.step_remove(template_id, step_id).expect("remove");
                }
            }

            prop_assert!(store.template_order_is_dense(template_id).expect("dense"));
            let stored: Vec<(i64, i64)> = store
                .template_steps(template_id)
                .expect("steps")
                .into_iter()
                .map(|step| (step.id, step.order_index))
                .collect();
            let expected: Vec<(i64, i64)> = model
                .iter()
                .enumerate()
                .map(|(index, id)| (*id, index as i64 + 1))
                .collect();
            prop_assert_eq!(stored, expected);
        }
    }
}
