#![forbid(unsafe_code)]

use chk_storage::{SqliteStore, TemplateCreateRequest};
use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::thread;

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

const WRITERS: usize = 6;

#[test]
fn racing_get_or_create_yields_one_type() {
    let storage_dir = temp_dir("racing_get_or_create_yields_one_type");
    drop(SqliteStore::open(&storage_dir).expect("create schema"));

    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let storage_dir = storage_dir.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut store = SqliteStore::open(&storage_dir).expect("open store");
                barrier.wait();
                let name = if writer % 2 == 0 { "runbook" } else { "RunBook" };
                store
                    .reference_type_get_or_create(name)
                    .expect("get or create")
            })
        })
        .collect();

    let ids: Vec<i64> = handles
        .into_iter()
        .map(|handle| handle.join().expect("writer thread"))
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] == pair[1]), "{ids:?}");

    let store = SqliteStore::open(&storage_dir).expect("reopen");
    let runbooks = store
        .reference_types_list()
        .expect("list")
        .into_iter()
        .filter(|row| row.name == "RUNBOOK")
        .count();
    assert_eq!(runbooks, 1);
}

#[test]
fn concurrent_inserts_keep_order_dense() {
    let storage_dir = temp_dir("concurrent_inserts_keep_order_dense");
    let template_id = {
        let mut store = SqliteStore::open(&storage_dir).expect("open store");
        store
            .template_create(TemplateCreateRequest {
                title: "Shared".to_string(),
                description: "Edited from several threads".to_string(),
                long_description: None,
            })
            .expect("create template")
            .id
    };

    const PER_WRITER: usize = 8;
    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let storage_dir = storage_dir.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut store = SqliteStore::open(&storage_dir).expect("open store");
                barrier.wait();
                for round in 0..PER_WRITER {
                    // Front inserts shift every existing row.
                    let position = if round % 2 == 0 { Some(1) } else { None };
                    store
                        .step_insert(template_id, &format!("w{writer} r{round}"), position)
                        .expect("insert");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread");
    }

    let store = SqliteStore::open(&storage_dir).expect("reopen");
    let steps = store.template_steps(template_id).expect("steps");
    assert_eq!(steps.len(), WRITERS * PER_WRITER);
    assert!(store.template_order_is_dense(template_id).expect("dense"));
}
