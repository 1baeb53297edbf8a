//! Store-level properties: concurrent ID assignment, snapshot round-trips,
//! and counter recomputation on reload.

use std::sync::Arc;
use taskd::store::{persist::PersistenceAdapter, TaskInput, TaskStore};
use tempfile::TempDir;

fn input(title: &str) -> TaskInput {
    TaskInput {
        title: Some(title.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn concurrent_creates_get_distinct_sequential_ids() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(TaskStore::new(PersistenceAdapter::new(
        dir.path().join("tasks.json"),
    )));

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.create(input(&format!("task {i}"))).await.unwrap().id
        }));
    }

    let mut ids: Vec<u64> = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().parse().unwrap());
    }
    ids.sort_unstable();

    // Every creation got its own id and no number was skipped or reused.
    let expected: Vec<u64> = (1..=20).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn snapshot_round_trip_restores_records_and_counter() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let store = TaskStore::new(PersistenceAdapter::new(&path));
    store.create(input("a")).await.unwrap();
    store.create(input("b")).await.unwrap();
    let last = store.create(input("c")).await.unwrap();
    assert_eq!(last.id, "3");

    // A fresh store hydrated from the same file sees the same records and
    // continues the ID sequence past the loaded maximum.
    let fresh = TaskStore::new(PersistenceAdapter::new(&path));
    fresh.load().await;

    let mut titles: Vec<String> = fresh.list().await.into_iter().map(|t| t.title).collect();
    titles.sort_unstable();
    assert_eq!(titles, ["a", "b", "c"]);
    assert_eq!(fresh.get("2").await.unwrap().title, "b");

    let next = fresh.create(input("d")).await.unwrap();
    assert_eq!(next.id, "4");
}

#[tokio::test]
async fn non_numeric_ids_load_as_records_but_skip_the_counter() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let snapshot = serde_json::json!([
        {
            "id": "legacy-abc",
            "title": "imported",
            "status": "Done",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-02T00:00:00Z"
        },
        {
            "id": "5",
            "title": "numbered",
            "status": "ToDo",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        }
    ]);
    tokio::fs::write(&path, serde_json::to_vec_pretty(&snapshot).unwrap())
        .await
        .unwrap();

    let store = TaskStore::new(PersistenceAdapter::new(&path));
    store.load().await;

    assert_eq!(store.list().await.len(), 2);
    assert_eq!(store.get("legacy-abc").await.unwrap().title, "imported");

    // Counter continues from the numeric maximum only.
    let next = store.create(input("new")).await.unwrap();
    assert_eq!(next.id, "6");
}

#[tokio::test]
async fn deletes_are_reflected_in_the_next_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let store = TaskStore::new(PersistenceAdapter::new(&path));
    store.create(input("keep")).await.unwrap();
    let doomed = store.create(input("drop")).await.unwrap();
    assert!(store.delete(&doomed.id).await);

    // The delete's save is detached; poll until it lands.
    let mut remaining = Vec::new();
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        remaining = PersistenceAdapter::new(&path).load().await;
        if remaining.len() == 1 {
            break;
        }
    }
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "keep");
}
