//! Persistence and recovery tests over real files in a temp dir.
//!
//! Covers the save/load round trip, backup-before-overwrite rotation,
//! corrupt-file quarantine, and the service-level guarantee that memory
//! and disk agree after every successful mutation.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use taskbot::service::TaskService;
use taskbot_core::TaskFile;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn make_file(dir: &Path) -> TaskFile {
    TaskFile::new(dir.join("todo.json"), dir.join("backups")).unwrap()
}

fn backup_files(file: &TaskFile) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = fs::read_dir(file.backup_dir())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    paths.sort();
    paths
}

fn read_task_array(path: &Path) -> Vec<String> {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ---------------------------------------------------------------------------
// TaskFile tests
// ---------------------------------------------------------------------------

#[test]
fn save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let file = make_file(dir.path());

    let tasks = vec![
        "buy milk".to_string(),
        "buy milk".to_string(), // duplicates survive
        "walk\nthe dog".to_string(),
    ];
    file.save(&tasks).unwrap();
    assert_eq!(file.load(), tasks);
}

#[test]
fn each_save_preserves_the_previous_version() {
    let dir = tempfile::tempdir().unwrap();
    let file = make_file(dir.path());

    file.save(&["v1".to_string()]).unwrap();
    assert!(backup_files(&file).is_empty(), "first save has nothing to back up");

    file.save(&["v1".to_string(), "v2".to_string()]).unwrap();
    let backups = backup_files(&file);
    assert_eq!(backups.len(), 1);
    assert_eq!(read_task_array(&backups[0]), vec!["v1".to_string()]);

    // The canonical slot holds the newest version throughout.
    assert_eq!(
        read_task_array(file.canonical_path()),
        vec!["v1".to_string(), "v2".to_string()]
    );
}

#[test]
fn corrupt_canonical_file_is_quarantined_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let file = make_file(dir.path());
    fs::write(file.canonical_path(), "]]] definitely not json").unwrap();

    assert!(file.load().is_empty());

    // The bad bytes are preserved for inspection under a .corrupt suffix.
    let corrupt = PathBuf::from(format!("{}.corrupt", file.canonical_path().display()));
    assert_eq!(
        fs::read_to_string(corrupt).unwrap(),
        "]]] definitely not json"
    );

    // The bot can immediately save fresh state into the canonical slot.
    file.save(&["fresh start".to_string()]).unwrap();
    assert_eq!(file.load(), vec!["fresh start".to_string()]);
}

// ---------------------------------------------------------------------------
// Service-level tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn disk_matches_memory_after_every_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let service = TaskService::new(make_file(dir.path()));
    let canonical = dir.path().join("todo.json");

    service.add("one").await;
    assert_eq!(read_task_array(&canonical), vec!["one".to_string()]);

    service.add("two").await;
    assert_eq!(
        read_task_array(&canonical),
        vec!["one".to_string(), "two".to_string()]
    );

    service.complete(1).await.unwrap();
    assert_eq!(read_task_array(&canonical), vec!["two".to_string()]);
}

#[tokio::test]
async fn restart_recovers_exactly_the_saved_list() {
    let dir = tempfile::tempdir().unwrap();
    {
        let service = TaskService::new(make_file(dir.path()));
        service.add("alpha").await;
        service.add("beta").await;
        service.add("gamma").await;
        service.complete(2).await.unwrap();
    }

    let service = TaskService::new(make_file(dir.path()));
    assert_eq!(
        service.list().await,
        vec![(1, "alpha".to_string()), (2, "gamma".to_string())]
    );
}

#[tokio::test]
async fn failed_completion_does_not_touch_disk() {
    let dir = tempfile::tempdir().unwrap();
    let service = TaskService::new(make_file(dir.path()));
    service.add("keep me").await;

    let before = fs::read_to_string(dir.path().join("todo.json")).unwrap();
    assert!(service.complete(99).await.is_err());
    let after = fs::read_to_string(dir.path().join("todo.json")).unwrap();
    assert_eq!(before, after);

    // No spurious backup either: only mutations rotate the file.
    let file = make_file(dir.path());
    assert!(backup_files(&file).is_empty());
}

#[tokio::test]
async fn backups_accumulate_one_per_overwriting_save() {
    let dir = tempfile::tempdir().unwrap();
    let service = TaskService::new(make_file(dir.path()));

    service.add("a").await; // creates the canonical file, no backup
    service.add("b").await; // rotates v1
    service.add("c").await; // rotates v2
    service.complete(1).await.unwrap(); // rotates v3

    let file = make_file(dir.path());
    assert_eq!(backup_files(&file).len(), 3);
}
