use superpages::error::SuperpagesError;
use superpages::model::{ContentFormat, Page, AUTO_SAVED};
use superpages::store::backend::StorageBackend;
use superpages::store::fs::FileStore;
use superpages::store::fs_backend::FsBackend;
use superpages::store::DataStore;

fn my_test_page() -> Page {
    Page::new("My Test Page", "This is a sample flatpage.", "testy_mcpants")
}

#[test]
fn test_pages_and_history_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let page_id = {
        let mut store = FileStore::new(dir.path().to_path_buf());
        let page = store.save_page(my_test_page(), None).unwrap();
        let mut edited = page.clone();
        edited.content = "This is an edited sample flatpage.".into();
        store.save_page(edited, Some("Edited the content")).unwrap();
        page.id
    };

    let store = FileStore::new(dir.path().to_path_buf());
    let page = store.resolve("my-test-page").unwrap();
    assert_eq!(page.id, page_id);
    assert_eq!(page.content, "This is an edited sample flatpage.");

    let messages: Vec<String> = store
        .history_for(&page_id)
        .unwrap()
        .map(|s| s.message)
        .collect();
    assert_eq!(messages, vec!["Edited the content".to_string(), AUTO_SAVED.to_string()]);
    assert_eq!(store.snapshot_count().unwrap(), 2);
}

#[test]
fn test_on_disk_layout() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    let page = store.save_page(my_test_page(), None).unwrap();

    assert!(dir.path().join("pages.json").is_file());
    let ledger = dir
        .path()
        .join("snapshots")
        .join(format!("{}.jsonl", page.id));
    assert!(ledger.is_file());

    store.save_page(page.clone(), Some("again")).unwrap();
    let content = std::fs::read_to_string(&ledger).unwrap();
    assert_eq!(content.lines().count(), 2);

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_child_path_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    let parent = store.save_page(my_test_page(), None).unwrap();

    let child = Page::new("Another Test Page", "Yet another test.", "testy_mcpants")
        .with_format(ContentFormat::Txt)
        .with_parent(parent.id);
    store.save_page(child, None).unwrap();

    let reopened = FileStore::new(dir.path().to_path_buf());
    let child = reopened.resolve("my-test-page/another-test-page").unwrap();
    assert_eq!(child.parent_id, Some(parent.id));
    assert_eq!(child.content_format, ContentFormat::Txt);
}

#[test]
fn test_duplicate_path_rejected_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    store.save_page(my_test_page(), None).unwrap();

    let result = store.save_page(my_test_page(), None);
    assert!(matches!(result, Err(SuperpagesError::DuplicatePath(_))));
    assert_eq!(store.list_pages().unwrap().len(), 1);
    assert_eq!(store.snapshot_count().unwrap(), 1);
}

#[test]
fn test_hard_delete_keeps_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    let page = store.save_page(my_test_page(), None).unwrap();

    store.delete_page(&page.id).unwrap();
    assert!(matches!(
        store.get_page(&page.id),
        Err(SuperpagesError::PageNotFound(_))
    ));
    assert_eq!(store.history_for(&page.id).unwrap().len(), 1);
}

#[test]
fn test_backend_reads_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path().join("not-yet-created"));

    assert!(backend.load_pages().unwrap().is_empty());
    assert_eq!(backend.count_snapshots().unwrap(), 0);
    assert!(backend.load_snapshots(&uuid::Uuid::new_v4()).unwrap().is_empty());
}

#[test]
fn test_corrupt_page_table_is_a_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pages.json"), "{ not json").unwrap();

    let store = FileStore::new(dir.path().to_path_buf());
    let err = store.list_pages().unwrap_err();
    assert!(err.is_persistence());
}

#[test]
fn test_history_survives_interrupted_append() {
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().to_path_buf());
    let page = store.save_page(my_test_page(), None).unwrap();

    let ledger = dir
        .path()
        .join("snapshots")
        .join(format!("{}.jsonl", page.id));
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(&ledger)
        .unwrap();
    file.write_all(br#"{"id":"0000"#).unwrap();
    drop(file);

    assert_eq!(store.history_for(&page.id).unwrap().len(), 1);

    store.save_page(page.clone(), Some("After the crash")).unwrap();

    let messages: Vec<String> = store
        .history_for(&page.id)
        .unwrap()
        .map(|s| s.message)
        .collect();
    assert_eq!(messages, vec!["After the crash".to_string(), AUTO_SAVED.to_string()]);
    assert_eq!(store.snapshot_count().unwrap(), 2);
}
