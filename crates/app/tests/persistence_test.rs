//! Integration tests for the file-backed library.
//!
//! These tests open the real JSON snapshots in a temporary storage directory,
//! mutate them through the library and read them back from disk.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

use courier_application::{SaveRequest, SaveRequestInput, SharedLibrary, StoreError};
use courier_domain::{
    CourierSettings, HeaderEntry, Headers, RequestDraft, RequestPatch, RequestSnapshot,
};
use courier_infrastructure::{StorageDir, SystemClock, decode_document, open_library};

fn open(dir: &TempDir) -> (StorageDir, SharedLibrary) {
    let storage = StorageDir::new(dir.path().join("courier"));
    let library = open_library(&storage, &CourierSettings::default(), Arc::new(SystemClock))
        .expect("Failed to open library");
    (storage, library)
}

fn stored_requests(storage: &StorageDir) -> RequestSnapshot {
    decode_document(&fs::read(storage.requests_path()).unwrap()).unwrap()
}

#[test]
fn test_library_survives_reopen() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let (folder, request) = {
        let (_, library) = open(&temp_dir);
        let mut library = library.lock();
        let folder = library.create_folder("Users API", None).unwrap();
        let request = library
            .create_request(
                RequestPatch::new()
                    .with_name("Create user")
                    .with_method("post")
                    .with_url("https://api.example.com/users")
                    .with_headers(Headers::from(vec![
                        HeaderEntry::new("Content-Type", "application/json"),
                        HeaderEntry::new("X-Trace", "1"),
                        HeaderEntry::new("X-Trace", "2"),
                    ]))
                    .with_body(Some(r#"{"name":"Ada"}"#.into()))
                    .in_folder(folder.id.clone()),
            )
            .unwrap();
        (folder, request)
    };

    let (_, library) = open(&temp_dir);
    let library = library.lock();
    assert_eq!(library.folders().get(&folder.id), Some(&folder));
    assert_eq!(library.requests().get(&request.id), Some(&request));
    assert_eq!(request.method, "POST");
    assert_eq!(library.requests().by_folder(&folder.id).count(), 1);
}

#[test]
fn test_first_save_files_request_into_default_folder() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let (storage, library) = open(&temp_dir);

    let output = SaveRequest::new(Arc::clone(&library))
        .execute(SaveRequestInput {
            draft: RequestDraft {
                name: "Ping".into(),
                method: "GET".into(),
                url: "https://x.test/ping".into(),
                ..RequestDraft::default()
            },
            panel_folder_id: None,
        })
        .unwrap();

    let folder = output.created_folder.expect("a folder should be created");
    assert_eq!(folder.name, "Default Folder");
    assert!(output.created);

    let on_disk = stored_requests(&storage);
    assert_eq!(on_disk.0.len(), 1);
    assert_eq!(on_disk.0[0].name, "Ping");
    assert_eq!(on_disk.0[0].folder_id.as_deref(), Some(folder.id.as_str()));

    let folders: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(storage.folders_path()).unwrap()).unwrap();
    assert_eq!(folders[folder.id.as_str()]["name"], "Default Folder");
    assert!(folders[folder.id.as_str()]["createdAt"].is_i64());
}

#[test]
fn test_copy_is_persisted_with_suffix() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let (storage, library) = open(&temp_dir);

    let (original, copy) = {
        let mut library = library.lock();
        let original = library
            .create_request(
                RequestPatch::new()
                    .with_name("List")
                    .with_url("https://x.test/items")
                    .with_body(Some("{}".into())),
            )
            .unwrap();
        let copy = library.copy_request(&original.id).unwrap();
        (original, copy)
    };

    assert_ne!(copy.id, original.id);
    assert_eq!(copy.name, "List (copy)");
    assert_eq!(copy.url, original.url);
    assert_eq!(copy.body, original.body);

    let names: Vec<String> = stored_requests(&storage).0.into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["List".to_string(), "List (copy)".to_string()]);
}

#[test]
fn test_folder_delete_cascades_on_disk() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let (storage, library) = open(&temp_dir);

    let keep = {
        let mut library = library.lock();
        let root = library.create_folder("root", None).unwrap();
        let child = library.create_folder("child", Some(root.id.clone())).unwrap();
        let grandchild = library.create_folder("grandchild", Some(child.id.clone())).unwrap();
        let keep = library.create_folder("keep", None).unwrap();
        library
            .create_request(RequestPatch::new().with_name("deep").in_folder(grandchild.id))
            .unwrap();
        library
            .create_request(RequestPatch::new().with_name("kept").in_folder(keep.id.clone()))
            .unwrap();

        assert!(library.delete_folder(&root.id, true).unwrap());
        keep
    };

    let folders: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(storage.folders_path()).unwrap()).unwrap();
    assert_eq!(folders.keys().cloned().collect::<Vec<_>>(), vec![keep.id]);

    let names: Vec<String> = stored_requests(&storage).0.into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["kept".to_string()]);
}

#[test]
fn test_missing_ids_leave_files_untouched() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let (storage, library) = open(&temp_dir);
    library
        .lock()
        .create_request(RequestPatch::new().with_name("only"))
        .unwrap();
    let before = fs::read(storage.requests_path()).unwrap();

    let mut library = library.lock();
    let error = library
        .update_request("no-such-id", RequestPatch::new().with_name("x"))
        .unwrap_err();
    assert!(matches!(error, StoreError::NotFound { .. }));
    assert!(!library.delete_request("no-such-id").unwrap());
    assert!(!library.delete_folder("no-such-folder", true).unwrap());

    assert_eq!(fs::read(storage.requests_path()).unwrap(), before);
}

#[test]
fn test_malformed_snapshot_starts_empty_without_overwriting() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let storage = StorageDir::new(temp_dir.path().join("courier"));
    fs::create_dir_all(storage.root()).unwrap();
    fs::write(storage.requests_path(), "[{\"id\": ").unwrap();

    let library =
        open_library(&storage, &CourierSettings::default(), Arc::new(SystemClock)).unwrap();

    assert!(library.lock().requests().is_empty());
    assert_eq!(fs::read_to_string(storage.requests_path()).unwrap(), "[{\"id\": ");
    assert_eq!(fs::read_to_string(storage.folders_path()).unwrap(), "{}\n");
}
