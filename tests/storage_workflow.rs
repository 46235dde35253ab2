// End-to-end storage workflow over the file-backed store.

use brp_weapp::storage::expire_key;
use brp_weapp::util::{civil_token, date_offset, date_today};
use brp_weapp::{FileStore, KeyValueStore, PathOutcome, Storage};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_login_session_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(FileStore::open(temp_dir.path()).unwrap());

    let week_later = date_offset(&date_today(), 7).unwrap();
    let token = civil_token(&week_later);

    storage
        .path_set("session.user.name", "li", Some(token.as_str()))
        .await
        .unwrap();
    storage.path_set("session.user.id", 7, None).await.unwrap();
    storage.path_set("session.cart.0", "sku-1", None).await.unwrap();

    assert_eq!(storage.get_expire("session").unwrap(), Some(token.clone()));
    assert_eq!(
        storage.path_get("session.user").await.unwrap(),
        Some(json!({ "name": "li", "id": 7 }))
    );

    // cart was vivified as an object, so "0" is an object key
    assert_eq!(
        storage.path_get("session.cart").await.unwrap(),
        Some(json!({ "0": "sku-1" }))
    );

    let outcome = storage.path_del("session.user.name").await.unwrap();
    assert_eq!(outcome, PathOutcome::Applied);
    assert_eq!(storage.get_expire("session").unwrap(), Some(token));

    // A fresh handle over the same directory sees the same state.
    let reopened = Storage::new(FileStore::open(temp_dir.path()).unwrap());
    assert_eq!(
        reopened.path_get("session.user").await.unwrap(),
        Some(json!({ "id": 7 }))
    );
}

#[tokio::test]
async fn test_expired_session_is_removed_from_disk() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open(temp_dir.path()).unwrap();
    let storage = Storage::new(store.clone());

    storage
        .setex("session", json!({ "user": "li" }), "2000-1-1")
        .await
        .unwrap();
    assert!(store.entry_path("session").exists());

    assert_eq!(storage.path_get("session.user").await.unwrap(), None);
    assert!(!store.entry_path("session").exists());
    assert_eq!(store.get(&expire_key("session")).unwrap(), None);
}
