use crate::core::errors::{ClientError, ErrorKind};
use crate::core::models::UserId;
use crate::infrastructure::storage::DurableStorage;
use crate::infrastructure::storage::file::FileStorage;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use crate::stores::{AuthStore, USER_STORAGE_KEY};
use serde_json::json;

fn login_response() -> serde_json::Value {
    json!({"user": {"id": "1", "email": "a@b.com", "display_name": "A"}})
}

#[tokio::test]
async fn test_login_persists_user_across_reload() {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let mut auth = AuthStore::new(storage.clone());

    let user = auth.login(&login_response()).await.unwrap();
    assert!(auth.is_authenticated());
    assert_eq!(user.id, UserId::Text("1".to_string()));
    assert!(!auth.is_loading());

    // A fresh store over the same storage stands in for a page reload.
    let mut reloaded = AuthStore::new(storage);
    assert!(!reloaded.is_authenticated());
    assert!(reloaded.check_auth().await.unwrap());
    assert!(reloaded.is_authenticated());
    assert_eq!(reloaded.user().unwrap().email, "a@b.com");
    assert_eq!(reloaded.user().unwrap().display_name, "A");
}

#[tokio::test]
async fn test_logout_clears_user_and_storage() {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let mut auth = AuthStore::new(storage.clone());
    auth.login(&login_response()).await.unwrap();

    auth.logout().await;
    assert!(!auth.is_authenticated());
    assert!(!auth.check_auth().await.unwrap());
    assert_eq!(storage.get_item(USER_STORAGE_KEY).await.unwrap(), None);

    let mut reloaded = AuthStore::new(storage);
    assert!(!reloaded.check_auth().await.unwrap());
}

#[tokio::test]
async fn test_login_without_user_field_is_rejected() {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let mut auth = AuthStore::new(storage.clone());

    let err = auth.login(&json!({"token": "abc"})).await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedLoginResponse(_)));
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert!(!auth.is_authenticated());
    assert!(!auth.is_loading());
    assert!(auth.last_error().unwrap().contains("user"));
    assert_eq!(storage.get_item(USER_STORAGE_KEY).await.unwrap(), None);

    // The next successful login clears the recorded error.
    auth.login(&login_response()).await.unwrap();
    assert_eq!(auth.last_error(), None);
}

#[tokio::test]
async fn test_login_keeps_only_identity_fields() {
    let storage = InMemoryStorage::new();
    let mut auth = AuthStore::new(storage.clone());
    let response = json!({
        "user": {
            "id": 42,
            "email": "c@d.com",
            "display_name": "C",
            "created_at": "2024-05-01T10:00:00Z",
            "is_staff": true
        },
        "message": "Login successful"
    });

    let user = auth.login(&response).await.unwrap();
    assert_eq!(user.id, UserId::Numeric(42));
    assert_eq!(user.created_at.as_deref(), Some("2024-05-01T10:00:00Z"));

    let stored = storage.get_item(USER_STORAGE_KEY).await.unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(
        stored,
        json!({"id": 42, "email": "c@d.com", "display_name": "C", "created_at": "2024-05-01T10:00:00Z"})
    );
}

#[tokio::test]
async fn test_corrupt_stored_user_is_a_local_state_error() {
    let storage = InMemoryStorage::new();
    storage.set_item(USER_STORAGE_KEY, "{not json").await.unwrap();
    let mut auth = AuthStore::new(storage);

    let err = auth.check_auth().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LocalState);
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn test_subscribers_see_auth_changes() {
    let mut auth = AuthStore::new(InMemoryStorage::new());
    let mut rx = auth.subscribe();
    assert!(!rx.has_changed().unwrap());

    auth.login(&login_response()).await.unwrap();
    assert!(rx.has_changed().unwrap());
    let _ = rx.borrow_and_update();

    auth.logout().await;
    assert!(rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_rejected_login_does_not_notify_subscribers() {
    let mut auth = AuthStore::new(InMemoryStorage::new());
    let rx = auth.subscribe();

    auth.login(&json!({"user": "not an object"})).await.unwrap_err();
    assert!(!rx.has_changed().unwrap());
    assert!(auth.last_error().is_some());

    auth.login(&login_response()).await.unwrap();
    assert!(rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_file_storage_survives_new_instances() {
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("state");

    let mut auth = AuthStore::new(FileStorage::new(&base));
    auth.login(&login_response()).await.unwrap();
    assert!(base.join("user.json").exists());

    let mut reloaded = AuthStore::new(FileStorage::new(&base));
    assert!(reloaded.check_auth().await.unwrap());
    assert_eq!(reloaded.user().unwrap().email, "a@b.com");

    reloaded.logout().await;
    assert!(!base.join("user.json").exists());
    // Removing an absent key is not an error.
    FileStorage::new(&base).remove_item(USER_STORAGE_KEY).await.unwrap();
    assert_eq!(FileStorage::new(&base).get_item(USER_STORAGE_KEY).await.unwrap(), None);
}
