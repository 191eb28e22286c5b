//! File store persistence tests

use fingerpay_storage::{
    Error, FileStore, KeyValueStore, TokenStore, DEFAULT_ENDPOINT, K_TOKEN_KEY, STORE_FILE_NAME,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::in_dir(dir.path());

    assert_eq!(store.get(K_TOKEN_KEY).await.unwrap(), None);
    assert!(!store.path().exists(), "reads must not create the file");
}

#[tokio::test]
async fn test_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let tokens = TokenStore::new(FileStore::in_dir(dir.path()));
        tokens.set_endpoint("http://10.0.0.2:8787").await.unwrap();
        tokens.set_token("abc123").await.unwrap();
    }

    let reopened = TokenStore::new(FileStore::in_dir(dir.path()));
    assert_eq!(reopened.get_endpoint().await.unwrap(), "http://10.0.0.2:8787");
    assert_eq!(
        reopened.get_token().await.unwrap().as_deref().map(String::as_str),
        Some("abc123")
    );
}

#[tokio::test]
async fn test_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = FileStore::in_dir(&nested);

    store.set("backend_url", "http://127.0.0.1:1").await.unwrap();
    assert!(nested.join(STORE_FILE_NAME).exists());
}

#[tokio::test]
async fn test_clear_token_keeps_endpoint() {
    let dir = TempDir::new().unwrap();
    let tokens = TokenStore::new(FileStore::in_dir(dir.path()));

    tokens.set_token("abc123").await.unwrap();
    tokens.clear_token().await.unwrap();

    assert!(tokens.get_token().await.unwrap().is_none());
    assert_eq!(tokens.get_endpoint().await.unwrap(), DEFAULT_ENDPOINT);
}

#[tokio::test]
async fn test_corrupt_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::in_dir(dir.path());
    std::fs::write(store.path(), b"[1, 2, 3]").unwrap();

    let err = store.get(K_TOKEN_KEY).await.unwrap_err();
    assert!(matches!(err, Error::Corrupt(_)));

    std::fs::write(store.path(), b"{not json").unwrap();
    assert!(matches!(store.set(K_TOKEN_KEY, "x").await.unwrap_err(), Error::Corrupt(_)));
}

#[tokio::test]
async fn test_empty_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::in_dir(dir.path());
    std::fs::write(store.path(), b"\n").unwrap();

    assert_eq!(store.get(K_TOKEN_KEY).await.unwrap(), None);
}

#[cfg(unix)]
#[tokio::test]
async fn test_owner_only_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = FileStore::in_dir(dir.path());
    store.set(K_TOKEN_KEY, "abc123").await.unwrap();

    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
