use std::sync::Arc;

use sporlbot::{
    category::AlbumGroupExtended,
    logging::{DEFAULT_LOG_READ_LINES, read_log},
    management::{BotDatabase, FileDatabase, TokenManager},
};
use tempfile::TempDir;

#[tokio::test]
async fn test_first_start_creates_disabled_stores() {
    let dir = TempDir::new().unwrap();
    let database = FileDatabase::new(dir.path().join("data"));

    let stores = database.load_playlist_stores().await.unwrap();

    assert_eq!(stores.len(), AlbumGroupExtended::ALL.len());
    assert!(stores.values().all(|store| !store.is_enabled()));
    assert!(dir.path().join("data/playlist-stores.json").exists());
}

#[tokio::test]
async fn test_set_and_unset_playlist_store() {
    let dir = TempDir::new().unwrap();
    let database = FileDatabase::new(dir.path());

    database
        .set_playlist_id(AlbumGroupExtended::Ep, Some("ep-playlist".to_string()))
        .await
        .unwrap();
    database
        .refresh_playlist_store(AlbumGroupExtended::Ep)
        .await
        .unwrap();
    let refreshed = database.load_playlist_stores().await.unwrap();
    assert!(refreshed[&AlbumGroupExtended::Ep].last_update.is_some());

    database
        .unset_playlist_store(AlbumGroupExtended::Ep)
        .await
        .unwrap();
    let unset = database.load_playlist_stores().await.unwrap();
    let store = &unset[&AlbumGroupExtended::Ep];
    assert!(store.last_update.is_none());
    assert_eq!(store.enabled_playlist_id(), Some("ep-playlist"));

    database
        .set_playlist_id(AlbumGroupExtended::Ep, None)
        .await
        .unwrap();
    let disabled = database.load_playlist_stores().await.unwrap();
    assert!(!disabled[&AlbumGroupExtended::Ep].is_enabled());
}

#[tokio::test]
async fn test_malformed_store_file_is_a_storage_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("playlist-stores.json"), "{ not json").unwrap();
    let database = FileDatabase::new(dir.path());

    let err = database.load_playlist_stores().await.unwrap_err();

    assert!(err.is_storage());
}

#[tokio::test]
async fn test_release_ids_accumulate() {
    let dir = TempDir::new().unwrap();
    let database = FileDatabase::new(dir.path());
    assert!(database.known_release_ids().await.unwrap().is_empty());

    database
        .store_release_ids(&["b".to_string(), "a".to_string()])
        .await
        .unwrap();
    database
        .store_release_ids(&["c".to_string(), "a".to_string()])
        .await
        .unwrap();
    database.store_release_ids(&[]).await.unwrap();

    let known = database.known_release_ids().await.unwrap();
    assert_eq!(known.len(), 3);
    assert!(known.contains("c"));
}

#[tokio::test]
async fn test_saved_credentials_are_handed_out() {
    let dir = TempDir::new().unwrap();
    let database = Arc::new(FileDatabase::new(dir.path()));
    database.save_credentials("access", "refresh").await.unwrap();

    let stored = database.load_credentials().await.unwrap().unwrap();
    assert_eq!(stored.refresh_token, "refresh");

    let mut tokens = TokenManager::new(
        database,
        "http://127.0.0.1:9/token".to_string(),
        "client".to_string(),
    );
    let token = tokens.get_valid_token(&reqwest::Client::new()).await.unwrap();
    assert_eq!(token, "access");
}

#[tokio::test]
async fn test_missing_credentials() {
    let dir = TempDir::new().unwrap();
    let mut tokens = TokenManager::new(
        Arc::new(FileDatabase::new(dir.path())),
        "http://127.0.0.1:9/token".to_string(),
        "client".to_string(),
    );

    let err = tokens
        .get_valid_token(&reqwest::Client::new())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("no credentials stored"));
}

#[tokio::test]
async fn test_read_log_limits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sporlbot.log");
    let content: String = (0..150).map(|i| format!("line {i}\n")).collect();
    std::fs::write(&path, content).unwrap();

    let default = read_log(&path, None).await.unwrap();
    assert_eq!(default.len(), DEFAULT_LOG_READ_LINES);
    assert_eq!(default[0], "line 0");

    assert_eq!(read_log(&path, Some(5)).await.unwrap().len(), 5);
    assert_eq!(read_log(&path, Some(0)).await.unwrap().len(), 0);
    assert_eq!(read_log(&path, Some(-1)).await.unwrap().len(), 150);
}

#[tokio::test]
async fn test_read_log_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.log");

    let err = read_log(&path, None).await.unwrap_err();

    assert!(err.to_string().contains("Couldn't find log file"));
}
