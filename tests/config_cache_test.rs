mod common;

use std::sync::{Arc, atomic::Ordering};

use common::{InMemoryDatabase, stores};
use sporlbot::{
    category::{AlbumGroup, AlbumGroupExtended},
    config_cache::PlaylistStoreCache,
    error::BotError,
    management::{BotDatabase, FileDatabase},
};
use tempfile::TempDir;

fn scenario_database() -> Arc<InMemoryDatabase> {
    Arc::new(InMemoryDatabase::with_stores(stores(&[
        (AlbumGroupExtended::Album, "P1"),
        (AlbumGroupExtended::Single, ""),
        (AlbumGroupExtended::AppearsOn, "P3"),
    ])))
}

#[tokio::test]
async fn test_enabled_album_groups_skip_blank_playlists() {
    let cache = PlaylistStoreCache::new(scenario_database());

    let enabled = cache.enabled_album_groups().await.unwrap();

    assert_eq!(enabled, vec![AlbumGroup::Album, AlbumGroup::AppearsOn]);
}

#[tokio::test]
async fn test_enabled_album_groups_order_is_stable() {
    let cache = PlaylistStoreCache::new(scenario_database());

    let first = cache.enabled_album_groups().await.unwrap();
    cache.invalidate().await;
    let second = cache.enabled_album_groups().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_enabled_extended_groups() {
    let database = Arc::new(InMemoryDatabase::with_stores(stores(&[
        (AlbumGroupExtended::Single, "S"),
        (AlbumGroupExtended::Ep, "E"),
        (AlbumGroupExtended::Live, "  "),
    ])));
    let cache = PlaylistStoreCache::new(database);

    let enabled = cache.enabled_extended_groups().await.unwrap();

    assert_eq!(
        enabled,
        vec![AlbumGroupExtended::Single, AlbumGroupExtended::Ep]
    );
    assert_eq!(
        cache.enabled_album_groups().await.unwrap(),
        vec![AlbumGroup::Single]
    );
}

#[tokio::test]
async fn test_snapshot_is_loaded_once() {
    let database = scenario_database();
    let cache = PlaylistStoreCache::new(database.clone());

    cache.get_all().await.unwrap();
    cache.get(AlbumGroupExtended::Album).await.unwrap();
    cache.enabled_album_groups().await.unwrap();

    assert_eq!(database.load_count(), 1);
}

#[tokio::test]
async fn test_concurrent_readers_share_one_load() {
    let database = scenario_database();
    let cache = Arc::new(PlaylistStoreCache::new(database.clone()));

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get_all().await.unwrap().len() })
        })
        .collect();
    for reader in readers {
        assert_eq!(reader.await.unwrap(), AlbumGroupExtended::ALL.len());
    }

    assert_eq!(database.load_count(), 1);
}

#[tokio::test]
async fn test_refresh_is_visible_to_next_read() {
    let cache = PlaylistStoreCache::new(scenario_database());
    let before = cache.get(AlbumGroupExtended::Album).await.unwrap().unwrap();
    assert!(before.last_update.is_none());

    cache.refresh(AlbumGroupExtended::Album).await.unwrap();

    let after = cache.get(AlbumGroupExtended::Album).await.unwrap().unwrap();
    assert!(after.last_update.is_some());
    assert_eq!(after.playlist_id.as_deref(), Some("P1"));
}

#[tokio::test]
async fn test_unset_clears_last_update() {
    let cache = PlaylistStoreCache::new(scenario_database());
    cache.refresh(AlbumGroupExtended::AppearsOn).await.unwrap();

    cache.unset(AlbumGroupExtended::AppearsOn).await.unwrap();

    let store = cache
        .get(AlbumGroupExtended::AppearsOn)
        .await
        .unwrap()
        .unwrap();
    assert!(store.last_update.is_none());
    assert!(store.is_enabled());
}

#[tokio::test]
async fn test_set_playlist_id_enables_group() {
    let cache = PlaylistStoreCache::new(scenario_database());

    cache
        .set_playlist_id(AlbumGroupExtended::Single, Some("P2".to_string()))
        .await
        .unwrap();

    assert_eq!(
        cache.enabled_album_groups().await.unwrap(),
        vec![AlbumGroup::Album, AlbumGroup::Single, AlbumGroup::AppearsOn]
    );
}

#[tokio::test]
async fn test_failed_load_leaves_snapshot_absent() {
    let database = scenario_database();
    database.fail_loads.store(true, Ordering::SeqCst);
    let cache = PlaylistStoreCache::new(database.clone());

    let err = cache.get_all().await.unwrap_err();
    assert!(err.is_storage());

    database.fail_loads.store(false, Ordering::SeqCst);
    let stores = cache.get_all().await.unwrap();

    assert_eq!(stores.len(), AlbumGroupExtended::ALL.len());
    assert_eq!(database.load_count(), 2);
}

#[tokio::test]
async fn test_unknown_group_fails_and_invalidates() {
    let mut known = stores(&[(AlbumGroupExtended::Album, "P1")]);
    known.remove(&AlbumGroupExtended::Live);
    let database = Arc::new(InMemoryDatabase::with_stores(known));
    let cache = PlaylistStoreCache::new(database.clone());
    cache.get_all().await.unwrap();

    let err = cache.refresh(AlbumGroupExtended::Live).await.unwrap_err();

    assert!(matches!(
        err,
        BotError::UnknownPlaylistStore(AlbumGroupExtended::Live)
    ));
    cache.get_all().await.unwrap();
    assert_eq!(database.load_count(), 2);
}

#[tokio::test]
async fn test_file_database_read_your_writes() {
    let dir = TempDir::new().unwrap();
    let database = Arc::new(FileDatabase::new(dir.path()));
    let cache = PlaylistStoreCache::new(database.clone());

    // first start creates one disabled store per group
    assert!(cache.enabled_album_groups().await.unwrap().is_empty());

    cache
        .set_playlist_id(AlbumGroupExtended::Album, Some("P1".to_string()))
        .await
        .unwrap();
    cache.refresh(AlbumGroupExtended::Album).await.unwrap();

    let store = cache.get(AlbumGroupExtended::Album).await.unwrap().unwrap();
    assert_eq!(store.enabled_playlist_id(), Some("P1"));
    assert!(store.last_update.is_some());

    // a fresh cache over the same directory sees the persisted state
    let reopened = PlaylistStoreCache::new(Arc::new(FileDatabase::new(dir.path())));
    assert_eq!(
        reopened.enabled_album_groups().await.unwrap(),
        vec![AlbumGroup::Album]
    );

    cache.unset(AlbumGroupExtended::Album).await.unwrap();
    let stores = database.load_playlist_stores().await.unwrap();
    assert!(stores[&AlbumGroupExtended::Album].last_update.is_none());
}
