//! Read-mostly view of the playlist store configuration.
//!
//! The whole map is loaded in one go on the first read after an invalidation and
//! shared as an `Arc` snapshot. Every write goes to the database first and then
//! drops the snapshot, so the next read observes it. A failed load leaves the
//! snapshot empty and the next read simply tries again.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    category::{AlbumGroup, AlbumGroupExtended},
    error::Result,
    management::BotDatabase,
    types::PlaylistStore,
};

pub type PlaylistStoreMap = HashMap<AlbumGroupExtended, PlaylistStore>;

pub struct PlaylistStoreCache {
    database: Arc<dyn BotDatabase>,
    snapshot: Mutex<Option<Arc<PlaylistStoreMap>>>,
}

impl PlaylistStoreCache {
    pub fn new(database: Arc<dyn BotDatabase>) -> Self {
        Self {
            database,
            snapshot: Mutex::new(None),
        }
    }

    /// The cached snapshot, loading it if absent. Concurrent readers wait for a
    /// single load instead of racing each other.
    pub async fn get_all(&self) -> Result<Arc<PlaylistStoreMap>> {
        let mut snapshot = self.snapshot.lock().await;
        if let Some(stores) = snapshot.as_ref() {
            return Ok(Arc::clone(stores));
        }

        let stores = Arc::new(self.database.load_playlist_stores().await?);
        tracing::debug!(stores = stores.len(), "Loaded playlist stores");
        *snapshot = Some(Arc::clone(&stores));
        Ok(stores)
    }

    pub async fn get(&self, group: AlbumGroupExtended) -> Result<Option<PlaylistStore>> {
        Ok(self.get_all().await?.get(&group).cloned())
    }

    /// Base groups with a playlist set, in declaration order.
    pub async fn enabled_album_groups(&self) -> Result<Vec<AlbumGroup>> {
        let stores = self.get_all().await?;
        Ok(AlbumGroup::ALL
            .into_iter()
            .filter(|group| is_enabled(&stores, group.default_extended()))
            .collect())
    }

    /// Extended groups with a playlist set, in declaration order.
    pub async fn enabled_extended_groups(&self) -> Result<Vec<AlbumGroupExtended>> {
        let stores = self.get_all().await?;
        Ok(AlbumGroupExtended::ALL
            .into_iter()
            .filter(|group| is_enabled(&stores, *group))
            .collect())
    }

    pub async fn refresh(&self, group: AlbumGroupExtended) -> Result<()> {
        let result = self.database.refresh_playlist_store(group).await;
        self.invalidate().await;
        result
    }

    pub async fn unset(&self, group: AlbumGroupExtended) -> Result<()> {
        let result = self.database.unset_playlist_store(group).await;
        self.invalidate().await;
        result
    }

    pub async fn set_playlist_id(
        &self,
        group: AlbumGroupExtended,
        playlist_id: Option<String>,
    ) -> Result<()> {
        let result = self.database.set_playlist_id(group, playlist_id).await;
        self.invalidate().await;
        result
    }

    pub async fn invalidate(&self) {
        *self.snapshot.lock().await = None;
    }
}

fn is_enabled(stores: &PlaylistStoreMap, group: AlbumGroupExtended) -> bool {
    stores.get(&group).is_some_and(PlaylistStore::is_enabled)
}
