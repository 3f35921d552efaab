use std::{
    collections::{HashMap, HashSet},
    io::ErrorKind,
    path::PathBuf,
};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{
    category::AlbumGroupExtended,
    error::{BotError, Result},
    types::{PlaylistStore, Token},
};

use super::BotDatabase;

const PLAYLIST_STORES_FILE: &str = "playlist-stores.json";
const TOKEN_FILE: &str = "token.json";
const KNOWN_RELEASES_FILE: &str = "known-releases.json";

/// Token lifetime assumed for freshly saved credentials.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// Keeps each kind of bot data in its own JSON document below one directory.
pub struct FileDatabase {
    root: PathBuf,
    // serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileDatabase {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.root.join(name);
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BotError::storage(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| BotError::storage(format!("malformed {}: {}", path.display(), e)))
    }

    async fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        async_fs::create_dir_all(&self.root).await.map_err(|e| {
            BotError::storage(format!("cannot create {}: {}", self.root.display(), e))
        })?;

        let path = self.root.join(name);
        let json = serde_json::to_string_pretty(value)?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| BotError::storage(format!("cannot write {}: {}", path.display(), e)))
    }

    async fn read_stores(&self) -> Result<Vec<PlaylistStore>> {
        match self.read_json::<Vec<PlaylistStore>>(PLAYLIST_STORES_FILE).await? {
            Some(stores) => Ok(stores),
            None => {
                // first start: one disabled store per group
                let stores: Vec<PlaylistStore> = AlbumGroupExtended::ALL
                    .into_iter()
                    .map(|group| PlaylistStore::new(group, None))
                    .collect();
                self.write_json(PLAYLIST_STORES_FILE, &stores).await?;
                tracing::info!(path = %self.root.display(), "Created playlist store file");
                Ok(stores)
            }
        }
    }

    async fn replace_store<F>(&self, group: AlbumGroupExtended, update: F) -> Result<()>
    where
        F: FnOnce(&PlaylistStore) -> PlaylistStore + Send,
    {
        let _lock = self.write_lock.lock().await;
        let mut stores = self.read_stores().await?;
        let Some(slot) = stores.iter_mut().find(|store| store.album_group == group) else {
            return Err(BotError::UnknownPlaylistStore(group));
        };
        *slot = update(slot);
        self.write_json(PLAYLIST_STORES_FILE, &stores).await
    }
}

#[async_trait]
impl BotDatabase for FileDatabase {
    async fn load_playlist_stores(&self) -> Result<HashMap<AlbumGroupExtended, PlaylistStore>> {
        let stores = self.read_stores().await?;
        Ok(stores
            .into_iter()
            .map(|store| (store.album_group, store))
            .collect())
    }

    async fn refresh_playlist_store(&self, group: AlbumGroupExtended) -> Result<()> {
        let now = Utc::now();
        self.replace_store(group, |store| store.with_last_update(Some(now)))
            .await
    }

    async fn unset_playlist_store(&self, group: AlbumGroupExtended) -> Result<()> {
        self.replace_store(group, |store| store.with_last_update(None))
            .await
    }

    async fn set_playlist_id(
        &self,
        group: AlbumGroupExtended,
        playlist_id: Option<String>,
    ) -> Result<()> {
        self.replace_store(group, |store| PlaylistStore {
            playlist_id,
            ..store.clone()
        })
        .await
    }

    async fn load_credentials(&self) -> Result<Option<Token>> {
        self.read_json(TOKEN_FILE).await
    }

    async fn save_credentials(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        let token = Token {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            expires_in: DEFAULT_TOKEN_LIFETIME_SECS,
            obtained_at: Utc::now().timestamp() as u64,
        };
        self.write_json(TOKEN_FILE, &token).await
    }

    async fn known_release_ids(&self) -> Result<HashSet<String>> {
        Ok(self
            .read_json::<HashSet<String>>(KNOWN_RELEASES_FILE)
            .await?
            .unwrap_or_default())
    }

    async fn store_release_ids(&self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let _lock = self.write_lock.lock().await;
        let mut known = self
            .read_json::<HashSet<String>>(KNOWN_RELEASES_FILE)
            .await?
            .unwrap_or_default();
        known.extend(ids.iter().cloned());

        let mut sorted: Vec<&String> = known.iter().collect();
        sorted.sort();
        self.write_json(KNOWN_RELEASES_FILE, &sorted).await
    }
}
