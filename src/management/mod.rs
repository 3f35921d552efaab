//! Persistence for everything the bot remembers between runs: playlist stores,
//! catalog credentials and the ids of releases it has already seen.
//!
//! The crawler and the playlist store cache only talk to [`BotDatabase`];
//! [`FileDatabase`] is the JSON-on-disk implementation used by the binary.

mod auth;
mod database;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::{
    category::AlbumGroupExtended,
    error::Result,
    types::{PlaylistStore, Token},
};

pub use auth::TokenManager;
pub use database::FileDatabase;

#[async_trait]
pub trait BotDatabase: Send + Sync {
    /// Every configured playlist store, keyed by group.
    async fn load_playlist_stores(&self) -> Result<HashMap<AlbumGroupExtended, PlaylistStore>>;

    /// Stamps the store of `group` with the current time.
    async fn refresh_playlist_store(&self, group: AlbumGroupExtended) -> Result<()>;

    /// Removes the update timestamp of the store of `group`.
    async fn unset_playlist_store(&self, group: AlbumGroupExtended) -> Result<()>;

    /// Points `group` at another playlist; `None` disables the group.
    async fn set_playlist_id(
        &self,
        group: AlbumGroupExtended,
        playlist_id: Option<String>,
    ) -> Result<()>;

    async fn load_credentials(&self) -> Result<Option<Token>>;

    async fn save_credentials(&self, access_token: &str, refresh_token: &str) -> Result<()>;

    /// Ids of every release seen by a previous crawl.
    async fn known_release_ids(&self) -> Result<HashSet<String>>;

    async fn store_release_ids(&self, ids: &[String]) -> Result<()>;
}
