#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sporlbot::{
    category::{AlbumGroupExtended, AlbumGroups},
    error::{BotError, Result},
    management::BotDatabase,
    spotify::{Catalog, Publisher},
    types::{Album, AlbumArtist, AlbumTrackPair, Artist, PlaylistStore, Token, Track},
};

pub fn create_test_album(id: &str, name: &str, release_date: &str, artist_name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        release_date: release_date.to_string(),
        release_date_precision: "day".to_string(),
        album_type: "album".to_string(),
        album_group: Some("album".to_string()),
        artists: vec![AlbumArtist {
            id: format!("{}_artist_id", artist_name),
            name: artist_name.to_string(),
        }],
    }
}

pub fn with_group(mut album: Album, group: &str) -> Album {
    album.album_group = Some(group.to_string());
    album
}

pub fn create_test_track(id: &str, name: &str, duration_secs: u64, artist_id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{id}"),
        duration_ms: duration_secs * 1000,
        artists: vec![AlbumArtist {
            id: artist_id.to_string(),
            name: artist_id.to_string(),
        }],
    }
}

/// A release with `count` tracks of `duration_secs` each.
pub fn create_test_pair(
    id: &str,
    name: &str,
    group: &str,
    count: usize,
    duration_secs: u64,
) -> AlbumTrackPair {
    let album = with_group(create_test_album(id, name, "2024-05-03", "Artist"), group);
    let tracks = (0..count)
        .map(|i| {
            create_test_track(
                &format!("{id}_{i}"),
                &format!("Track {i}"),
                duration_secs,
                "Artist_artist_id",
            )
        })
        .collect();
    AlbumTrackPair::new(album, tracks)
}

pub fn days_ago(days: i64) -> String {
    (Utc::now().date_naive() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// Playlist stores for every group, with the given playlist ids.
pub fn stores(ids: &[(AlbumGroupExtended, &str)]) -> HashMap<AlbumGroupExtended, PlaylistStore> {
    AlbumGroupExtended::ALL
        .into_iter()
        .map(|group| {
            let id = ids
                .iter()
                .find(|(g, _)| *g == group)
                .map(|(_, id)| id.to_string());
            (group, PlaylistStore::new(group, id))
        })
        .collect()
}

#[derive(Default)]
pub struct InMemoryDatabase {
    pub stores: Mutex<HashMap<AlbumGroupExtended, PlaylistStore>>,
    pub known: Mutex<HashSet<String>>,
    pub token: Mutex<Option<Token>>,
    pub loads: AtomicUsize,
    pub fail_loads: AtomicBool,
}

impl InMemoryDatabase {
    pub fn with_stores(stores: HashMap<AlbumGroupExtended, PlaylistStore>) -> Self {
        Self {
            stores: Mutex::new(stores),
            ..Default::default()
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    fn update(
        &self,
        group: AlbumGroupExtended,
        f: impl FnOnce(&PlaylistStore) -> PlaylistStore,
    ) -> Result<()> {
        let mut stores = self.stores.lock().unwrap();
        let store = stores
            .get(&group)
            .ok_or(BotError::UnknownPlaylistStore(group))?;
        let updated = f(store);
        stores.insert(group, updated);
        Ok(())
    }
}

#[async_trait]
impl BotDatabase for InMemoryDatabase {
    async fn load_playlist_stores(&self) -> Result<HashMap<AlbumGroupExtended, PlaylistStore>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(BotError::storage("database unavailable"));
        }
        Ok(self.stores.lock().unwrap().clone())
    }

    async fn refresh_playlist_store(&self, group: AlbumGroupExtended) -> Result<()> {
        self.update(group, |store| store.with_last_update(Some(Utc::now())))
    }

    async fn unset_playlist_store(&self, group: AlbumGroupExtended) -> Result<()> {
        self.update(group, |store| store.with_last_update(None))
    }

    async fn set_playlist_id(
        &self,
        group: AlbumGroupExtended,
        playlist_id: Option<String>,
    ) -> Result<()> {
        self.update(group, |store| PlaylistStore {
            playlist_id,
            ..store.clone()
        })
    }

    async fn load_credentials(&self) -> Result<Option<Token>> {
        Ok(self.token.lock().unwrap().clone())
    }

    async fn save_credentials(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(Token {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            expires_in: 3600,
            obtained_at: Utc::now().timestamp() as u64,
        });
        Ok(())
    }

    async fn known_release_ids(&self) -> Result<HashSet<String>> {
        Ok(self.known.lock().unwrap().clone())
    }

    async fn store_release_ids(&self, ids: &[String]) -> Result<()> {
        self.known.lock().unwrap().extend(ids.iter().cloned());
        Ok(())
    }
}

/// Catalog serving fixed artists, releases per artist and tracks per release.
#[derive(Default)]
pub struct FakeCatalog {
    pub artists: Vec<Artist>,
    pub releases: HashMap<String, Vec<Album>>,
    pub tracks: HashMap<String, Vec<Track>>,
    pub requested_groups: Mutex<Vec<String>>,
    pub fail: bool,
}

impl FakeCatalog {
    pub fn artist(mut self, id: &str, name: &str) -> Self {
        self.artists.push(Artist {
            id: id.to_string(),
            name: name.to_string(),
            genres: Vec::new(),
        });
        self
    }

    pub fn release(mut self, artist_id: &str, album: Album, tracks: Vec<Track>) -> Self {
        self.tracks.insert(album.id.clone(), tracks);
        self.releases
            .entry(artist_id.to_string())
            .or_default()
            .push(album);
        self
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn followed_artists(&self) -> Result<Vec<Artist>> {
        if self.fail {
            return Err(BotError::catalog("catalog unavailable"));
        }
        Ok(self.artists.clone())
    }

    async fn artist_releases(&self, artist_id: &str, groups: &AlbumGroups) -> Result<Vec<Album>> {
        self.requested_groups.lock().unwrap().push(groups.to_string());
        Ok(self
            .releases
            .get(artist_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|album| album.album_group().is_some_and(|g| groups.contains(g)))
            .collect())
    }

    async fn album_tracks(&self, albums: &[Album]) -> Result<Vec<AlbumTrackPair>> {
        Ok(albums
            .iter()
            .filter_map(|album| {
                self.tracks
                    .get(&album.id)
                    .map(|tracks| AlbumTrackPair::new(album.clone(), tracks.clone()))
            })
            .collect())
    }
}

#[derive(Default)]
pub struct FakePublisher {
    pub added: Mutex<Vec<(String, Vec<String>)>>,
    pub names: Mutex<HashMap<String, String>>,
}

impl FakePublisher {
    pub fn tracks_for(&self, playlist_id: &str) -> Vec<String> {
        self.added
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == playlist_id)
            .flat_map(|(_, uris)| uris.clone())
            .collect()
    }

    pub fn name_of(&self, playlist_id: &str) -> String {
        self.names
            .lock()
            .unwrap()
            .get(playlist_id)
            .cloned()
            .unwrap_or_else(|| format!("Playlist {playlist_id}"))
    }
}

#[async_trait]
impl Publisher for FakePublisher {
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.added
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), uris.to_vec()));
        Ok(())
    }

    async fn playlist_name(&self, playlist_id: &str) -> Result<String> {
        Ok(self.name_of(playlist_id))
    }

    async fn rename_playlist(&self, playlist_id: &str, name: &str) -> Result<()> {
        self.names
            .lock()
            .unwrap()
            .insert(playlist_id.to_string(), name.to_string());
        Ok(())
    }
}
