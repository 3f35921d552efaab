use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::category::{AlbumGroup, AlbumGroupExtended};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<Artist>,
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumResponse {
    pub items: Vec<Album>,
    pub next: Option<String>,
}

/// A release as the catalog lists it for an artist. Two albums are the same
/// release when their ids match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub release_date_precision: String,
    #[serde(default)]
    pub album_type: String,
    #[serde(default)]
    pub album_group: Option<String>,
    pub artists: Vec<AlbumArtist>,
}

impl Album {
    /// The declared base group. `None` when the catalog didn't send one or sent
    /// something unknown.
    pub fn album_group(&self) -> Option<AlbumGroup> {
        self.album_group
            .as_deref()
            .and_then(|group| group.parse().ok())
    }

    /// The release date, only for day precision releases.
    pub fn release_day(&self) -> Option<NaiveDate> {
        if self.release_date_precision != "day" {
            return None;
        }
        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d").ok()
    }

    pub fn first_artist_name(&self) -> &str {
        self.artists
            .first()
            .map(|artist| artist.name.as_str())
            .unwrap_or_default()
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Album {}

impl Hash for Album {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeveralAlbumsResponse {
    pub albums: Vec<Option<GetAlbumResponse>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAlbumResponse {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub tracks: Tracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

/// A discovered release together with the tracks that will be published.
#[derive(Debug, Clone)]
pub struct AlbumTrackPair {
    pub album: Album,
    pub tracks: Vec<Track>,
}

impl AlbumTrackPair {
    pub fn new(album: Album, tracks: Vec<Track>) -> Self {
        Self { album, tracks }
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.tracks.iter().map(|track| track.duration_ms).sum()
    }
}

impl PartialEq for AlbumTrackPair {
    fn eq(&self, other: &Self) -> bool {
        self.album == other.album
    }
}

impl Eq for AlbumTrackPair {}

impl Hash for AlbumTrackPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.album.hash(state);
    }
}

/// Where releases of one extended group get published, and when that last
/// happened. Replaced as a whole on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistStore {
    pub album_group: AlbumGroupExtended,
    pub playlist_id: Option<String>,
    pub last_update: Option<DateTime<Utc>>,
}

impl PlaylistStore {
    pub fn new(album_group: AlbumGroupExtended, playlist_id: Option<String>) -> Self {
        Self {
            album_group,
            playlist_id,
            last_update: None,
        }
    }

    /// The playlist id, if one is set and not blank.
    pub fn enabled_playlist_id(&self) -> Option<&str> {
        self.playlist_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled_playlist_id().is_some()
    }

    pub fn with_last_update(&self, last_update: Option<DateTime<Utc>>) -> Self {
        Self {
            last_update,
            ..self.clone()
        }
    }
}

#[derive(Tabled)]
pub struct PlaylistStoreTableRow {
    pub group: String,
    pub playlist: String,
    pub last_update: String,
}

impl From<&PlaylistStore> for PlaylistStoreTableRow {
    fn from(store: &PlaylistStore) -> Self {
        Self {
            group: store.album_group.label().to_string(),
            playlist: store.enabled_playlist_id().unwrap_or("-").to_string(),
            last_update: store
                .last_update
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: String,
}
