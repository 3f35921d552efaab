//! # Spotify Integration Module
//!
//! The crawler reads the catalog through [`Catalog`] and writes playlists through
//! [`Publisher`]. [`SpotifyClient`] implements both on top of the Spotify Web API:
//!
//! ```text
//! Crawler
//!    ↓
//! Catalog / Publisher traits
//!    ↓
//! SpotifyClient (reqwest, bearer auth, retries)
//!    ↓
//! Spotify Web API
//! ```
//!
//! ## Retry behaviour
//!
//! - `429 Too Many Requests`: waits for `Retry-After` when it is at most two
//!   minutes, otherwise gives up with a catalog error.
//! - `502 Bad Gateway`: waits ten seconds and tries again, a few times.
//! - `401 Unauthorized`: refreshes the access token once and tries again.
//!
//! ## Endpoints
//!
//! - `GET /me/following` - followed artists, cursor paginated
//! - `GET /artists/{id}/albums` - releases of an artist, filtered by album group
//! - `GET /albums` - up to 20 albums with their tracks
//! - `GET /playlists/{id}`, `PUT /playlists/{id}` - playlist name
//! - `POST /playlists/{id}/tracks` - up to 100 tracks per call

pub mod artists;
pub mod playlist;
pub mod releases;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    category::AlbumGroups,
    config::Settings,
    error::{BotError, Result},
    management::{BotDatabase, TokenManager},
    types::{Album, AlbumTrackPair, Artist},
};

const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn followed_artists(&self) -> Result<Vec<Artist>>;

    async fn artist_releases(&self, artist_id: &str, groups: &AlbumGroups) -> Result<Vec<Album>>;

    /// Pairs each album with its tracks. Albums the catalog can't resolve are left out.
    async fn album_tracks(&self, albums: &[Album]) -> Result<Vec<AlbumTrackPair>>;
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()>;

    async fn playlist_name(&self, playlist_id: &str) -> Result<String>;

    async fn rename_playlist(&self, playlist_id: &str, name: &str) -> Result<()>;
}

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    market: Option<String>,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(settings: &Settings, database: Arc<dyn BotDatabase>) -> Self {
        Self {
            http: Client::new(),
            api_url: settings.spotify_api_url.trim_end_matches('/').to_string(),
            market: settings.market.clone(),
            tokens: Mutex::new(TokenManager::new(
                database,
                settings.spotify_token_url.clone(),
                settings.spotify_client_id.clone(),
            )),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub(crate) fn market(&self) -> Option<&str> {
        self.market.as_deref()
    }

    /// Sends an authorized request, retrying on rate limits, bad gateways and
    /// expired tokens. Any other non-success status is returned as an error.
    pub(crate) async fn send<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response>
    where
        B: Serialize + Sync + ?Sized,
    {
        let mut refreshed = false;
        let mut attempts = 0;

        loop {
            attempts += 1;
            let token = self.tokens.lock().await.get_valid_token(&self.http).await?;

            let mut request = self.http.request(method.clone(), url).bearer_auth(token);
            if let Some(body) = body {
                request = request.json(body);
            }
            let response = request.send().await?;

            match response.status() {
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| value.parse::<u64>().ok())
                        .unwrap_or(1);
                    if retry_after > MAX_RETRY_AFTER_SECS {
                        return Err(BotError::catalog(format!(
                            "rate limited for {retry_after} seconds"
                        )));
                    }
                    tracing::warn!(retry_after, "Rate limited, waiting");
                    sleep(Duration::from_secs(retry_after)).await;
                }
                StatusCode::BAD_GATEWAY if attempts < MAX_ATTEMPTS => {
                    tracing::warn!(url, "Bad gateway, retrying");
                    sleep(BAD_GATEWAY_DELAY).await;
                }
                StatusCode::UNAUTHORIZED if !refreshed => {
                    refreshed = true;
                    self.tokens.lock().await.invalidate();
                }
                _ => return Ok(response.error_for_status()?),
            }
        }
    }
}
