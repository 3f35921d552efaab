use async_trait::async_trait;
use reqwest::Method;

use crate::{
    error::{BotError, Result},
    types::{AddTrackToPlaylistRequest, Playlist, UpdatePlaylistRequest},
};

use super::{Publisher, SpotifyClient};

/// Spotify's limit for `POST /playlists/{id}/tracks`.
const ADD_TRACKS_LIMIT: usize = 100;

#[async_trait]
impl Publisher for SpotifyClient {
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let api_url = self.url(&format!("/playlists/{playlist_id}/tracks"));
        for chunk in uris.chunks(ADD_TRACKS_LIMIT) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            self.send(Method::POST, &api_url, Some(&body))
                .await
                .map_err(|e| BotError::publish(format!("adding tracks to {playlist_id}: {e}")))?;
        }
        Ok(())
    }

    async fn playlist_name(&self, playlist_id: &str) -> Result<String> {
        let api_url = self.url(&format!("/playlists/{playlist_id}?fields=id,name"));
        let response = self.send::<()>(Method::GET, &api_url, None).await?;
        Ok(response.json::<Playlist>().await?.name)
    }

    async fn rename_playlist(&self, playlist_id: &str, name: &str) -> Result<()> {
        let api_url = self.url(&format!("/playlists/{playlist_id}"));
        let body = UpdatePlaylistRequest {
            name: name.to_string(),
        };
        self.send(Method::PUT, &api_url, Some(&body))
            .await
            .map_err(|e| BotError::publish(format!("renaming {playlist_id}: {e}")))?;
        Ok(())
    }
}
