use async_trait::async_trait;
use reqwest::Method;

use crate::{
    category::AlbumGroups,
    error::Result,
    types::{Album, AlbumTrackPair, Artist, FollowedArtistsResponse},
};

use super::{Catalog, SpotifyClient, releases};

const FOLLOWED_ARTISTS_PAGE_SIZE: u32 = 50;

impl SpotifyClient {
    /// Retrieves one page of followed artists and the cursor of the next page.
    pub async fn get_artists(&self, after: Option<&str>) -> Result<(Vec<Artist>, Option<String>)> {
        let mut api_url = self.url(&format!(
            "/me/following?type=artist&limit={limit}",
            limit = FOLLOWED_ARTISTS_PAGE_SIZE
        ));
        if let Some(after) = after {
            api_url.push_str(&format!("&after={after}"));
        }

        let response = self.send::<()>(Method::GET, &api_url, None).await?;
        let res = response.json::<FollowedArtistsResponse>().await?;
        let next_after = res.artists.cursors.and_then(|c| c.after);
        Ok((res.artists.items, next_after))
    }
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn followed_artists(&self) -> Result<Vec<Artist>> {
        let mut artists = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let (page, next) = self.get_artists(after.as_deref()).await?;
            artists.extend(page);
            match next {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }

        tracing::debug!(artists = artists.len(), "Fetched followed artists");
        Ok(artists)
    }

    async fn artist_releases(&self, artist_id: &str, groups: &AlbumGroups) -> Result<Vec<Album>> {
        releases::get_releases_for_artist(self, artist_id, groups).await
    }

    async fn album_tracks(&self, albums: &[Album]) -> Result<Vec<AlbumTrackPair>> {
        releases::get_album_tracks(self, albums).await
    }
}
