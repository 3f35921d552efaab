use std::collections::HashMap;

use reqwest::Method;

use crate::{
    category::AlbumGroups,
    error::Result,
    types::{Album, AlbumResponse, AlbumTrackPair, GetSeveralAlbumsResponse},
};

use super::SpotifyClient;

const RELEASES_PAGE_SIZE: u32 = 50;
/// Spotify's limit for `GET /albums`.
const SEVERAL_ALBUMS_LIMIT: usize = 20;

/// Retrieves every release of an artist in the given groups, following `next`
/// links until the listing is exhausted.
pub async fn get_releases_for_artist(
    client: &SpotifyClient,
    artist_id: &str,
    groups: &AlbumGroups,
) -> Result<Vec<Album>> {
    let mut api_url = client.url(&format!(
        "/artists/{id}/albums?include_groups={include_groups}&limit={limit}",
        id = artist_id,
        include_groups = groups,
        limit = RELEASES_PAGE_SIZE
    ));
    if let Some(market) = client.market() {
        api_url.push_str(&format!("&market={market}"));
    }

    let mut releases = Vec::new();
    let mut next = Some(api_url);
    while let Some(url) = next {
        let response = client.send::<()>(Method::GET, &url, None).await?;
        let page = response.json::<AlbumResponse>().await?;
        releases.extend(page.items);
        next = page.next;
    }

    Ok(releases)
}

/// Looks up track listings in batches of 20 and pairs them with the albums
/// they belong to, keeping the order of `albums`.
pub async fn get_album_tracks(
    client: &SpotifyClient,
    albums: &[Album],
) -> Result<Vec<AlbumTrackPair>> {
    let mut pairs = Vec::with_capacity(albums.len());

    for chunk in albums.chunks(SEVERAL_ALBUMS_LIMIT) {
        let album_ids = chunk
            .iter()
            .map(|a| a.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let mut api_url = client.url(&format!("/albums?ids={album_ids}"));
        if let Some(market) = client.market() {
            api_url.push_str(&format!("&market={market}"));
        }

        let response = client.send::<()>(Method::GET, &api_url, None).await?;
        let json = response.json::<GetSeveralAlbumsResponse>().await?;

        let mut tracks_by_id: HashMap<String, _> = json
            .albums
            .into_iter()
            .flatten()
            .map(|album| (album.id, album.tracks.items))
            .collect();

        for album in chunk {
            match tracks_by_id.remove(&album.id) {
                Some(tracks) => pairs.push(AlbumTrackPair::new(album.clone(), tracks)),
                None => {
                    tracing::warn!(album = %album.name, "Catalog returned no tracks for release")
                }
            }
        }
    }

    Ok(pairs)
}
