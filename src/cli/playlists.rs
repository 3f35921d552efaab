use tabled::Table;

use crate::{
    category::AlbumGroupExtended,
    error::Result,
    info, success,
    types::PlaylistStoreTableRow,
};

use super::Bot;

pub async fn list_playlists(bot: &Bot) -> Result<()> {
    let stores = bot.crawler.cache().get_all().await?;

    let rows: Vec<PlaylistStoreTableRow> = AlbumGroupExtended::ALL
        .iter()
        .filter_map(|group| stores.get(group))
        .map(PlaylistStoreTableRow::from)
        .collect();

    if rows.is_empty() {
        info!("No playlist stores configured.");
        return Ok(());
    }

    println!("{}", Table::new(rows));
    Ok(())
}

pub async fn set_playlist(
    bot: &Bot,
    group: AlbumGroupExtended,
    playlist_id: Option<String>,
) -> Result<()> {
    let playlist_id = playlist_id.filter(|id| !id.trim().is_empty());
    let enabled = playlist_id.is_some();
    bot.crawler.cache().set_playlist_id(group, playlist_id).await?;

    if enabled {
        success!("Playlist for {} set.", group.label());
    } else {
        success!("{} disabled.", group.label());
    }
    Ok(())
}

pub async fn save_token(bot: &Bot, access_token: &str, refresh_token: &str) -> Result<()> {
    bot.database
        .save_credentials(access_token, refresh_token)
        .await?;
    success!("Credentials saved.");
    Ok(())
}
