//! One crawl: discover new releases of followed artists, file them into their
//! album groups and append their tracks to the matching playlists.
//!
//! ```text
//! enabled groups → followed artists → releases → unseen → recent → tracks
//!   → appears-on cleanup → remap → publish → refresh stores
//! ```
//!
//! Each filter stage reports what it dropped through [`crate::diff`]. The whole
//! run holds the [`CrawlGuard`]; notifier maintenance only checks it.

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};

use crate::{
    category::{AlbumGroup, AlbumGroupExtended, AlbumGroups},
    config::Settings,
    config_cache::PlaylistStoreCache,
    diff,
    error::Result,
    guard::CrawlGuard,
    management::BotDatabase,
    remapper::RemapperPipeline,
    spotify::{Catalog, Publisher},
    types::{Album, AlbumTrackPair, Artist},
    utils,
};

/// Prefix marking a playlist that received songs recently.
pub const NEW_INDICATOR: &str = "[NEW] ";

/// Songs added per extended group by one crawl.
pub type CrawlResults = BTreeMap<AlbumGroupExtended, usize>;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub lookback_days: u32,
    pub new_indicator_timeout: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            lookback_days: 3,
            new_indicator_timeout: Duration::minutes(60),
        }
    }
}

impl From<&Settings> for CrawlOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            lookback_days: settings.lookback_days,
            new_indicator_timeout: settings.new_indicator_timeout,
        }
    }
}

pub struct Crawler {
    guard: Arc<CrawlGuard>,
    cache: Arc<PlaylistStoreCache>,
    database: Arc<dyn BotDatabase>,
    catalog: Arc<dyn Catalog>,
    publisher: Arc<dyn Publisher>,
    remappers: RemapperPipeline,
    options: CrawlOptions,
}

impl Crawler {
    pub fn new(
        guard: Arc<CrawlGuard>,
        cache: Arc<PlaylistStoreCache>,
        database: Arc<dyn BotDatabase>,
        catalog: Arc<dyn Catalog>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            guard,
            cache,
            database,
            catalog,
            publisher,
            remappers: RemapperPipeline::default(),
            options: CrawlOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CrawlOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn cache(&self) -> &PlaylistStoreCache {
        &self.cache
    }

    /// Runs a crawl unless one is in progress, in which case `None` comes back.
    /// The guard is released on every exit path.
    pub async fn run_crawler(&self) -> Result<Option<CrawlResults>> {
        let Some(_permit) = self.guard.try_lock() else {
            tracing::info!("Crawl requested while another crawl is running");
            return Ok(None);
        };

        tracing::debug!("Crawl started");
        let today = Utc::now().date_naive();
        match self.crawl(today).await {
            Ok(results) => Ok(Some(results)),
            Err(e) => {
                tracing::error!(error = %e, "Crawl failed");
                Err(e)
            }
        }
    }

    async fn crawl(&self, today: NaiveDate) -> Result<CrawlResults> {
        let enabled: AlbumGroups = self
            .cache
            .enabled_album_groups()
            .await?
            .into_iter()
            .collect();
        if enabled.is_empty() {
            tracing::warn!("No playlist is configured, nothing to crawl");
            return Ok(CrawlResults::new());
        }

        let artists = self.catalog.followed_artists().await?;
        if artists.is_empty() {
            tracing::warn!("No followed artists found");
            return Ok(CrawlResults::new());
        }

        let mut releases = Vec::new();
        for artist in &artists {
            releases.extend(self.catalog.artist_releases(&artist.id, &enabled).await?);
        }
        utils::remove_duplicate_albums(&mut releases);

        let new_releases = self.filter_unseen(&releases, &enabled).await?;
        let recent = filter_recent(&new_releases, today, self.options.lookback_days);
        if recent.is_empty() {
            return Ok(CrawlResults::new());
        }

        let album_track_pairs = self.catalog.album_tracks(&recent).await?;
        let album_track_pairs = filter_appears_on_tracks(album_track_pairs, &artists);

        let enabled_extended = self.cache.enabled_extended_groups().await?;
        let grouped = self
            .remappers
            .restricted_to(&enabled_extended)
            .remap(album_track_pairs);

        self.publish(grouped).await
    }

    /// Drops releases seen by an earlier crawl and those outside the enabled
    /// groups, then remembers every remaining id.
    async fn filter_unseen(&self, releases: &[Album], enabled: &AlbumGroups) -> Result<Vec<Album>> {
        let known = self.database.known_release_ids().await?;
        let unseen: Vec<Album> = releases
            .iter()
            .filter(|album| !known.contains(&album.id))
            .filter(|album| album.album_group().is_some_and(|g| enabled.contains(g)))
            .cloned()
            .collect();

        diff::log_album_difference(releases, &unseen, "Dropped known or unsupported releases:");

        let ids: Vec<String> = unseen.iter().map(|album| album.id.clone()).collect();
        self.database.store_release_ids(&ids).await?;
        Ok(unseen)
    }

    async fn publish(
        &self,
        grouped: BTreeMap<AlbumGroupExtended, Vec<AlbumTrackPair>>,
    ) -> Result<CrawlResults> {
        let mut results = CrawlResults::new();

        for (group, mut album_track_pairs) in grouped {
            let Some(store) = self.cache.get(group).await? else {
                tracing::warn!(group = %group, "No playlist store for group");
                continue;
            };
            let Some(playlist_id) = store.enabled_playlist_id() else {
                tracing::warn!(group = %group, "Playlist store is disabled");
                continue;
            };

            utils::sort_album_track_pairs(&mut album_track_pairs);
            let uris: Vec<String> = album_track_pairs
                .iter()
                .flat_map(|atp| atp.tracks.iter().map(|track| track.uri.clone()))
                .collect();
            if uris.is_empty() {
                continue;
            }

            self.publisher.add_tracks(playlist_id, &uris).await?;
            self.cache.refresh(group).await?;
            self.mark_new(playlist_id).await?;

            tracing::info!(
                group = %group,
                releases = album_track_pairs.len(),
                songs = uris.len(),
                "Added songs to playlist"
            );
            results.insert(group, uris.len());
        }

        Ok(results)
    }

    async fn mark_new(&self, playlist_id: &str) -> Result<()> {
        let name = self.publisher.playlist_name(playlist_id).await?;
        if !name.starts_with(NEW_INDICATOR) {
            self.publisher
                .rename_playlist(playlist_id, &format!("{NEW_INDICATOR}{name}"))
                .await?;
        }
        Ok(())
    }

    /// Removes the `[NEW]` indicator from playlists whose last update is older
    /// than the timeout. Skipped while a crawl is running; `None` in that case,
    /// otherwise the number of cleared playlists.
    pub async fn clear_obsolete_notifiers(&self) -> Result<Option<usize>> {
        if self.guard.is_busy() {
            return Ok(None);
        }
        self.clear_notifiers_at(Utc::now()).await.map(Some)
    }

    async fn clear_notifiers_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let stores = self.cache.get_all().await?;
        let mut cleared = 0;

        for group in AlbumGroupExtended::ALL {
            let Some(store) = stores.get(&group) else {
                continue;
            };
            let (Some(playlist_id), Some(last_update)) =
                (store.enabled_playlist_id(), store.last_update)
            else {
                continue;
            };
            if now - last_update < self.options.new_indicator_timeout {
                continue;
            }

            let name = self.publisher.playlist_name(playlist_id).await?;
            if let Some(stripped) = name.strip_prefix(NEW_INDICATOR) {
                self.publisher.rename_playlist(playlist_id, stripped).await?;
            }
            self.cache.unset(group).await?;
            tracing::debug!(group = %group, "Cleared new indicator");
            cleared += 1;
        }

        Ok(cleared)
    }
}

/// Keeps day-precision releases from the last `lookback_days` days. A window
/// reaching past the calendar range keeps everything.
fn filter_recent(releases: &[Album], today: NaiveDate, lookback_days: u32) -> Vec<Album> {
    let earliest = today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN);
    let recent: Vec<Album> = releases
        .iter()
        .filter(|album| album.release_day().is_some_and(|day| day >= earliest))
        .cloned()
        .collect();

    diff::log_album_difference(releases, &recent, "Dropped old or imprecisely dated releases:");
    recent
}

/// Appears-on releases only contribute the tracks a followed artist plays on.
/// Releases left without tracks are dropped.
fn filter_appears_on_tracks(
    album_track_pairs: Vec<AlbumTrackPair>,
    artists: &[Artist],
) -> Vec<AlbumTrackPair> {
    let followed: HashSet<&str> = artists.iter().map(|artist| artist.id.as_str()).collect();
    let before = album_track_pairs.clone();

    let filtered: Vec<AlbumTrackPair> = album_track_pairs
        .into_iter()
        .filter_map(|mut atp| {
            if atp.album.album_group() == Some(AlbumGroup::AppearsOn) {
                atp.tracks.retain(|track| {
                    track
                        .artists
                        .iter()
                        .any(|artist| followed.contains(artist.id.as_str()))
                });
            }
            (!atp.tracks.is_empty()).then_some(atp)
        })
        .collect();

    diff::log_album_track_pair_difference(
        &before,
        &filtered,
        "Dropped releases without tracks by followed artists:",
    );
    filtered
}
