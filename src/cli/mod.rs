//! # CLI Module
//!
//! User-facing commands. All of them share the same wiring, built by
//! [`Bot::from_settings`]:
//!
//! ```text
//! FileDatabase ─┬─ PlaylistStoreCache ─┐
//!               └─ SpotifyClient ──────┼─ Crawler ─ scheduler / api
//!                        CrawlGuard ───┘
//! ```
//!
//! - [`serve`] - periodic crawls, notifier cleanup and the HTTP server
//! - [`crawl`] / [`clear_notifiers`] - one manual run
//! - [`list_playlists`] / [`set_playlist`] - playlist store configuration
//! - [`save_token`] - stores catalog credentials
//! - [`show_log`] - prints the log file

mod crawl;
mod log;
mod playlists;
mod serve;

use std::sync::Arc;

use crate::{
    config::Settings,
    config_cache::PlaylistStoreCache,
    crawler::{CrawlOptions, Crawler},
    guard::CrawlGuard,
    management::{BotDatabase, FileDatabase},
    spotify::SpotifyClient,
};

pub use crawl::{clear_notifiers, crawl};
pub use log::show_log;
pub use playlists::{list_playlists, save_token, set_playlist};
pub use serve::serve;

/// The wired-up bot.
pub struct Bot {
    pub settings: Settings,
    pub database: Arc<dyn BotDatabase>,
    pub crawler: Arc<Crawler>,
}

impl Bot {
    pub fn from_settings(settings: Settings) -> Self {
        let database: Arc<dyn BotDatabase> = Arc::new(FileDatabase::new(settings.data_dir.clone()));
        let cache = Arc::new(PlaylistStoreCache::new(Arc::clone(&database)));
        let client = Arc::new(SpotifyClient::new(&settings, Arc::clone(&database)));

        let crawler = Crawler::new(
            Arc::new(CrawlGuard::new()),
            cache,
            Arc::clone(&database),
            client.clone(),
            client,
        )
        .with_options(CrawlOptions::from(&settings));

        Self {
            settings,
            database,
            crawler: Arc::new(crawler),
        }
    }
}
