//! Configuration management for the bot.
//!
//! Values come from environment variables, optionally seeded from a `.env` file in
//! the local data directory:
//! - Linux: `~/.local/share/sporlbot/.env`
//! - macOS: `~/Library/Application Support/sporlbot/.env`
//! - Windows: `%LOCALAPPDATA%/sporlbot/.env`
//!
//! Only the client id is mandatory, everything else has a default.

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::error::{BotError, Result};

const APP_DIR: &str = "sporlbot";

/// Loads `.env` from the local data directory if it exists. Variables already set
/// in the environment win.
pub async fn load_env() -> Result<()> {
    let path = default_data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| BotError::config(e.to_string()))?;
    }
    Ok(())
}

pub fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub spotify_client_id: String,
    pub market: Option<String>,
    pub server_address: String,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    /// Minutes between two scheduled crawls.
    pub crawl_interval_minutes: u32,
    /// Minute within each interval at which the crawl fires.
    pub crawl_offset_minutes: u32,
    pub clear_notifier_interval: Duration,
    /// How long a playlist keeps its `[NEW]` indicator after the last update.
    pub new_indicator_timeout: chrono::Duration,
    /// Releases older than this many days are ignored.
    pub lookback_days: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let data_dir = env::var("SPORLBOT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());
        let log_file = env::var("SPORLBOT_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("sporlbot.log"));

        let crawl_interval_minutes: u32 = parse_var("CRAWL_INTERVAL_MINUTES", 15)?;
        let crawl_offset_minutes: u32 = parse_var("CRAWL_OFFSET_MINUTES", 1)?;
        if crawl_interval_minutes == 0 || crawl_offset_minutes >= crawl_interval_minutes {
            return Err(BotError::config(format!(
                "crawl offset ({}) must be below the crawl interval ({})",
                crawl_offset_minutes, crawl_interval_minutes
            )));
        }

        Ok(Self {
            spotify_api_url: env::var("SPOTIFY_API_URL")
                .unwrap_or_else(|_| "https://api.spotify.com/v1".to_string()),
            spotify_token_url: env::var("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string()),
            spotify_client_id: env::var("SPOTIFY_API_AUTH_CLIENT_ID")
                .map_err(|_| BotError::config("SPOTIFY_API_AUTH_CLIENT_ID must be set"))?,
            market: env::var("MARKET").ok().filter(|m| !m.trim().is_empty()),
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            data_dir,
            log_file,
            crawl_interval_minutes,
            crawl_offset_minutes,
            clear_notifier_interval: Duration::from_secs(parse_var(
                "CLEAR_NOTIFIER_INTERVAL_SECONDS",
                10,
            )?),
            new_indicator_timeout: chrono::Duration::minutes(parse_var(
                "NEW_INDICATOR_TIMEOUT_MINUTES",
                60,
            )?),
            lookback_days: parse_var("LOOKBACK_DAYS", 3)?,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| BotError::config(format!("{name} has an invalid value '{value}'"))),
        Err(_) => Ok(default),
    }
}
