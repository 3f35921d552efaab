//! Spotify Release Bot Library
//!
//! Crawls the releases of followed artists on Spotify, sorts new releases into
//! album groups and appends their songs to one playlist per group.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local server
//! - `category` - Base and extended album groups
//! - `cli` - Command-line interface implementations
//! - `config` - Environment based configuration
//! - `config_cache` - Cached playlist store configuration
//! - `crawler` - The crawl pipeline and notifier maintenance
//! - `diff` - Reporting of releases dropped by filters
//! - `error` - Crate error type
//! - `guard` - Mutual exclusion of crawl runs
//! - `logging` - Tracing setup and log reading
//! - `management` - Persistence of playlist stores, credentials and seen releases
//! - `remapper` - Reclassification into extended album groups
//! - `scheduler` - Periodic triggers
//! - `server` - Local HTTP server
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod category;
pub mod cli;
pub mod config;
pub mod config_cache;
pub mod crawler;
pub mod diff;
pub mod error;
pub mod guard;
pub mod logging;
pub mod management;
pub mod remapper;
pub mod scheduler;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{BotError, Result};

/// Prints an informational message with a blue bullet point.
///
/// Console output for CLI commands; everything that belongs in the log goes
/// through `tracing` instead.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in the binary; library code returns [`BotError`].
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
