//! # API Module
//!
//! HTTP endpoints of the bot's local server. Each periodic trigger can also be
//! fired by hand:
//!
//! - [`refresh`] - `GET /refresh`, runs a crawl
//!   - `201 Created`: new songs were added
//!   - `204 No Content`: nothing new
//!   - `409 Conflict`: a crawl is still in progress
//! - [`clear_notifiers`] - `GET /clear-notifiers`, same codes for notifier cleanup
//! - [`log`] - `GET /log?limit=N`, the first lines of the log file
//! - [`health`] - `GET /health`, status and version
//!
//! Storage or catalog failures answer `500 Internal Server Error` with the error
//! message as body.

mod health;
mod log;
mod trigger;

use std::{path::PathBuf, sync::Arc};

use crate::crawler::Crawler;

pub use health::health;
pub use log::log;
pub use trigger::{clear_notifiers, refresh};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub crawler: Arc<Crawler>,
    pub log_file: PathBuf,
}
