//! Error types shared across the bot.
//!
//! A busy crawler is not an error: it is reported as
//! [`TriggerOutcome::RejectedBusy`](crate::scheduler::TriggerOutcome). Everything
//! that actually went wrong ends up in [`BotError`].

use thiserror::Error;

use crate::category::AlbumGroupExtended;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    /// The persistence layer could not load or write bot data.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A playlist store operation referenced a group the database doesn't know.
    #[error("Storage error: no playlist store configured for {0}")]
    UnknownPlaylistStore(AlbumGroupExtended),

    /// The catalog rejected or failed a lookup.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Writing to a destination playlist failed.
    #[error("Publish error: {0}")]
    Publish(String),

    /// The log sink could not be read.
    #[error("Log error: {0}")]
    Observability(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl BotError {
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage(reason.into())
    }

    pub fn catalog(reason: impl Into<String>) -> Self {
        Self::Catalog(reason.into())
    }

    pub fn publish(reason: impl Into<String>) -> Self {
        Self::Publish(reason.into())
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    /// Storage problems are the ones an operator has to look at.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::UnknownPlaylistStore(_))
    }
}
