//! Log setup and the log read interface.
//!
//! Everything goes through `tracing`. [`init`] writes to stdout and appends a
//! plain-text copy to the bot's log file, which is what [`read_log`] serves to
//! the `/log` endpoint and the `log` command.

use std::{
    fs::OpenOptions,
    io::ErrorKind,
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{BotError, Result};

pub const DEFAULT_LOG_READ_LINES: usize = 100;
pub const MAX_LINE_LENGTH: usize = 160;

pub fn init(log_file: &Path, verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("sporlbot=debug,info")
        } else {
            EnvFilter::new("sporlbot=info,warn")
        }
    });

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| BotError::Observability(e.to_string()))
}

/// Cuts messages longer than [`MAX_LINE_LENGTH`] characters, ending them with `...`.
pub fn truncate_to_ellipsis(message: &str) -> String {
    if message.chars().count() <= MAX_LINE_LENGTH {
        return message.to_string();
    }
    let mut truncated: String = message.chars().take(MAX_LINE_LENGTH - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Reads the first lines of the log file.
///
/// `limit` defaults to [`DEFAULT_LOG_READ_LINES`]; a negative limit reads the
/// whole file.
pub async fn read_log(path: &Path, limit: Option<i64>) -> Result<Vec<String>> {
    let limit = match limit {
        None => DEFAULT_LOG_READ_LINES,
        Some(n) if n < 0 => usize::MAX,
        Some(n) => n as usize,
    };

    let content = async_fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            BotError::Observability(format!(
                "Couldn't find log file under expected location {}",
                path.display()
            ))
        } else {
            BotError::Observability(format!(
                "Log file is locked, likely because it is being written to. Try again. ({e})"
            ))
        }
    })?;

    Ok(content.lines().take(limit).map(str::to_string).collect())
}
