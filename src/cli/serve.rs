use std::sync::Arc;

use crate::{
    api::AppState,
    error::Result,
    scheduler, server,
};

use super::Bot;

/// Runs until the server stops: a crawl right away and on every crawl slot,
/// notifier cleanup on its own interval, and the HTTP endpoints.
pub async fn serve(bot: Bot) -> Result<()> {
    let settings = &bot.settings;
    tracing::info!(
        interval = settings.crawl_interval_minutes,
        offset = settings.crawl_offset_minutes,
        "Starting crawl schedule"
    );

    let crawl_task = scheduler::spawn_crawl_schedule(
        Arc::clone(&bot.crawler),
        settings.crawl_interval_minutes,
        settings.crawl_offset_minutes,
    );
    let notifier_task = scheduler::spawn_clear_notifier_schedule(
        Arc::clone(&bot.crawler),
        settings.clear_notifier_interval,
    );

    let state = AppState {
        crawler: Arc::clone(&bot.crawler),
        log_file: settings.log_file.clone(),
    };
    let result = server::start_api_server(&settings.server_address, state).await;

    crawl_task.abort();
    notifier_task.abort();
    result
}
