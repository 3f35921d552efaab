use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error::Result,
    info,
    scheduler::{self, TriggerOutcome},
    success, warning,
};

use super::Bot;

pub async fn crawl(bot: &Bot) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Crawling releases of followed artists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let outcome = scheduler::trigger_crawl(&bot.crawler).await;
    pb.finish_and_clear();

    match outcome? {
        TriggerOutcome::AcceptedWithChanges(summary) => success!("{}", summary),
        TriggerOutcome::AcceptedNoChanges => info!("No new songs found."),
        TriggerOutcome::RejectedBusy => warning!("Previous crawling process is still ongoing..."),
    }
    Ok(())
}

pub async fn clear_notifiers(bot: &Bot) -> Result<()> {
    match scheduler::trigger_clear_notifiers(&bot.crawler).await? {
        TriggerOutcome::AcceptedWithChanges(summary) => success!("{}", summary),
        TriggerOutcome::AcceptedNoChanges => info!("No indicator to clear."),
        TriggerOutcome::RejectedBusy => {
            warning!("Can't clear indicators now, crawler is in progress...")
        }
    }
    Ok(())
}
