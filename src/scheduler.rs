//! The two periodic triggers and their manual counterparts.
//!
//! The crawl trigger fires once at startup and then on every crawl slot (see
//! [`utils::next_crawl_delay`]); the notifier trigger fires every few seconds.
//! They are not coordinated with each other beyond the crawl guard.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{task::JoinHandle, time::sleep};

use crate::{crawler::Crawler, error::Result, utils};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The run happened and changed something; carries a summary.
    AcceptedWithChanges(String),
    AcceptedNoChanges,
    /// A crawl is in progress, nothing was done.
    RejectedBusy,
}

pub async fn trigger_crawl(crawler: &Crawler) -> Result<TriggerOutcome> {
    let Some(results) = crawler.run_crawler().await? else {
        return Ok(TriggerOutcome::RejectedBusy);
    };

    Ok(match utils::compile_result_string(&results) {
        Some(summary) => {
            tracing::info!("{}", summary);
            TriggerOutcome::AcceptedWithChanges(summary)
        }
        None => TriggerOutcome::AcceptedNoChanges,
    })
}

pub async fn trigger_clear_notifiers(crawler: &Crawler) -> Result<TriggerOutcome> {
    Ok(match crawler.clear_obsolete_notifiers().await? {
        None => TriggerOutcome::RejectedBusy,
        Some(0) => TriggerOutcome::AcceptedNoChanges,
        Some(cleared) => TriggerOutcome::AcceptedWithChanges(format!(
            "Cleared the new indicator of {cleared} playlist(s)"
        )),
    })
}

pub fn spawn_crawl_schedule(
    crawler: Arc<Crawler>,
    interval_minutes: u32,
    offset_minutes: u32,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            // failures are logged by the crawler; the next slot tries again
            if let Ok(TriggerOutcome::RejectedBusy) = trigger_crawl(&crawler).await {
                tracing::info!("Previous crawling process is still ongoing...");
            }

            let delay = utils::next_crawl_delay(Utc::now(), interval_minutes, offset_minutes);
            sleep(delay.max(Duration::from_secs(1))).await;
        }
    })
}

pub fn spawn_clear_notifier_schedule(crawler: Arc<Crawler>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(e) = trigger_clear_notifiers(&crawler).await {
                tracing::warn!(error = %e, "Clearing notifiers failed");
            }
        }
    })
}
