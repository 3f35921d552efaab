use axum::{extract::State, http::StatusCode};

use crate::{
    error::Result,
    scheduler::{self, TriggerOutcome},
};

use super::AppState;

pub async fn refresh(State(state): State<AppState>) -> (StatusCode, String) {
    into_response(
        scheduler::trigger_crawl(&state.crawler).await,
        "Previous crawling process is still ongoing...",
    )
}

pub async fn clear_notifiers(State(state): State<AppState>) -> (StatusCode, String) {
    into_response(
        scheduler::trigger_clear_notifiers(&state.crawler).await,
        "Can't clear indicators now, crawler is in progress...",
    )
}

pub(crate) fn into_response(
    outcome: Result<TriggerOutcome>,
    busy_message: &str,
) -> (StatusCode, String) {
    match outcome {
        Ok(TriggerOutcome::AcceptedWithChanges(summary)) => (StatusCode::CREATED, summary),
        Ok(TriggerOutcome::AcceptedNoChanges) => (StatusCode::NO_CONTENT, String::new()),
        Ok(TriggerOutcome::RejectedBusy) => (StatusCode::CONFLICT, busy_message.to_string()),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
