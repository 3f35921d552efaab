use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::logging;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    limit: Option<i64>,
}

pub async fn log(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    logging::read_log(&state.log_file, query.limit)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
}
