use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use super::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "crawling": state.crawler.is_busy(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
