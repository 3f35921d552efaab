use std::{net::SocketAddr, str::FromStr};

use axum::{Router, routing::get};

use crate::{
    api::{self, AppState},
    error::{BotError, Result},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/refresh", get(api::refresh))
        .route("/clear-notifiers", get(api::clear_notifiers))
        .route("/log", get(api::log))
        .with_state(state)
}

pub async fn start_api_server(address: &str, state: AppState) -> Result<()> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| BotError::config(format!("Failed to parse server address: {e}")))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
