use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{BotError, Result},
    types::Token,
};

use super::BotDatabase;

/// Seconds before the real expiry at which a token is treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
}

/// Hands out a valid access token, refreshing and persisting it when needed.
pub struct TokenManager {
    database: Arc<dyn BotDatabase>,
    token_url: String,
    client_id: String,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(database: Arc<dyn BotDatabase>, token_url: String, client_id: String) -> Self {
        Self {
            database,
            token_url,
            client_id,
            token: None,
        }
    }

    pub async fn get_valid_token(&mut self, client: &Client) -> Result<String> {
        let token = match self.token.take() {
            Some(token) => token,
            None => self.database.load_credentials().await?.ok_or_else(|| {
                BotError::catalog("no credentials stored, save an access and refresh token first")
            })?,
        };

        let token = if Self::is_expired(&token) {
            self.refresh_token(client, &token).await?
        } else {
            token
        };

        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    /// Drops the in-memory token so the next call reloads or refreshes it.
    pub fn invalidate(&mut self) {
        if let Some(token) = self.token.as_mut() {
            token.expires_in = 0;
        }
    }

    fn is_expired(token: &Token) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
    }

    async fn refresh_token(&self, client: &Client, token: &Token) -> Result<Token> {
        tracing::debug!("Refreshing access token");
        let response = client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", token.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let refreshed: RefreshResponse = response.json().await?;
        // the refresh token is only rotated sometimes
        let refresh_token = refreshed
            .refresh_token
            .unwrap_or_else(|| token.refresh_token.clone());

        self.database
            .save_credentials(&refreshed.access_token, &refresh_token)
            .await?;

        Ok(Token {
            access_token: refreshed.access_token,
            refresh_token,
            expires_in: refreshed.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}
