use reqwest::Client;
use reqwest::header::USER_AGENT;

use crate::chess::models::PlayerStats;
use crate::error::{AppError, Result};

/// Public chess.com stats API. No authentication, but the API asks callers
/// to identify themselves through `User-Agent`.
pub struct ChessClient {
    http_client: Client,
    api_base: String,
    username: String,
    user_agent: String,
}

impl ChessClient {
    pub fn new(http_client: Client, api_base: &str, username: &str, user_agent: &str) -> Self {
        Self {
            http_client,
            api_base: api_base.trim_end_matches('/').to_string(),
            username: username.to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    pub fn stats_url(&self) -> String {
        format!(
            "{}/player/{}/stats",
            self.api_base,
            urlencoding::encode(&self.username)
        )
    }

    pub async fn player_stats(&self) -> Result<PlayerStats> {
        let response = self
            .http_client
            .get(self.stats_url())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamFetch(format!(
                "chess.com stats returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamFetch(format!("Failed to parse chess.com stats: {}", e)))
    }
}
