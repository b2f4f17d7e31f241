use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::spotify::auth::SpotifyAuth;
use crate::spotify::models::{CurrentlyPlaying, PlaybackSource, RecentlyPlayed};

/// Fetches the account's playback state from the Spotify Web API.
pub struct SpotifyClient {
    http_client: Client,
    auth: SpotifyAuth,
    api_base: String,
}

impl SpotifyClient {
    pub fn new(http_client: Client, auth: SpotifyAuth, api_base: &str) -> Self {
        Self {
            http_client,
            auth,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Currently playing track, falling back to the most recently played one.
    pub async fn playback(&self) -> Result<PlaybackSource> {
        let token = self.auth.access_token().await?;

        if let Some(current) = self.currently_playing(&token).await? {
            if let Some(track) = current.item {
                return Ok(PlaybackSource::Current {
                    is_playing: current.is_playing.unwrap_or(false),
                    progress_ms: current.progress_ms,
                    track,
                });
            }
        }

        debug!("Nothing playing, checking recently played");

        let recent = self.recently_played(&token).await?;
        Ok(recent
            .items
            .into_iter()
            .next()
            .and_then(|item| item.track)
            .map(PlaybackSource::Recent)
            .unwrap_or(PlaybackSource::Nothing))
    }

    /// `None` when the upstream reports nothing playing (204 or 202).
    async fn currently_playing(&self, token: &str) -> Result<Option<CurrentlyPlaying>> {
        let url = format!("{}/me/player/currently-playing", self.api_base);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::ACCEPTED {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::UpstreamFetch(format!(
                "currently-playing returned {}",
                status
            )));
        }

        let body = response.json().await.map_err(|e| {
            AppError::UpstreamFetch(format!("Failed to parse currently-playing: {}", e))
        })?;

        Ok(Some(body))
    }

    async fn recently_played(&self, token: &str) -> Result<RecentlyPlayed> {
        let url = format!("{}/me/player/recently-played", self.api_base);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(&[("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamFetch(format!(
                "recently-played returned {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::UpstreamFetch(format!("Failed to parse recently-played: {}", e))
        })
    }
}
