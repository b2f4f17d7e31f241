use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use parking_lot::Mutex;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::debug;

use crate::config::SpotifyCredentials;
use crate::error::{AppError, Result};
use crate::spotify::models::TokenResponse;

/// Tokens are dropped this long before the upstream says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);
/// Upper bound on how long a token is reused, whatever `expires_in` says.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Exchanges the long-lived refresh token for short-lived access tokens.
pub struct SpotifyAuth {
    http_client: Client,
    credentials: SpotifyCredentials,
    token_url: String,
    cached: Mutex<Option<CachedToken>>,
}

/// `Basic base64(client_id:client_secret)`
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", client_id, client_secret))
    )
}

impl SpotifyAuth {
    pub fn new(http_client: Client, credentials: SpotifyCredentials, accounts_url: &str) -> Self {
        Self {
            http_client,
            credentials,
            token_url: format!("{}/api/token", accounts_url.trim_end_matches('/')),
            cached: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.cached_token() {
            debug!("Reusing cached Spotify access token");
            return Ok(token);
        }

        let response = self
            .http_client
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                basic_authorization(&self.credentials.client_id, &self.credentials.client_secret),
            )
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.credentials.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamAuth(format!(
                "Token refresh returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Failed to parse token response: {}", e)))?;

        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::UpstreamAuth("Token response had no access_token".into()))?;

        self.remember(&access_token, token.expires_in);
        debug!("Refreshed Spotify access token");

        Ok(access_token)
    }

    fn cached_token(&self) -> Option<String> {
        let cached = self.cached.lock();
        cached
            .as_ref()
            .filter(|c| Instant::now() < c.expires_at)
            .map(|c| c.access_token.clone())
    }

    fn remember(&self, access_token: &str, expires_in: Option<u64>) {
        let lifetime = expires_in
            .map(Duration::from_secs)
            .and_then(|d| d.checked_sub(EXPIRY_MARGIN))
            .filter(|d| !d.is_zero())
            .map(|d| d.min(MAX_TOKEN_LIFETIME));

        let mut cached = self.cached.lock();
        *cached = lifetime
            .and_then(|lifetime| Instant::now().checked_add(lifetime))
            .map(|expires_at| CachedToken {
                access_token: access_token.to_string(),
                expires_at,
            });
    }
}
