use std::time::Duration;

use url::Url;

use crate::error::{AppError, Result};

const DEFAULT_CHESS_USERNAME: &str = "chesschampv1";
const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_CHESS_API_URL: &str = "https://api.chess.com/pub";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Client credentials plus the long-lived refresh token for the playback API.
#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub spotify_refresh_token: Option<String>,
    pub redis_url: Option<String>,
    pub chess_username: String,
    pub chess_user_agent: String,
    pub spotify_accounts_url: String,
    pub spotify_api_url: String,
    pub chess_api_url: String,
    pub upstream_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spotify_client_id: None,
            spotify_client_secret: None,
            spotify_refresh_token: None,
            redis_url: None,
            chess_username: DEFAULT_CHESS_USERNAME.to_string(),
            chess_user_agent: default_user_agent(),
            spotify_accounts_url: DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string(),
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            chess_api_url: DEFAULT_CHESS_API_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::Config(format!("UPSTREAM_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                if secs == 0 {
                    return Err(AppError::Config("UPSTREAM_TIMEOUT_SECS must be positive".into()));
                }
                Duration::from_secs(secs)
            }
            None => defaults.upstream_timeout,
        };

        let config = Self {
            spotify_client_id: get("SPOTIFY_CLIENT_ID"),
            spotify_client_secret: get("SPOTIFY_CLIENT_SECRET"),
            spotify_refresh_token: get("SPOTIFY_REFRESH_TOKEN"),
            redis_url: get("REDIS_URL"),
            chess_username: get("CHESS_USERNAME").unwrap_or(defaults.chess_username),
            chess_user_agent: get("CHESS_USER_AGENT").unwrap_or(defaults.chess_user_agent),
            spotify_accounts_url: get("SPOTIFY_ACCOUNTS_URL")
                .unwrap_or(defaults.spotify_accounts_url),
            spotify_api_url: get("SPOTIFY_API_URL").unwrap_or(defaults.spotify_api_url),
            chess_api_url: get("CHESS_API_URL").unwrap_or(defaults.chess_api_url),
            upstream_timeout,
        };

        config.validate_urls()?;
        Ok(config)
    }

    fn validate_urls(&self) -> Result<()> {
        for (name, value) in [
            ("SPOTIFY_ACCOUNTS_URL", &self.spotify_accounts_url),
            ("SPOTIFY_API_URL", &self.spotify_api_url),
            ("CHESS_API_URL", &self.chess_api_url),
        ] {
            let url = Url::parse(value)
                .map_err(|e| AppError::Config(format!("{} is not a valid URL: {}", name, e)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(AppError::Config(format!(
                    "{} must be an http(s) URL, got {}",
                    name,
                    url.scheme()
                )));
            }
        }
        Ok(())
    }

    /// Playback credentials, present only when all three values are set.
    pub fn spotify_credentials(&self) -> Option<SpotifyCredentials> {
        Some(SpotifyCredentials {
            client_id: self.spotify_client_id.clone()?,
            client_secret: self.spotify_client_secret.clone()?,
            refresh_token: self.spotify_refresh_token.clone()?,
        })
    }

    pub fn get_missing_config(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.spotify_client_id.is_none() {
            missing.push("SPOTIFY_CLIENT_ID".to_string());
        }
        if self.spotify_client_secret.is_none() {
            missing.push("SPOTIFY_CLIENT_SECRET".to_string());
        }
        if self.spotify_refresh_token.is_none() {
            missing.push("SPOTIFY_REFRESH_TOKEN".to_string());
        }
        if self.redis_url.is_none() {
            missing.push("REDIS_URL".to_string());
        }

        missing
    }
}
