use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::aggregator::report::{NowPlaying, RatingSnapshot, ViewCount};
use crate::cache::TtlCache;
use crate::chess::ChessClient;
use crate::config::Config;
use crate::counter::{CounterStore, RedisCounter, VIEW_COUNT_KEY};
use crate::error::{AppError, Result};
use crate::fallback::Resolved;
use crate::normalize;
use crate::spotify::{SpotifyAuth, SpotifyClient};

/// Freshness window for the chess rating.
pub const RATING_TTL_SECS: i64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CacheKey {
    ChessStats,
}

/// A rating plus how long clients may cache it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingOutcome {
    pub snapshot: RatingSnapshot,
    pub max_age_secs: i64,
}

/// Owns every upstream client and the rating cache. Built once at startup
/// and shared by all request handlers.
pub struct Aggregator {
    spotify: Option<SpotifyClient>,
    chess: ChessClient,
    counter: Option<Arc<dyn CounterStore>>,
    rating_cache: TtlCache<CacheKey, RatingSnapshot>,
}

impl Aggregator {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        let spotify = match config.spotify_credentials() {
            Some(credentials) => {
                let auth =
                    SpotifyAuth::new(http_client.clone(), credentials, &config.spotify_accounts_url);
                Some(SpotifyClient::new(
                    http_client.clone(),
                    auth,
                    &config.spotify_api_url,
                ))
            }
            None => {
                info!("Spotify credentials not configured, now-playing will report idle");
                None
            }
        };

        let chess = ChessClient::new(
            http_client,
            &config.chess_api_url,
            &config.chess_username,
            &config.chess_user_agent,
        );

        let counter: Option<Arc<dyn CounterStore>> = match &config.redis_url {
            Some(url) => {
                let store = RedisCounter::new(url, config.upstream_timeout)?;
                Some(Arc::new(store) as Arc<dyn CounterStore>)
            }
            None => {
                info!("REDIS_URL not configured, view counts will be null");
                None
            }
        };

        Ok(Self {
            spotify,
            chess,
            counter,
            rating_cache: TtlCache::new(),
        })
    }

    /// Swap in a different counter store.
    pub fn with_counter_store(mut self, store: Arc<dyn CounterStore>) -> Self {
        self.counter = Some(store);
        self
    }

    pub async fn now_playing(&self) -> NowPlaying {
        self.now_playing_at(Utc::now().timestamp_millis()).await
    }

    pub async fn now_playing_at(&self, server_time_ms: i64) -> NowPlaying {
        let Some(spotify) = &self.spotify else {
            let absent = AppError::ConfigurationAbsent("Spotify credentials".into());
            return Resolved::Failed(absent).unwrap_or_fallback("spotify", NowPlaying::idle);
        };

        let result = spotify
            .playback()
            .await
            .map(|source| normalize::playback_state(source, server_time_ms).map(NowPlaying::Track));

        Resolved::from_option(result, NowPlaying::idle).unwrap_or_fallback("spotify", NowPlaying::idle)
    }

    pub async fn rating(&self) -> Result<RatingOutcome> {
        self.rating_at(Utc::now().timestamp()).await
    }

    /// Cached rating if fresh, else a new fetch. A failed fetch falls back to
    /// the last good rating; with nothing cached the error is returned.
    pub async fn rating_at(&self, now: i64) -> Result<RatingOutcome> {
        let key = CacheKey::ChessStats;

        if let Some(entry) = self.rating_cache.get_fresh(&key, now, RATING_TTL_SECS) {
            debug!("Serving cached chess rating");
            return Ok(RatingOutcome {
                snapshot: entry.value,
                max_age_secs: entry.remaining(now, RATING_TTL_SECS),
            });
        }

        let fetched = Resolved::from_result(self.chess.player_stats().await)
            .map(|stats| normalize::rating_snapshot(&stats));

        if let Resolved::Value(snapshot) = &fetched {
            self.rating_cache.set(key, *snapshot, now);
        }

        let stale = self.rating_cache.get(&key).map(|entry| entry.value);

        let resolved = fetched.or_stale(stale);
        // Stale data must not be cached downstream.
        let max_age_secs = if resolved.is_fallback() { 0 } else { RATING_TTL_SECS };

        resolved
            .into_result()
            .map(|snapshot| RatingOutcome {
                snapshot,
                max_age_secs,
            })
            .map_err(|err| {
                warn!(integration = "chess", error = %err, "Failed to fetch chess.com stats");
                err
            })
    }

    pub async fn views(&self) -> ViewCount {
        let Some(counter) = &self.counter else {
            let absent = AppError::ConfigurationAbsent("REDIS_URL".into());
            return Resolved::Failed(absent).unwrap_or_fallback("analytics", ViewCount::unknown);
        };

        Resolved::from_result(counter.increment(VIEW_COUNT_KEY).await)
            .map(|count| ViewCount { views: Some(count) })
            .unwrap_or_fallback("analytics", ViewCount::unknown)
    }
}
