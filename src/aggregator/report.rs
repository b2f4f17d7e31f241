use serde::{Deserialize, Serialize};

/// Normalized "now playing" record. Field names follow the front-end contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    pub playing: bool,
    pub title: String,
    pub artist: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "artwork")]
    pub artwork_url: Option<String>,
    pub progress_ms: Option<u64>,
    pub duration_ms: Option<u64>,
    #[serde(rename = "serverTime")]
    pub server_time_ms: i64,
}

/// Body of the now-playing endpoint: a full record or `{"playing": false}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NowPlaying {
    Track(PlaybackState),
    Idle { playing: bool },
}

impl NowPlaying {
    pub fn idle() -> Self {
        NowPlaying::Idle { playing: false }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, NowPlaying::Idle { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    pub rapid: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewCount {
    pub views: Option<i64>,
}

impl ViewCount {
    pub fn unknown() -> Self {
        Self { views: None }
    }
}
