use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
}

/// Body of `GET /me/player/currently-playing`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlaying {
    pub is_playing: Option<bool>,
    pub progress_ms: Option<u64>,
    pub item: Option<SpotifyTrack>,
}

/// Body of `GET /me/player/recently-played`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentlyPlayed {
    #[serde(default)]
    pub items: Vec<PlayHistory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayHistory {
    pub track: Option<SpotifyTrack>,
}

/// A track (or episode) as returned by both player endpoints. Episodes carry
/// no artists or album, hence the defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub external_urls: Option<ExternalUrls>,
    pub album: Option<SpotifyAlbum>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

/// What the playback fetcher found, in the order it looked.
#[derive(Debug, Clone)]
pub enum PlaybackSource {
    Current {
        is_playing: bool,
        progress_ms: Option<u64>,
        track: SpotifyTrack,
    },
    Recent(SpotifyTrack),
    Nothing,
}

#[cfg(test)]
impl SpotifyTrack {
    pub fn mock(name: &str, artists: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| SpotifyArtist { name: a.to_string() })
                .collect(),
            external_urls: Some(ExternalUrls {
                spotify: Some("https://open.spotify.com/track/mock".to_string()),
            }),
            album: Some(SpotifyAlbum { images: Vec::new() }),
            duration_ms: Some(180000),
        }
    }
}
