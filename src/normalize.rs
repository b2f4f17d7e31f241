use crate::aggregator::report::{PlaybackState, RatingSnapshot};
use crate::chess::PlayerStats;
use crate::spotify::models::{PlaybackSource, SpotifyArtist, SpotifyImage, SpotifyTrack};

const ARTIST_SEPARATOR: &str = ", ";

/// Join artist names in upstream order. An empty list has no display string.
pub fn join_artists(artists: &[SpotifyArtist]) -> Option<String> {
    if artists.is_empty() {
        return None;
    }
    Some(
        artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(ARTIST_SEPARATOR),
    )
}

/// Pick the artwork URL: second image if there is one, else the first.
pub fn select_artwork(images: &[SpotifyImage]) -> Option<String> {
    images
        .get(1)
        .or_else(|| images.first())
        .map(|image| image.url.clone())
}

fn track_state(
    track: SpotifyTrack,
    playing: bool,
    progress_ms: Option<u64>,
    server_time_ms: i64,
) -> PlaybackState {
    let artwork_url = track
        .album
        .as_ref()
        .and_then(|album| select_artwork(&album.images));

    PlaybackState {
        playing,
        artist: join_artists(&track.artists),
        url: track.external_urls.and_then(|urls| urls.spotify),
        artwork_url,
        progress_ms,
        duration_ms: track.duration_ms,
        server_time_ms,
        title: track.name,
    }
}

/// Map what the playback fetcher found into the front-end record.
pub fn playback_state(source: PlaybackSource, server_time_ms: i64) -> Option<PlaybackState> {
    match source {
        PlaybackSource::Current {
            is_playing,
            progress_ms,
            track,
        } => Some(track_state(track, is_playing, progress_ms, server_time_ms)),
        PlaybackSource::Recent(track) => Some(track_state(track, false, None, server_time_ms)),
        PlaybackSource::Nothing => None,
    }
}

/// A rating of zero means the profile has no rapid games.
pub fn rating_snapshot(stats: &PlayerStats) -> RatingSnapshot {
    let rapid = stats
        .chess_rapid
        .as_ref()
        .and_then(|category| category.last.as_ref())
        .and_then(|last| last.rating)
        .filter(|rating| *rating > 0);

    RatingSnapshot { rapid }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::models::SpotifyAlbum;

    fn image(url: &str) -> SpotifyImage {
        SpotifyImage {
            url: url.to_string(),
        }
    }

    #[test]
    fn test_join_artists_preserves_order() {
        let artists = vec![
            SpotifyArtist { name: "A".to_string() },
            SpotifyArtist { name: "B".to_string() },
        ];
        assert_eq!(join_artists(&artists).as_deref(), Some("A, B"));
        assert_eq!(join_artists(&[]), None);
    }

    #[test]
    fn test_artwork_prefers_second_image() {
        assert_eq!(
            select_artwork(&[image("img0"), image("img1")]).as_deref(),
            Some("img1")
        );
        assert_eq!(
            select_artwork(&[image("img0"), image("img1"), image("img2")]).as_deref(),
            Some("img1")
        );
        assert_eq!(select_artwork(&[image("img0")]).as_deref(), Some("img0"));
        assert_eq!(select_artwork(&[]), None);
    }

    #[test]
    fn test_current_track_mapping() {
        let mut track = SpotifyTrack::mock("Song", &["A", "B"]);
        track.album = Some(SpotifyAlbum {
            images: vec![image("large"), image("medium"), image("small")],
        });

        let state = playback_state(
            PlaybackSource::Current {
                is_playing: true,
                progress_ms: Some(42_000),
                track,
            },
            1_700_000_000_000,
        )
        .unwrap();

        assert!(state.playing);
        assert_eq!(state.title, "Song");
        assert_eq!(state.artist.as_deref(), Some("A, B"));
        assert_eq!(state.url.as_deref(), Some("https://open.spotify.com/track/mock"));
        assert_eq!(state.artwork_url.as_deref(), Some("medium"));
        assert_eq!(state.progress_ms, Some(42_000));
        assert_eq!(state.duration_ms, Some(180_000));
        assert_eq!(state.server_time_ms, 1_700_000_000_000);
    }

    #[test]
    fn test_recent_track_is_not_playing_and_has_no_progress() {
        let state = playback_state(
            PlaybackSource::Recent(SpotifyTrack::mock("Old Song", &["C"])),
            7,
        )
        .unwrap();

        assert!(!state.playing);
        assert_eq!(state.title, "Old Song");
        assert_eq!(state.artist.as_deref(), Some("C"));
        assert_eq!(state.progress_ms, None);
        assert_eq!(state.duration_ms, Some(180_000));
    }

    #[test]
    fn test_missing_optional_fields_become_null() {
        let track = SpotifyTrack {
            name: "Episode".to_string(),
            artists: Vec::new(),
            external_urls: None,
            album: None,
            duration_ms: None,
        };

        let state = playback_state(
            PlaybackSource::Current {
                is_playing: false,
                progress_ms: None,
                track,
            },
            0,
        )
        .unwrap();

        assert_eq!(state.title, "Episode");
        assert_eq!(state.artist, None);
        assert_eq!(state.url, None);
        assert_eq!(state.artwork_url, None);
        assert_eq!(state.duration_ms, None);
    }

    #[test]
    fn test_nothing_maps_to_none() {
        assert!(playback_state(PlaybackSource::Nothing, 0).is_none());
    }

    #[test]
    fn test_rating_snapshot() {
        assert_eq!(rating_snapshot(&PlayerStats::mock(Some(1432))).rapid, Some(1432));
        assert_eq!(rating_snapshot(&PlayerStats::mock(Some(0))).rapid, None);
        assert_eq!(rating_snapshot(&PlayerStats::mock(None)).rapid, None);
        assert_eq!(rating_snapshot(&PlayerStats::default()).rapid, None);
    }
}
