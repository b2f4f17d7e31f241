pub mod orchestrator;
pub mod report;

pub use orchestrator::{Aggregator, RATING_TTL_SECS, RatingOutcome};
pub use report::{NowPlaying, PlaybackState, RatingSnapshot, ViewCount};
