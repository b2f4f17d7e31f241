pub mod aggregator;
pub mod api;
pub mod cache;
pub mod chess;
pub mod config;
pub mod counter;
pub mod error;
pub mod fallback;
pub mod normalize;
pub mod spotify;

pub use aggregator::{Aggregator, NowPlaying, PlaybackState, RatingSnapshot, ViewCount};
pub use config::Config;
pub use error::{AppError, Result};
