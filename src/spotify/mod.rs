pub mod auth;
pub mod client;
pub mod models;

pub use auth::SpotifyAuth;
pub use client::SpotifyClient;
pub use models::{PlaybackSource, SpotifyTrack};
