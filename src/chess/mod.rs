pub mod client;
pub mod models;

pub use client::ChessClient;
pub use models::PlayerStats;
