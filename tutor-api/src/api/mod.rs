//! HTTP API handlers for tutor-api

pub mod health;
pub mod songs;
pub mod upload;

pub use health::{health_routes, liveness};
pub use songs::{get_song_or_diagram, search_song};
pub use upload::receive_audio;
