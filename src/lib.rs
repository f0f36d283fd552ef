//! Foosball Ladder - ratings and statistics for a small foosball group
//!
//! This crate rates 1v1 and 2v2 matches with an Elo engine and aggregates
//! per-player statistics (win rates, per-side records, rating history) from
//! the match log. Persistence is left to a `LadderStorage` implementation.

pub mod config;
pub mod error;
pub mod logging;
pub mod rating;
pub mod service;
pub mod stats;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use rating::{compute_updated_rating, EloRatingEngine, RatingCalculator};
pub use service::{Ladder, PlayerProfile};
pub use stats::{compute_player_stats, PlayerStats};
pub use storage::{InMemoryLadderStorage, LadderStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
