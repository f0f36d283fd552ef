//! Rating engine
//!
//! This module provides the Elo rating update used after every match and the
//! calculator interface the ladder service rates matches through.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::{RatingCalculationResult, RatingCalculator};
pub use elo::{compute_updated_rating, EloRatingEngine};
