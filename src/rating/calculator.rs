//! Rating calculator trait
//!
//! The service rates matches through this interface so the rating system can
//! be swapped without touching match recording.

use crate::types::{PlayerId, RatingChange};
use serde::{Deserialize, Serialize};

/// Result of rating a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCalculationResult {
    /// Rating changes for every participant, side A players first
    pub rating_changes: Vec<RatingChange>,
    /// Probability side A was expected to win (0.0 to 1.0)
    pub expected_score_a: f64,
}

impl RatingCalculationResult {
    /// Find the change for a specific player
    pub fn change_for(&self, player_id: &str) -> Option<&RatingChange> {
        self.rating_changes
            .iter()
            .find(|change| change.player_id == player_id)
    }
}

/// Trait for calculating rating changes after matches
pub trait RatingCalculator: Send + Sync {
    /// Calculate rating changes for both sides of a match
    ///
    /// # Arguments
    /// * `side_a` - (player_id, pre-match rating) pairs for side A
    /// * `side_b` - (player_id, pre-match rating) pairs for side B
    /// * `score_a`, `score_b` - final scores
    fn rate_match(
        &self,
        side_a: &[(PlayerId, i32)],
        side_b: &[(PlayerId, i32)],
        score_a: u32,
        score_b: u32,
    ) -> crate::error::Result<RatingCalculationResult>;

    /// Get the initial rating for new players
    fn initial_rating(&self) -> i32;
}
