//! Elo rating engine
//!
//! Paired-comparison update on top of `skillratings::elo`. Team matches are
//! rated player by player against the mean pre-match rating of the opposing
//! side, so teammates with different ratings move by different amounts.

use crate::config::RatingConfig;
use crate::error::LadderError;
use crate::rating::calculator::{RatingCalculationResult, RatingCalculator};
use crate::types::{Outcome, PlayerId, RatingChange, Side};
use crate::utils::{mean, round_half_up};
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use tracing::debug;

/// Compute a player's new rating with the default K-factor of 32
///
/// `new = round(player + 32 * (outcome - expected))`, rounding halves up.
pub fn compute_updated_rating(
    player_rating: i32,
    opponent_rating: i32,
    outcome: Outcome,
) -> crate::error::Result<i32> {
    EloRatingEngine::default().updated_rating(player_rating, f64::from(opponent_rating), outcome)
}

/// Elo rating engine
#[derive(Debug, Clone, Default)]
pub struct EloRatingEngine {
    config: RatingConfig,
}

impl EloRatingEngine {
    /// Create a new engine from a validated configuration
    pub fn new(config: RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Probability that a player rated `player_rating` beats `opponent_rating`
    pub fn expected_score(&self, player_rating: f64, opponent_rating: f64) -> f64 {
        let (expected, _) = expected_score(
            &EloRating {
                rating: player_rating,
            },
            &EloRating {
                rating: opponent_rating,
            },
        );
        expected
    }

    /// New rating for one player. The opponent rating may be a team average,
    /// hence fractional.
    pub fn updated_rating(
        &self,
        player_rating: i32,
        opponent_rating: f64,
        outcome: Outcome,
    ) -> crate::error::Result<i32> {
        if !opponent_rating.is_finite() {
            return Err(LadderError::InvalidRating {
                reason: format!("opponent rating must be finite, got {}", opponent_rating),
            }
            .into());
        }

        let (updated, _) = elo(
            &EloRating {
                rating: f64::from(player_rating),
            },
            &EloRating {
                rating: opponent_rating,
            },
            &outcome.into(),
            &EloConfig {
                k: self.config.k_factor,
            },
        );

        let rounded = round_half_up(updated.rating);
        if !rounded.is_finite() || rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX)
        {
            return Err(LadderError::InvalidRating {
                reason: format!("updated rating {} is out of range", updated.rating),
            }
            .into());
        }

        Ok(rounded as i32)
    }

    /// Mean pre-match rating of a side
    pub fn team_average(ratings: &[i32]) -> Option<f64> {
        mean(ratings)
    }

    fn rate_side(
        &self,
        side: Side,
        players: &[(PlayerId, i32)],
        opponent_average: f64,
        outcome: Outcome,
    ) -> crate::error::Result<Vec<RatingChange>> {
        players
            .iter()
            .map(|(player_id, rating)| {
                let new_rating = self.updated_rating(*rating, opponent_average, outcome)?;
                Ok(RatingChange {
                    player_id: player_id.clone(),
                    side,
                    old_rating: *rating,
                    new_rating,
                })
            })
            .collect()
    }
}

impl RatingCalculator for EloRatingEngine {
    fn rate_match(
        &self,
        side_a: &[(PlayerId, i32)],
        side_b: &[(PlayerId, i32)],
        score_a: u32,
        score_b: u32,
    ) -> crate::error::Result<RatingCalculationResult> {
        let ratings_a: Vec<i32> = side_a.iter().map(|(_, rating)| *rating).collect();
        let ratings_b: Vec<i32> = side_b.iter().map(|(_, rating)| *rating).collect();

        let (average_a, average_b) =
            match (Self::team_average(&ratings_a), Self::team_average(&ratings_b)) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    return Err(LadderError::invalid_match(
                        "each side needs at least one player to be rated",
                    )
                    .into())
                }
            };

        let outcome_a = Outcome::from_scores(score_a, score_b);
        let outcome_b = Outcome::from_scores(score_b, score_a);

        let mut rating_changes = self.rate_side(Side::A, side_a, average_b, outcome_a)?;
        rating_changes.extend(self.rate_side(Side::B, side_b, average_a, outcome_b)?);

        let expected_score_a = self.expected_score(average_a, average_b);

        debug!(
            "Rated match {}-{}: side A avg {:.1}, side B avg {:.1}, expected A {:.3}",
            score_a, score_b, average_a, average_b, expected_score_a
        );

        Ok(RatingCalculationResult {
            rating_changes,
            expected_score_a,
        })
    }

    fn initial_rating(&self) -> i32 {
        self.config.initial_rating
    }
}
