//! Rating system configuration

use serde::{Deserialize, Serialize};

/// Default K-factor: the most a single match can move a rating by
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Rating assigned to newly registered players
pub const DEFAULT_INITIAL_RATING: i32 = 1000;

/// Elo rating configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub k_factor: f64,
    pub initial_rating: i32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            initial_rating: DEFAULT_INITIAL_RATING,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(crate::error::LadderError::ConfigurationError {
                message: format!("K-factor must be positive, got {}", self.k_factor),
            }
            .into());
        }

        Ok(())
    }
}
