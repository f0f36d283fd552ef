//! Player statistics
//!
//! Aggregates career totals, win rates and rating trajectories from the match
//! log, plus the leaderboard and recent match views built on the same data.

pub mod history;
pub mod leaderboard;
pub mod player;

// Re-export commonly used types
pub use history::{replay_rating_snapshots, ReplayedSnapshots};
pub use leaderboard::{leaderboard, recent_matches, LeaderboardEntry};
pub use player::{compute_player_stats, PlayerStats, RatingPoint};
