//! Per-player career statistics
//!
//! Everything here is recomputed from the match log on each call; nothing is
//! cached, so the result is only as fresh as the matches passed in.

use crate::types::{Match, MatchId, Outcome, Side};
use crate::utils::ratio;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player's rating immediately after one of their matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingPoint {
    pub match_id: MatchId,
    pub timestamp: DateTime<Utc>,
    /// `None` when the match predates rating snapshots
    pub rating: Option<i32>,
}

/// Derived statistics for one player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Tied matches. These are also counted in `losses`.
    pub draws: u32,
    pub win_rate: f64,
    pub rating_history: Vec<RatingPoint>,
    pub side_a_games: u32,
    pub side_b_games: u32,
    pub side_a_wins: u32,
    pub side_b_wins: u32,
    pub side_a_win_rate: f64,
    pub side_b_win_rate: f64,
}

impl PlayerStats {
    fn record(&mut self, side: Side, outcome: Outcome) {
        self.games_played += 1;
        match side {
            Side::A => self.side_a_games += 1,
            Side::B => self.side_b_games += 1,
        }

        match outcome {
            Outcome::Win => {
                self.wins += 1;
                match side {
                    Side::A => self.side_a_wins += 1,
                    Side::B => self.side_b_wins += 1,
                }
            }
            Outcome::Draw => {
                self.draws += 1;
                self.losses += 1;
            }
            Outcome::Loss => self.losses += 1,
        }
    }

    fn update_rates(&mut self) {
        self.win_rate = ratio(self.wins, self.games_played);
        self.side_a_win_rate = ratio(self.side_a_wins, self.side_a_games);
        self.side_b_win_rate = ratio(self.side_b_wins, self.side_b_games);
    }

    /// Number of history points with no recorded rating
    pub fn missing_ratings(&self) -> usize {
        self.rating_history
            .iter()
            .filter(|point| point.rating.is_none())
            .count()
    }

    /// Fill in history points that have no recorded rating
    pub fn fill_missing_ratings<F>(&mut self, mut lookup: F)
    where
        F: FnMut(&RatingPoint) -> Option<i32>,
    {
        for point in self.rating_history.iter_mut() {
            if point.rating.is_none() {
                point.rating = lookup(point);
            }
        }
    }
}

/// Recompute a player's statistics from the match history.
///
/// Matches are processed in ascending timestamp order whatever order they are
/// given in. Matches the player is not part of, including ones with missing
/// side data, are ignored.
pub fn compute_player_stats(player_id: &str, matches: &[Match]) -> PlayerStats {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by_key(|game| game.timestamp);

    let mut stats = PlayerStats::default();
    for game in ordered {
        let Some(side) = game.side_of(player_id) else {
            continue;
        };

        stats.record(side, game.outcome_for(side));
        stats.rating_history.push(RatingPoint {
            match_id: game.id,
            timestamp: game.timestamp,
            rating: game.rating_after(player_id),
        });
    }

    stats.update_rates();
    stats
}
