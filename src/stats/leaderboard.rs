//! Leaderboard and recent match listings

use crate::types::{Match, Player};
use serde::{Deserialize, Serialize};

/// A player's position on the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based; players with equal ratings share a rank
    pub rank: usize,
    pub player: Player,
}

/// Rank players by rating, highest first. Ties share a rank and are listed by name.
pub fn leaderboard(players: &[Player]) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| {
        b.rating
            .cmp(&a.rating)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(sorted.len());
    for (index, player) in sorted.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(previous) if previous.player.rating == player.rating => previous.rank,
            _ => index + 1,
        };
        entries.push(LeaderboardEntry {
            rank,
            player: player.clone(),
        });
    }

    entries
}

/// The most recent matches, newest first. Matches sharing a timestamp are
/// listed in reverse storage order.
pub fn recent_matches(matches: &[Match], limit: usize) -> Vec<Match> {
    let mut sorted: Vec<&Match> = matches.iter().rev().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.into_iter().take(limit).cloned().collect()
}
