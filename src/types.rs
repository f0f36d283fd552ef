//! Common types used throughout the ladder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for matches
pub type MatchId = Uuid;

/// A registered player and their current rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: i32,
}

impl Player {
    /// Create a player with a freshly generated id
    pub fn new(name: impl Into<String>, initial_rating: i32) -> Self {
        Self {
            id: crate::utils::generate_player_id(),
            name: name.into(),
            rating: initial_rating,
        }
    }
}

/// One of the two competing groups in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Result of a match from one side's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Compare a side's score against the other side's
    pub fn from_scores(own: u32, other: u32) -> Self {
        match own.cmp(&other) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Score value used by the rating formula
    pub fn value(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
            Outcome::Draw => 0.5,
        }
    }
}

impl From<Outcome> for skillratings::Outcomes {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => skillratings::Outcomes::WIN,
            Outcome::Loss => skillratings::Outcomes::LOSS,
            Outcome::Draw => skillratings::Outcomes::DRAW,
        }
    }
}

/// A recorded match. Matches are append-only and never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub side_a: Vec<PlayerId>,
    #[serde(default)]
    pub side_b: Vec<PlayerId>,
    pub score_a: u32,
    pub score_b: u32,
    /// Post-match rating of every participant, captured when the match was recorded.
    /// Absent on matches recorded before snapshots existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_snapshots: Option<BTreeMap<PlayerId, i32>>,
}

impl Match {
    /// Which side the player was on, if any
    pub fn side_of(&self, player_id: &str) -> Option<Side> {
        if self.side_a.iter().any(|id| id == player_id) {
            Some(Side::A)
        } else if self.side_b.iter().any(|id| id == player_id) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn players(&self, side: Side) -> &[PlayerId] {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    pub fn outcome_for(&self, side: Side) -> Outcome {
        Outcome::from_scores(self.score(side), self.score(side.opponent()))
    }

    /// Post-match rating snapshot for a participant
    pub fn rating_after(&self, player_id: &str) -> Option<i32> {
        self.rating_snapshots
            .as_ref()
            .and_then(|snapshots| snapshots.get(player_id).copied())
    }
}

/// Rating change for one participant of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub side: Side,
    pub old_rating: i32,
    pub new_rating: i32,
}

impl RatingChange {
    pub fn delta(&self) -> i32 {
        self.new_rating - self.old_rating
    }
}

/// Request to record a new match, before validation and rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatch {
    pub side_a: Vec<PlayerId>,
    pub side_b: Vec<PlayerId>,
    pub score_a: u32,
    pub score_b: u32,
}
