//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use foosball_ladder::config::{MatchSettings, StatsSettings};
use foosball_ladder::storage::{InMemoryLadderStorage, LadderSnapshot};
use foosball_ladder::types::{Match, NewMatch, Player};
use foosball_ladder::{EloRatingEngine, Ladder};
use std::sync::Arc;
use uuid::Uuid;

/// Fixed reference time so ordering assertions are deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 17, 30, 0).unwrap()
}

pub fn player(id: &str, rating: i32) -> Player {
    Player {
        id: id.to_string(),
        name: id.to_string(),
        rating,
    }
}

fn ids(players: &[&str]) -> Vec<String> {
    players.iter().map(|p| p.to_string()).collect()
}

/// A legacy match with no rating snapshots, `minutes` after the base time
pub fn legacy_match(
    minutes: i64,
    side_a: &[&str],
    side_b: &[&str],
    score_a: u32,
    score_b: u32,
) -> Match {
    Match {
        id: Uuid::new_v4(),
        timestamp: base_time() + Duration::minutes(minutes),
        side_a: ids(side_a),
        side_b: ids(side_b),
        score_a,
        score_b,
        rating_snapshots: None,
    }
}

pub fn new_match(side_a: &[&str], side_b: &[&str], score_a: u32, score_b: u32) -> NewMatch {
    NewMatch {
        side_a: ids(side_a),
        side_b: ids(side_b),
        score_a,
        score_b,
    }
}

/// A ladder over in-memory storage seeded with the given data
pub fn ladder_with(
    snapshot: LadderSnapshot,
    match_settings: MatchSettings,
    stats_settings: StatsSettings,
) -> (Ladder, Arc<InMemoryLadderStorage>) {
    let storage = Arc::new(InMemoryLadderStorage::from_snapshot(snapshot));
    let ladder = Ladder::new(
        storage.clone(),
        Arc::new(EloRatingEngine::default()),
        match_settings,
        stats_settings,
    );
    (ladder, storage)
}

/// A ladder with four players at the given ratings and no matches
pub fn four_player_ladder(ratings: [i32; 4]) -> (Ladder, Arc<InMemoryLadderStorage>) {
    let players = ["alice", "bob", "carol", "dave"]
        .iter()
        .zip(ratings)
        .map(|(id, rating)| player(id, rating))
        .collect();

    ladder_with(
        LadderSnapshot {
            players,
            matches: vec![],
        },
        MatchSettings::default(),
        StatsSettings::default(),
    )
}
