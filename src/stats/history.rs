//! Rating history reconstruction for matches recorded without snapshots
//!
//! Replays the rating engine over the whole log from the initial rating. Only
//! meant for legacy data: a recorded snapshot always wins over a replayed
//! value, and replayed ratings are re-anchored on every snapshot they meet.

use crate::rating::RatingCalculator;
use crate::types::{Match, MatchId, PlayerId};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Post-match ratings for every participant of every ratable match
pub type ReplayedSnapshots = HashMap<MatchId, BTreeMap<PlayerId, i32>>;

/// Replay the match log in chronological order.
///
/// Matches with an empty side cannot be rated and are skipped. Legacy ties are
/// rated as draws.
pub fn replay_rating_snapshots(
    matches: &[Match],
    calculator: &dyn RatingCalculator,
) -> crate::error::Result<ReplayedSnapshots> {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by_key(|game| game.timestamp);

    let initial = calculator.initial_rating();
    let mut ratings: HashMap<PlayerId, i32> = HashMap::new();
    let mut replayed = ReplayedSnapshots::new();

    for game in ordered {
        if game.side_a.is_empty() || game.side_b.is_empty() {
            warn!("Skipping match {} with an empty side during replay", game.id);
            continue;
        }

        let snapshot = match &game.rating_snapshots {
            Some(recorded) => recorded.clone(),
            None => {
                let current = |ids: &[PlayerId]| -> Vec<(PlayerId, i32)> {
                    ids.iter()
                        .map(|id| (id.clone(), *ratings.get(id).unwrap_or(&initial)))
                        .collect()
                };
                let result = calculator.rate_match(
                    &current(game.side_a.as_slice()),
                    &current(game.side_b.as_slice()),
                    game.score_a,
                    game.score_b,
                )?;
                result
                    .rating_changes
                    .into_iter()
                    .map(|change| (change.player_id, change.new_rating))
                    .collect()
            }
        };

        for (player_id, rating) in &snapshot {
            ratings.insert(player_id.clone(), *rating);
        }
        replayed.insert(game.id, snapshot);
    }

    debug!(
        "Replayed {} matches covering {} players",
        replayed.len(),
        ratings.len()
    );

    Ok(replayed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::EloRatingEngine;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn game(minutes: i64, side_a: &[&str], side_b: &[&str], score_a: u32, score_b: u32) -> Match {
        Match {
            id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap()
                + Duration::minutes(minutes),
            side_a: side_a.iter().map(|s| s.to_string()).collect(),
            side_b: side_b.iter().map(|s| s.to_string()).collect(),
            score_a,
            score_b,
            rating_snapshots: None,
        }
    }

    #[test]
    fn test_replay_from_initial_rating() {
        let first = game(0, &["alice"], &["bob"], 10, 5);
        let second = game(10, &["alice"], &["bob"], 10, 5);
        let engine = EloRatingEngine::default();

        // Out of order on purpose
        let replayed =
            replay_rating_snapshots(&[second.clone(), first.clone()], &engine).unwrap();

        assert_eq!(replayed[&first.id]["alice"], 1016);
        assert_eq!(replayed[&first.id]["bob"], 984);
        // Second game starts from 1016 vs 984
        let expected = crate::rating::compute_updated_rating(
            1016,
            984,
            crate::types::Outcome::Win,
        )
        .unwrap();
        assert_eq!(replayed[&second.id]["alice"], expected);
    }

    #[test]
    fn test_recorded_snapshots_reanchor_replay() {
        let mut anchored = game(0, &["alice"], &["bob"], 10, 5);
        anchored.rating_snapshots = Some(BTreeMap::from([
            ("alice".to_string(), 1200),
            ("bob".to_string(), 1200),
        ]));
        let legacy = game(10, &["alice"], &["bob"], 10, 5);

        let engine = EloRatingEngine::default();
        let replayed = replay_rating_snapshots(&[anchored.clone(), legacy.clone()], &engine).unwrap();

        assert_eq!(replayed[&anchored.id]["alice"], 1200);
        assert_eq!(replayed[&legacy.id]["alice"], 1216);
        assert_eq!(replayed[&legacy.id]["bob"], 1184);
    }

    #[test]
    fn test_empty_sides_skipped() {
        let broken = game(0, &["alice"], &[], 10, 0);
        let engine = EloRatingEngine::default();
        let replayed = replay_rating_snapshots(&[broken.clone()], &engine).unwrap();
        assert!(!replayed.contains_key(&broken.id));
    }
}
