//! Ladder service
//!
//! Coordinates storage, the rating engine and the stats aggregator. Storage
//! and calculator are passed in explicitly; there is no ambient state.

use crate::config::{AppConfig, HistoryFallback, MatchSettings, StatsSettings};
use crate::error::{LadderError, Result};
use crate::rating::{EloRatingEngine, RatingCalculator};
use crate::service::validation::validate_new_match;
use crate::stats::{
    compute_player_stats, leaderboard, recent_matches, replay_rating_snapshots, LeaderboardEntry,
    PlayerStats,
};
use crate::storage::LadderStorage;
use crate::types::{Match, NewMatch, Player, PlayerId};
use crate::utils::{current_timestamp, generate_match_id};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// A player together with their derived statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player: Player,
    pub stats: PlayerStats,
}

/// The ladder service
pub struct Ladder {
    storage: Arc<dyn LadderStorage>,
    calculator: Arc<dyn RatingCalculator>,
    match_settings: MatchSettings,
    stats_settings: StatsSettings,
    /// Serializes read-rate-commit sequences so concurrent writers cannot
    /// compute against stale ratings
    writer: Mutex<()>,
}

impl Ladder {
    pub fn new(
        storage: Arc<dyn LadderStorage>,
        calculator: Arc<dyn RatingCalculator>,
        match_settings: MatchSettings,
        stats_settings: StatsSettings,
    ) -> Self {
        Self {
            storage,
            calculator,
            match_settings,
            stats_settings,
            writer: Mutex::new(()),
        }
    }

    /// Build a ladder using the Elo engine configured in `config`
    pub fn from_config(config: &AppConfig, storage: Arc<dyn LadderStorage>) -> Result<Self> {
        let engine = EloRatingEngine::new(config.rating.clone())?;

        info!(
            "Ladder '{}' ready - K-factor: {}, initial rating: {}, draws allowed: {}",
            config.service.name,
            engine.config().k_factor,
            engine.config().initial_rating,
            config.matches.allow_draws
        );

        Ok(Self::new(
            storage,
            Arc::new(engine),
            config.matches.clone(),
            config.stats.clone(),
        ))
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, ()>> {
        self.writer.lock().map_err(|_| {
            anyhow::Error::from(LadderError::StorageError {
                message: "Ladder writer lock poisoned".to_string(),
            })
        })
    }

    fn require_player(&self, player_id: &str) -> Result<Player> {
        self.storage
            .get_player(player_id)?
            .ok_or_else(|| {
                anyhow::Error::from(LadderError::PlayerNotFound {
                    player_id: player_id.to_string(),
                })
            })
    }

    /// Register a new player at the initial rating
    pub fn register_player(&self, name: &str) -> Result<Player> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LadderError::InvalidPlayer {
                reason: "player name required".to_string(),
            }
            .into());
        }

        let _guard = self.lock_writer()?;

        let existing = self.storage.list_players()?;
        if existing
            .iter()
            .any(|p| p.name.to_lowercase() == name.to_lowercase())
        {
            return Err(LadderError::DuplicatePlayer {
                name: name.to_string(),
            }
            .into());
        }

        let player = Player::new(name, self.calculator.initial_rating());
        self.storage.add_player(player.clone())?;

        info!(
            "Registered player '{}' ({}) at rating {}",
            player.name, player.id, player.rating
        );
        Ok(player)
    }

    /// Validate, rate and store a new match.
    ///
    /// Every participant's post-match rating is stored on the match itself so
    /// the rating history can be rebuilt without replaying the log.
    pub fn record_match(&self, request: NewMatch) -> Result<Match> {
        validate_new_match(&request, &self.match_settings)?;

        let _guard = self.lock_writer()?;

        let load_side = |ids: &[PlayerId]| -> Result<Vec<(PlayerId, i32)>> {
            ids.iter()
                .map(|id| {
                    let player = self.require_player(id)?;
                    Ok((player.id, player.rating))
                })
                .collect()
        };
        let side_a = load_side(request.side_a.as_slice())?;
        let side_b = load_side(request.side_b.as_slice())?;

        let result =
            self.calculator
                .rate_match(&side_a, &side_b, request.score_a, request.score_b)?;

        let snapshots: BTreeMap<PlayerId, i32> = result
            .rating_changes
            .iter()
            .map(|change| (change.player_id.clone(), change.new_rating))
            .collect();

        let record = Match {
            id: generate_match_id(),
            timestamp: current_timestamp(),
            side_a: request.side_a,
            side_b: request.side_b,
            score_a: request.score_a,
            score_b: request.score_b,
            rating_snapshots: Some(snapshots),
        };

        self.storage
            .commit_match(record.clone(), &result.rating_changes)?;

        info!(
            "Recorded match {} - score {}-{}, expected A {:.3}",
            record.id, record.score_a, record.score_b, result.expected_score_a
        );
        for change in &result.rating_changes {
            debug!(
                "  {} (side {}): {} -> {} ({:+})",
                change.player_id,
                change.side,
                change.old_rating,
                change.new_rating,
                change.delta()
            );
        }

        Ok(record)
    }

    /// Player details and statistics, with gaps in the rating history filled
    /// according to the configured fallback
    pub fn player_profile(&self, player_id: &str) -> Result<PlayerProfile> {
        let player = self.require_player(player_id)?;
        let matches = self.storage.list_matches()?;
        let mut stats = compute_player_stats(player_id, &matches);

        let missing = stats.missing_ratings();
        if missing > 0 {
            debug!(
                "{} history points for {} have no snapshot, using {:?}",
                missing, player_id, self.stats_settings.history_fallback
            );

            if self.stats_settings.history_fallback == HistoryFallback::Replay {
                let replayed = replay_rating_snapshots(&matches, self.calculator.as_ref())?;
                stats.fill_missing_ratings(|point| {
                    replayed
                        .get(&point.match_id)
                        .and_then(|snapshot| snapshot.get(player_id).copied())
                });
            }

            // Anything still unknown reports the current rating
            stats.fill_missing_ratings(|_| Some(player.rating));
        }

        Ok(PlayerProfile { player, stats })
    }

    /// All players ranked by rating
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let players = self.storage.list_players()?;
        Ok(leaderboard(&players))
    }

    /// The most recent matches, newest first
    pub fn recent_matches(&self) -> Result<Vec<Match>> {
        let matches = self.storage.list_matches()?;
        let recent = recent_matches(&matches, self.stats_settings.recent_matches_limit);
        if recent.is_empty() {
            debug!("No matches recorded yet");
        }
        Ok(recent)
    }
}
