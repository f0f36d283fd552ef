//! Storage interface for players and matches
//!
//! The ladder core never owns persistence; it reads and writes through this
//! trait. An in-memory implementation is provided for tests and embedding.

use crate::error::LadderError;
use crate::types::{Match, Player, RatingChange};
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Trait for ladder storage operations
#[cfg_attr(test, mockall::automock)]
pub trait LadderStorage: Send + Sync {
    /// All registered players
    fn list_players(&self) -> crate::error::Result<Vec<Player>>;

    /// Look up a single player
    fn get_player(&self, player_id: &str) -> crate::error::Result<Option<Player>>;

    /// Register a new player
    fn add_player(&self, player: Player) -> crate::error::Result<()>;

    /// The full match log, in no guaranteed order
    fn list_matches(&self) -> crate::error::Result<Vec<Match>>;

    /// Append a match to the log
    fn append_match(&self, record: Match) -> crate::error::Result<()>;

    /// Overwrite a player's rating
    fn update_player_rating(&self, player_id: &str, rating: i32) -> crate::error::Result<()>;

    /// Append a match and apply its rating changes as one unit.
    ///
    /// The default implementation is only as atomic as the two primitives;
    /// backends with transactions should override it.
    fn commit_match(&self, record: Match, changes: &[RatingChange]) -> crate::error::Result<()> {
        self.append_match(record)?;
        for change in changes {
            self.update_player_rating(&change.player_id, change.new_rating)?;
        }
        Ok(())
    }
}

/// Serializable copy of everything a storage backend holds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LadderSnapshot {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// In-memory ladder storage implementation
#[derive(Debug, Default)]
pub struct InMemoryLadderStorage {
    state: RwLock<LadderSnapshot>,
}

impl InMemoryLadderStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed storage from existing data, e.g. an exported JSON document
    pub fn from_snapshot(snapshot: LadderSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Copy out the current contents
    pub fn snapshot(&self) -> crate::error::Result<LadderSnapshot> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> crate::error::Result<RwLockReadGuard<'_, LadderSnapshot>> {
        self.state.read().map_err(|_| {
            anyhow::Error::from(LadderError::StorageError {
                message: "Failed to acquire ladder read lock".to_string(),
            })
        })
    }

    fn write(&self) -> crate::error::Result<RwLockWriteGuard<'_, LadderSnapshot>> {
        self.state.write().map_err(|_| {
            anyhow::Error::from(LadderError::StorageError {
                message: "Failed to acquire ladder write lock".to_string(),
            })
        })
    }
}

fn set_rating(state: &mut LadderSnapshot, player_id: &str, rating: i32) -> crate::error::Result<()> {
    let player = state
        .players
        .iter_mut()
        .find(|p| p.id == player_id)
        .ok_or_else(|| LadderError::PlayerNotFound {
            player_id: player_id.to_string(),
        })?;
    player.rating = rating;
    Ok(())
}

impl LadderStorage for InMemoryLadderStorage {
    fn list_players(&self) -> crate::error::Result<Vec<Player>> {
        Ok(self.read()?.players.clone())
    }

    fn get_player(&self, player_id: &str) -> crate::error::Result<Option<Player>> {
        Ok(self
            .read()?
            .players
            .iter()
            .find(|p| p.id == player_id)
            .cloned())
    }

    fn add_player(&self, player: Player) -> crate::error::Result<()> {
        let mut state = self.write()?;
        if state.players.iter().any(|p| p.id == player.id) {
            return Err(LadderError::StorageError {
                message: format!("Player id {} already stored", player.id),
            }
            .into());
        }
        state.players.push(player);
        Ok(())
    }

    fn list_matches(&self) -> crate::error::Result<Vec<Match>> {
        Ok(self.read()?.matches.clone())
    }

    fn append_match(&self, record: Match) -> crate::error::Result<()> {
        self.write()?.matches.push(record);
        Ok(())
    }

    fn update_player_rating(&self, player_id: &str, rating: i32) -> crate::error::Result<()> {
        set_rating(&mut self.write()?, player_id, rating)
    }

    fn commit_match(&self, record: Match, changes: &[RatingChange]) -> crate::error::Result<()> {
        let mut state = self.write()?;

        // Check every player before touching anything so a failure leaves no partial write
        for change in changes {
            if !state.players.iter().any(|p| p.id == change.player_id) {
                return Err(LadderError::PlayerNotFound {
                    player_id: change.player_id.clone(),
                }
                .into());
            }
        }

        for change in changes {
            set_rating(&mut state, &change.player_id, change.new_rating)?;
        }
        debug!(
            "Committed match {} with {} rating updates",
            record.id,
            changes.len()
        );
        state.matches.push(record);

        Ok(())
    }
}
