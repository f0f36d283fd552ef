//! Service layer for the foosball ladder
//!
//! This module contains the ladder service that records matches and serves
//! player profiles, plus the match legality checks it applies.

pub mod ladder;
pub mod validation;

pub use ladder::{Ladder, PlayerProfile};
pub use validation::validate_new_match;
