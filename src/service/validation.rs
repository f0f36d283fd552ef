//! Match legality checks applied before a match is rated

use crate::config::MatchSettings;
use crate::error::LadderError;
use crate::types::NewMatch;
use std::collections::HashSet;

/// Check the shape of a match request: non-empty, disjoint sides without
/// repeated players, side sizes within the configured limit, and the draw policy.
pub fn validate_new_match(request: &NewMatch, settings: &MatchSettings) -> crate::error::Result<()> {
    if request.side_a.is_empty() || request.side_b.is_empty() {
        return Err(LadderError::invalid_match("each side must have at least one player").into());
    }

    for (label, side) in [("A", &request.side_a), ("B", &request.side_b)] {
        if side.len() > settings.max_side_size {
            return Err(LadderError::invalid_match(format!(
                "side {} has {} players, at most {} allowed",
                label,
                side.len(),
                settings.max_side_size
            ))
            .into());
        }

        let unique: HashSet<&str> = side.iter().map(String::as_str).collect();
        if unique.len() != side.len() {
            return Err(LadderError::invalid_match(format!(
                "side {} lists the same player twice",
                label
            ))
            .into());
        }
    }

    if let Some(player_id) = request
        .side_a
        .iter()
        .find(|id| request.side_b.contains(*id))
    {
        return Err(LadderError::invalid_match(format!(
            "player {} cannot be on both sides",
            player_id
        ))
        .into());
    }

    if request.score_a == request.score_b && !settings.allow_draws {
        return Err(LadderError::invalid_match(format!(
            "scores are tied at {} and draws are not allowed",
            request.score_a
        ))
        .into());
    }

    Ok(())
}
