//! The gates a replay must go through before its events are reduced.
//!
//! Gates run in order, the first failing one deciding the rejection: title, game id, patch,
//! player count, game mode & creep mode.

use bll_api::Config;
use model::game_modes::GameMode;
use model::patches::PatchLookup;
use model::replay_metadata::ReplayMetadata;
use model::report::MatchRejection;


/// What the gates learned about a replay that passed all of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMatch {
    pub game_id: u64,
    pub patch: String,
    pub game_mode: GameMode,
    /// Creep multiplier label, like `3x`
    pub creeps: String,
}

pub fn check_title(config: &Config, metadata: &ReplayMetadata) -> Result<(), MatchRejection> {
    if config.supported_titles.iter().any(|title| title == &metadata.title) {
        Ok(())
    } else {
        Err(MatchRejection::UnsupportedGame { title: metadata.title.clone() })
    }
}

/// The gates after the title's. `game_id` is `None` when the replay has no sync loading time event.
pub fn accept_match(config: &Config, metadata: &ReplayMetadata, game_id: Option<u64>) -> Result<AcceptedMatch, MatchRejection> {
    let game_id = game_id.ok_or(MatchRejection::MissingGameId)?;
    let patch = match config.patches.lookup(game_id) {
        PatchLookup::Patch(patch) => patch.to_string(),
        PatchLookup::BeforeRange => return Err(MatchRejection::OutdatedPatch { game_id }),
    };
    if metadata.players.len() < config.min_players {
        return Err(MatchRejection::NotEnoughPlayers { found: metadata.players.len(), required: config.min_players })
    }
    let game_mode = metadata.game_mode_attribute.as_ref()
        .and_then(|attribute| config.game_mode_attributes.get(attribute))
        .copied()
        .ok_or_else(|| MatchRejection::UnsupportedGameMode { attribute: metadata.game_mode_attribute.clone() })?;
    let creeps = metadata.creep_attribute.as_ref()
        .and_then(|attribute| config.creep_multiplier_attributes.get(attribute))
        .cloned()
        .ok_or_else(|| MatchRejection::UnsupportedCreepMode { attribute: metadata.creep_attribute.clone() })?;
    Ok(AcceptedMatch { game_id, patch, game_mode, creeps })
}
