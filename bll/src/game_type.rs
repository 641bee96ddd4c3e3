//! Tells which variant of the lobby's game mode was actually played, once the match is over

use std::collections::{BTreeMap, BTreeSet};
use model::game_modes::{GameMode, GameType};
use model::report::MatchRejection;


/// The builder players may pick freely -- only available in "Random Refined" matches
pub const FREE_CHOICE_BUILDER: &str = "RandomCustomBuilder";


/// `builder_counts`: how many times each builder kind was picked, in the whole match.\
/// `builders_by_wave`: the distinct builder kinds picked in each wave (tracked for [GameMode::Dynamic] matches only).
pub fn classify_game_type(game_mode: GameMode,
                          builder_counts: &BTreeMap<String, u32>,
                          builders_by_wave: &BTreeMap<u32, BTreeSet<String>>)
                         -> Result<GameType, MatchRejection> {
    match game_mode {
        GameMode::Select => Ok(GameType::Select),
        GameMode::Draft => Ok(GameType::Draft),
        GameMode::Dynamic => if builder_counts.contains_key(FREE_CHOICE_BUILDER) {
            Ok(GameType::RandomRefined)
        } else if builders_by_wave.values().all(|builder_kinds| builder_kinds.len() == 1) {
            Ok(GameType::ChaosRefined)
        } else {
            Ok(GameType::Chaos)
        },
        GameMode::Classic | GameMode::Full | GameMode::Arena => Err(MatchRejection::UnparseableGameType { game_mode }),
    }
}
