//! The match ends when one of the base cores (the [SENTINEL_UNIT]) dies on its own base tile

use model::board::{EAST_BASE_TILE, WEST_BASE_TILE};
use model::players::Team;
use model::replay_events::ReplayEvents;
use crate::entity_tracker::TrackedEntity;


pub const SENTINEL_UNIT: &str = "SecuritySystem";


/// The team whose base sits at `position`, if any
pub fn defeated_team(position: i32) -> Option<Team> {
    match position {
        EAST_BASE_TILE => Some(Team::East),
        WEST_BASE_TILE => Some(Team::West),
        _ => None,
    }
}

/// Given a death and the birth of the unit that died, tells the winning team -- if the death ended the match
pub fn detect_winner(death: &ReplayEvents, birth: &TrackedEntity) -> Option<Team> {
    if !birth.matches_unit(SENTINEL_UNIT) {
        return None
    }
    death.position()
        .and_then(defeated_team)
        .map(|defeated| defeated.opponent())
}
