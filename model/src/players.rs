//! Resting place for [Player] & [Team]

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};


/// The two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Team {
    East,
    West,
}

impl Team {

    /// Maps the team ids found in the replay details: `0` is East, `1` is West
    pub fn from_team_id(team_id: u32) -> Option<Self> {
        match team_id {
            0 => Some(Team::East),
            1 => Some(Team::West),
            _ => None,
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            Team::East => Team::West,
            Team::West => Team::East,
        }
    }
}

/// A human participant of the match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    /// Stable profile identity, in the form `{region}-S2-{realm}-{id}`
    pub handle: String,
    /// Display name, without clan tags
    pub name: String,
    pub team: Option<Team>,
    /// Resolved from the lobby slot the player occupied
    pub user_id: Option<u32>,
    /// The in-game id, bound when the match's player setup events are seen
    pub player_id: Option<u32>,
    pub color: (u8, u8, u8),
    /// Only meaningful in a finished match
    pub won: bool,
}
