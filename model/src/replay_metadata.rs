//! Resting place for [ReplayMetadata]

use crate::players::Player;


/// The non-event records of a replay the business logic needs, already translated by the DAL
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayMetadata {
    /// The map (arcade game) title
    pub title: String,
    /// All human players, in the order the replay details list them
    pub players: Vec<Player>,
    /// The lobby's game mode attribute value (like `0002`), if set
    pub game_mode_attribute: Option<String>,
    /// The lobby's creep multiplier attribute value (like `0003`), if set
    pub creep_attribute: Option<String>,
}
