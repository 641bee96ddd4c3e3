//! Resting place for [GameMode] & [GameType]

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};


/// The game mode, as selected in the lobby
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum GameMode {
    Select,
    Dynamic,
    Classic,
    Full,
    Arena,
    Draft,
}

/// The game mode variant that was actually played -- see the game type classifier in the BLL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize)]
pub enum GameType {
    Select,
    Draft,
    /// Dynamic mode, where someone used the free-choice builder
    #[strum(serialize = "Random Refined")]
    #[serde(rename = "Random Refined")]
    RandomRefined,
    /// Dynamic mode, where every wave had a single builder kind
    #[strum(serialize = "Chaos Refined")]
    #[serde(rename = "Chaos Refined")]
    ChaosRefined,
    Chaos,
}


/// Unit tests for the [game_modes](super) module
#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;


    #[test]
    fn labels() {
        assert_eq!(GameType::RandomRefined.to_string(), "Random Refined");
        assert_eq!(GameType::ChaosRefined.as_ref(), "Chaos Refined");
        assert_eq!(GameType::from_str("Chaos"), Ok(GameType::Chaos));
        assert_eq!(GameMode::from_str("Dynamic"), Ok(GameMode::Dynamic));
        assert!(GameMode::from_str("Coop").is_err());
        assert_eq!(serde_json::to_string(&GameType::RandomRefined).unwrap(), r#""Random Refined""#);
    }

}
