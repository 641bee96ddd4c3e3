//! Resting place for BLL's [Config] & friends


use std::collections::BTreeMap;
use model::game_modes::GameMode;
use model::patches::PatchTable;

/// Configuration to dictate the tunable behaviors of the Business Logic Layer
pub struct Config {

    /// Log::warn! of any issues that happen during replay processing.\
    /// If [Self::stop_on_feed_errors] is set to false, feed errors won't cause the processors to stop.
    /// With this setting, you have the option to visualize any issues.
    pub log_issues: bool,

    /// If false, ignore any event data feed errors -- such as IO errors, parsing errors.\
    /// If true, causes the error to propagate and the replay analysis to stop.
    pub stop_on_feed_errors: bool,

    /// Map titles we know how to analyse
    pub supported_titles: Vec<String>,

    /// Matches with fewer players than this are rejected
    pub min_players: usize,

    /// Lobby game mode attribute values -> game modes
    pub game_mode_attributes: BTreeMap<String, GameMode>,

    /// Lobby creep attribute values -> creep multiplier labels
    pub creep_multiplier_attributes: BTreeMap<String, String>,

    /// Externally supplied patch release times
    pub patches: PatchTable,

}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_issues: false,
            stop_on_feed_errors: false,
            supported_titles: vec!["Squadron TD".to_string(), "Squadron TD Beta".to_string()],
            min_players: 4,
            game_mode_attributes: BTreeMap::from([
                ("0001".to_string(), GameMode::Select),
                ("0002".to_string(), GameMode::Dynamic),
                ("0003".to_string(), GameMode::Classic),
                ("0004".to_string(), GameMode::Full),
                ("0005".to_string(), GameMode::Arena),
                ("0006".to_string(), GameMode::Draft),
            ]),
            creep_multiplier_attributes: BTreeMap::from([
                ("0002".to_string(), "1x".to_string()),
                ("0003".to_string(), "3x".to_string()),
            ]),
            patches: PatchTable::default(),
        }
    }
}
