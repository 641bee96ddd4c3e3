//! Resting place for DAL's [Config] & friends

use strum_macros::{Display, EnumString, EnumVariantNames};


/// Configuration for the DAL crate
pub struct Config {

    /// The implementation to use when getting a Data Access Object (DAO) instance
    pub replay_source_implementation: ReplaySourceImplementations,

    /// If true, every yielded event is logged with `trace!`
    pub debug: bool,

}

/// Where decoded replays may be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumVariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum ReplaySourceImplementations {
    /// A directory with the decoder's dump of a single replay: `metadata.json`,
    /// `tracker.events.jsonl` & `game.events.jsonl`
    DumpDirectory,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            replay_source_implementation: ReplaySourceImplementations::DumpDirectory,
            debug: false,
        }
    }
}
