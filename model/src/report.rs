//! Contains summary data used to build reports

use std::pin::Pin;
use common::types::Result;
use futures::Stream;
use serde::Serialize;
use thiserror::Error;
use crate::game_modes::{GameMode, GameType};
use crate::players::{Player, Team};


/// The reports for a batch of replays, one per replay, in the order they were given
pub type ReplayReports = Pin<Box<dyn Stream<Item=Result<ReplayReport>>>>;

/// What came out of analysing a single replay
#[derive(Debug)]
pub struct ReplayReport {
    /// Where the replay came from -- for diagnostics
    pub source: String,
    pub outcome: std::result::Result<MatchSummary, MatchRejection>,
}

/// The summary of a finished match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    /// The match timestamp, as informed by the replay's sync loading time event
    pub id: u64,
    pub patch: String,
    /// Creep multiplier label, like `3x`
    pub creeps: String,
    #[serde(rename = "gamemode")]
    pub game_type: GameType,
    pub end_wave: u32,
    pub winner: Team,
    pub players: Vec<Player>,
    pub towers: Vec<TowerRecord>,
    pub sends: Vec<SendRecord>,
    pub builders: Vec<BuilderRecord>,
    pub workers: Vec<WorkerRecord>,
    pub upgrades: Vec<UpgradeRecord>,
}

/// A tower was placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TowerRecord {
    /// player id
    pub builder: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub wave: u32,
}

/// Creeps were sent to the opponents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRecord {
    pub player: u32,
    #[serde(rename = "type")]
    pub kind: String,
    /// The wave the send affects: one after the wave it was issued in
    pub wave: u32,
}

/// A builder was picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderRecord {
    pub player: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub wave: u32,
}

/// A worker (gas harvester) was hired
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerRecord {
    pub player: u32,
    pub wave: u32,
    /// 1 for the player's first worker, 2 for the second...
    pub number: u32,
}

/// The refinery speed upgrade was researched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeRecord {
    pub player: u32,
    pub wave: u32,
    /// 1 for the player's first upgrade, 2 for the second...
    pub number: u32,
}

/// Reasons for not summarizing a replay. These are expected outcomes when processing
/// a folder full of replays, not failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchRejection {
    #[error("Unsupported Game: '{title}'")]
    UnsupportedGame { title: String },

    #[error("Invalid Replay Events: no sync loading time event was found, so the match has no id")]
    MissingGameId,

    #[error("Outdated Patch: match {game_id} predates every known patch")]
    OutdatedPatch { game_id: u64 },

    #[error("Not Enough Players: {found} found, at least {required} are needed")]
    NotEnoughPlayers { found: usize, required: usize },

    #[error("Unsupported Gamemode: lobby attribute {attribute:?}")]
    UnsupportedGameMode { attribute: Option<String> },

    #[error("Unsupported Creep Mode: lobby attribute {attribute:?}")]
    UnsupportedCreepMode { attribute: Option<String> },

    #[error("Game did not end or was Cooperative.")]
    GameDidNotEnd,

    #[error("Unable to Parse Gamemode: {game_mode} has no known variants")]
    UnparseableGameType { game_mode: GameMode },
}
