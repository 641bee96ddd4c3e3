//! The seam between the business logic and the replay decoder collaborator

mod config;
pub use config::*;

use std::pin::Pin;
use common::types::Result;
use futures::Stream;
use model::replay_events::ReplayEvents;
use model::replay_metadata::ReplayMetadata;


/// A forward-only, non-restartable feed of decoded events
pub type ReplayEventsStream = Pin<Box<dyn Stream<Item=ReplayEvents>>>;

/// Data Access Object for a single decoded replay
pub trait ReplayEventsDao {

    /// Identifies the replay in diagnostics & reports
    fn source_name(&self) -> &str;

    /// The lobby, details & attributes records of the replay
    fn metadata(&self) -> Result<ReplayMetadata>;

    /// Returns a fresh `Stream` over the replay's tracker events (unit lifecycle, upgrades, stats...).\
    /// Each call starts over from the first event.
    fn tracker_events(&self) -> Result<ReplayEventsStream>;

    /// Returns a fresh `Stream` over the replay's game events (lower level simulation events)
    fn game_events(&self) -> Result<ReplayEventsStream>;
}
