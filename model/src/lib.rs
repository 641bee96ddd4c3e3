//! Business entities shared by all layers: the typed replay events, the replay metadata
//! and everything that ends up in a match report

pub mod board;
pub mod game_time;
pub mod replay_events;
pub mod replay_metadata;
pub mod players;
pub mod game_modes;
pub mod patches;
pub mod report;
