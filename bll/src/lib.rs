//! Business Logic Layer: accepts or rejects replays and reduces the accepted ones into match summaries

pub mod acceptance;
pub mod entity_tracker;
pub mod game_type;
pub mod ordinals;
pub mod reducer;
pub mod unit_classification;
pub mod win_condition;

mod summary;
pub use summary::SummaryLogic;
