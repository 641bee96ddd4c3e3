//! Data Access Layer: reads the replay dumps produced by the decoder collaborator and
//! translates them into the model used by the business logic

pub mod factory;
pub mod dump_directory_reader;
pub mod sync_reader;

mod events_translation;
mod metadata_translation;
