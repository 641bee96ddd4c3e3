//! Models the records produced by the external StarCraft II replay decoder, as it dumps them:
//!   1) Weakly-typed events ([model::RawEvent]): a discriminator + a bag of attributes that depend on it;
//!   2) The lobby, details & attributes records ([metadata::ReplayMetadataDump]).
//!
//! This crate knows nothing about any particular game mode: it is just the decoder's output, made readable from Rust.

pub mod model;
pub mod deserializer;
pub mod metadata;
