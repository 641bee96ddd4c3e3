//! Utilities shared by every layer of the workspace

pub mod types;
