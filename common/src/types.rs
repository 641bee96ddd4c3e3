//! Contains some types used across all layers

use std::result;


/// Infrastructure-level result: IO, unreadable dumps, broken feeds.\
/// Categorical match rejections are NOT carried here -- see `model::report::MatchRejection`
pub type Result<T> = result::Result<T, Box<dyn std::error::Error>>;
