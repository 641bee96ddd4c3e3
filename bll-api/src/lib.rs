//! The Business Logic Layer's contract: turns decoded replays into match reports

mod config;
pub use config::*;

use common::types::Result;
use dal_api::ReplayEventsDao;
use model::report::{ReplayReport, ReplayReports};
use std::sync::Arc;


pub trait SummaryLogicApi {

    /// Creates a new instance
    fn new<IntoArcConfig: Into<Arc<Config>>>(config: IntoArcConfig) -> Self;

    /// Analyses a single replay, yielding either its [model::report::MatchSummary] or the reason it was rejected.\
    /// `Err` is reserved for infrastructure failures (IO, unreadable dumps, feed errors when configured to stop on them).
    fn summarize_replay(&self, replay_dao: &dyn ReplayEventsDao) -> Result<ReplayReport>;

    /// Builds the reports of many replays, lazily, in the order they were given -- each with a fresh match state
    fn summarize_replays(self, replay_daos: Vec<Box<dyn ReplayEventsDao>>) -> ReplayReports;

}
