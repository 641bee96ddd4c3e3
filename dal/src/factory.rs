//! Factory for obtaining one of the implementations of our DAO objects

use std::sync::Arc;
use dal_api::{Config, ReplayEventsDao, ReplaySourceImplementations};
use crate::dump_directory_reader::ReplayDumpDirectoryReader;

/// Instantiates a Data Access Object (dao) able to work on the replay pointed to by `replay_locator`
pub fn instantiate_replay_dao(config: Arc<Config>, replay_locator: &str) -> Box<dyn ReplayEventsDao> {
    match config.replay_source_implementation {
        ReplaySourceImplementations::DumpDirectory => Box::new(ReplayDumpDirectoryReader::new(config, replay_locator)),
    }
}
