//! Resting place for [ReplayDumpDirectoryReader]


use crate::metadata_translation::translate_metadata;
use crate::sync_reader::ReplayEventsSyncReader;
use common::types::Result;
use dal_api::{Config, ReplayEventsDao, ReplayEventsStream};
use model::replay_metadata::ReplayMetadata;
use sc2_replay_events::metadata::ReplayMetadataDump;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;


/// Size for buffering IO (the larger, more RAM is used, but fewer system calls / context switches / hardware requests are required)
const BUFFER_SIZE: usize = 1024*1024;

/// The replay's details, init data, attributes & game metadata, as a single json document
pub const METADATA_FILE: &str = "metadata.json";
/// One json tracker event per line
pub const TRACKER_EVENTS_FILE: &str = "tracker.events.jsonl";
/// One json game event per line
pub const GAME_EVENTS_FILE: &str = "game.events.jsonl";


/// [ReplayEventsDao] implementation for reading a replay that was previously dumped, by the decoder, into a directory
pub struct ReplayDumpDirectoryReader {
    config: Arc<Config>,
    directory: PathBuf,
    source_name: String,
}

impl ReplayDumpDirectoryReader {

    pub fn new(config: Arc<Config>, directory: &str) -> Self {
        Self {
            config,
            directory: PathBuf::from(directory),
            source_name: directory.to_string(),
        }
    }

    fn open(&self, file_name: &str) -> Result<(String, BufReader<File>)> {
        let path = self.directory.join(file_name);
        let path_name = path.to_string_lossy().to_string();
        let file = File::open(&path)
            .map_err(|err| format!("Couldn't open replay dump file '{path_name}' for reading: {err}"))?;
        Ok((path_name, BufReader::with_capacity(BUFFER_SIZE, file)))
    }

    fn events_file_stream(&self, file_name: &str) -> Result<ReplayEventsStream> {
        let (path_name, reader) = self.open(file_name)?;
        Ok(ReplayEventsSyncReader::new(Arc::clone(&self.config), &path_name, reader)
            .events_stream())
    }

}

impl ReplayEventsDao for ReplayDumpDirectoryReader {

    fn source_name(&self) -> &str {
        &self.source_name
    }

    fn metadata(&self) -> Result<ReplayMetadata> {
        let (path_name, reader) = self.open(METADATA_FILE)?;
        let dump: ReplayMetadataDump = serde_json::from_reader(reader)
            .map_err(|err| format!("Couldn't parse replay metadata file '{path_name}': {err}"))?;
        Ok(translate_metadata(dump))
    }

    fn tracker_events(&self) -> Result<ReplayEventsStream> {
        self.events_file_stream(TRACKER_EVENTS_FILE)
    }

    fn game_events(&self) -> Result<ReplayEventsStream> {
        self.events_file_stream(GAME_EVENTS_FILE)
    }

}
