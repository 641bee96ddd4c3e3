//! Resting place for [ReplayEventsSyncReader]


use crate::events_translation::translate_replay_events;
use common::types::Result;
use dal_api::{Config, ReplayEventsStream};
use sc2_replay_events::{
    deserializer::deserialize_event_line,
    model::RawEvent,
};
use std::{
    io::BufRead,
    sync::Arc,
    task::Poll,
};
use futures::{stream, StreamExt};
use log::trace;


/// Reads decoded replay events from any `BufRead` holding an event dump: one json event per line.\
/// Blank lines are skipped.
pub struct ReplayEventsSyncReader<Reader: BufRead> {
    config: Arc<Config>,
    source_name: String,
    reader: Reader,
}

impl<Reader: BufRead + 'static> ReplayEventsSyncReader<Reader> {

    pub fn new(config: Arc<Config>, source_name: &str, reader: Reader) -> Self {
        Self {
            config,
            source_name: source_name.into(),
            reader,
        }
    }

    pub fn events_stream(self) -> ReplayEventsStream {
        let mut lines_iter = self.reader.lines()
            .enumerate()
            .filter(|(_line_number, line_result)| !matches!(line_result, Ok(line) if line.trim().is_empty()));

        let yield_item = |event: RawEvent| Poll::Ready(Some(Ok(event)));
        let yield_error = |err: String| -> Poll<Option<Result<RawEvent>>> { Poll::Ready(Some(Err(Box::from(err)))) };
        let end_of_stream = || Poll::Ready(None);

        let debug = self.config.debug;
        let source_name = self.source_name;
        let stream = stream::poll_fn(move |_|
            lines_iter.next()
                .map_or_else(end_of_stream,
                             |(line_number, line_result)| line_result
                                 .map_err(|read_err| format!("IO read error when processing event dump '{}' at line {}: {read_err:?}", source_name, line_number+1))
                                 .map_or_else(yield_error,
                                              |line| deserialize_event_line(&line)
                                                     .map_err(|parsing_err| format!("`EventParsingError` when processing event dump '{}' at line {}: {parsing_err:?}", source_name, line_number+1))
                                                     .map_or_else(yield_error, yield_item)
                                 )
                )
        );
        let stream = translate_replay_events(stream);
        if debug {
            Box::pin(stream
                .inspect(|yielded_event| trace!("{yielded_event:?}")))
        } else {
            Box::pin(stream)
        }
    }

}
