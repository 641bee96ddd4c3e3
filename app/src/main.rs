//! Command-line front end for the replay analyser:
//!
//! ================================================================
//! Summarizes Squadron TD matches from decoded StarCraft II replays,
//! writing one JSON entry per replay to the standard output.
//! ================================================================
//!
//! USAGE:
//!     sqtd-replay-analyser [FLAGS] [OPTIONS] [replays]...
//!
//! FLAGS:
//!         --compact     One replay per line, instead of an indented json
//!         --debug       Traces every decoded event to stderr
//!     -h, --help        Prints help information
//!         --pedantic    Considers all errors as fatal -- even the ones that might be ignored (such as an unparseable event)
//!     -V, --version     Prints version information
//!         --verbose     Outputs any non-fatal errors or inconsistencies in the events to stderr
//!
//! OPTIONS:
//!         --patches-file <patches-file>      JSON file listing the game patches
//!         --replay-source <replay-source>    Where the decoded replays are read from [default: dump-directory]
//!
//! ARGS:
//!     <replays>...    Replays to analyse -- for the `dump-directory` source, the directories with each replay's dump
//!
//!
//! Explore some execution options:
//!  - ./target/debug/sqtd-replay-analyser --help
//!  - ./target/debug/sqtd-replay-analyser --patches-file patches.json dumps/*            # one report entry per replay dump
//!  - ./target/debug/sqtd-replay-analyser --verbose --patches-file patches.json dumps/*  # also tells, on stderr, about any inconsistencies found in the events
//!  - ./target/debug/sqtd-replay-analyser --pedantic --patches-file patches.json dumps/* # stops on the first unparseable event

mod command_line;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::sync::Arc;
use bll_api::SummaryLogicApi;
use log::{warn, LevelFilter};
use model::patches::{PatchEntry, PatchTable};

/// Buffer to allow efficient output operations
const OUTPUT_BUFFER_SIZE: usize = 1024 * 1024;

fn main() -> Result<(), Box<dyn std::error::Error>> {

    let command_line_options = command_line::parse_from_args();

    // start the logger
    let log_level = if command_line_options.debug {
        LevelFilter::Trace
    } else if command_line_options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    simple_logger::SimpleLogger::new().with_utc_timestamps().with_level(log_level).init().unwrap_or_else(|_| eprintln!("--> LOGGER WAS ALREADY STARTED"));

    let dal_config = Arc::new(dal_api::Config {
        replay_source_implementation: command_line_options.replay_source,
        debug: command_line_options.debug,
    });
    let logic_config = bll_api::Config {
        log_issues: command_line_options.verbose,
        stop_on_feed_errors: command_line_options.pedantic,
        patches: load_patches(command_line_options.patches_file.as_deref())?,
        ..bll_api::Config::default()
    };
    let presentation_config = presentation::Config {
        log_errors: true,
        stop_on_errors: command_line_options.pedantic,
        pretty: !command_line_options.compact,
    };
    let presentation_writer = BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, std::io::stdout());

    let replay_daos = command_line_options.replays.iter()
        .map(|replay_locator| dal::factory::instantiate_replay_dao(Arc::clone(&dal_config), replay_locator))
        .collect();
    let reports_stream = bll::SummaryLogic::new(logic_config).summarize_replays(replay_daos);
    presentation::to_json(&presentation_config, reports_stream, presentation_writer)?;

    Ok(())
}

/// Reads the patch release times from the JSON file at `patches_file`, if given
fn load_patches(patches_file: Option<&str>) -> Result<PatchTable, Box<dyn std::error::Error>> {
    let Some(patches_file) = patches_file else {
        warn!("No --patches-file was given: every replay will be rejected as an outdated patch");
        return Ok(PatchTable::default())
    };
    let file = File::open(patches_file)
        .map_err(|err| format!("Couldn't open patches file '{patches_file}' for reading: {err}"))?;
    let entries: Vec<PatchEntry> = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Couldn't parse patches file '{patches_file}': {err}"))?;
    let patches = PatchTable::new(entries);
    if patches.is_empty() {
        warn!("Patches file '{patches_file}' lists no patches: every replay will be rejected as an outdated patch");
    }
    Ok(patches)
}
