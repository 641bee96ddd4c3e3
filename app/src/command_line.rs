//! Configs that are gathered from the command line -- see [CommandLineOptions]

use dal_api::ReplaySourceImplementations;
use structopt::StructOpt;
use strum::VariantNames;


/// Command-line options
#[derive(Debug,StructOpt)]
#[structopt(about = "
================================================================
Summarizes Squadron TD matches from decoded StarCraft II replays,
writing one JSON entry per replay to the standard output.
================================================================
")]
pub struct CommandLineOptions {

    // FLAGS
    ////////

    /// Outputs any non-fatal errors or inconsistencies in the events to stderr
    #[structopt(long)]
    pub verbose: bool,

    /// Considers all errors as fatal -- even the ones that might be ignored (such as an unparseable event)
    #[structopt(long)]
    pub pedantic: bool,

    /// Traces every decoded event to stderr
    #[structopt(long)]
    pub debug: bool,

    /// One replay per line, instead of an indented json
    #[structopt(long)]
    pub compact: bool,


    // OPTIONS
    //////////

    /// JSON file listing the game patches, like `[{"time": 1690000000, "patch": "2.1"}]`.
    /// Without it, every replay is rejected as an outdated patch
    #[structopt(long)]
    pub patches_file: Option<String>,

    /// Where the decoded replays are read from
    #[structopt(long, default_value = "dump-directory", possible_values = ReplaySourceImplementations::VARIANTS)]
    pub replay_source: ReplaySourceImplementations,


    // ARGS
    ///////

    /// Replays to analyse -- for the `dump-directory` source, the directories with each replay's dump.
    /// Defaults to the current directory
    pub replays: Vec<String>,

}

pub fn parse_from_args() -> CommandLineOptions {
    fill_in_defaults(CommandLineOptions::from_args())
}

fn fill_in_defaults(mut command_line_options: CommandLineOptions) -> CommandLineOptions {
    if command_line_options.replays.is_empty() {
        command_line_options.replays.push(".".to_string());
    }
    command_line_options
}


/// Unit tests for the [command_line](super) module
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn defaults() {
        let options = fill_in_defaults(CommandLineOptions::from_iter(["app"]));
        assert_eq!(options.replays, vec![".".to_string()]);
        assert_eq!(options.replay_source, ReplaySourceImplementations::DumpDirectory);
        assert_eq!(options.patches_file, None);
        assert!(!options.verbose && !options.pedantic && !options.compact);
    }

    #[test]
    fn flags_and_replays() {
        let options = fill_in_defaults(CommandLineOptions::from_iter(
            ["app", "--verbose", "--compact", "--patches-file", "patches.json", "replays/a", "replays/b"]));
        assert!(options.verbose);
        assert!(options.compact);
        assert_eq!(options.patches_file.as_deref(), Some("patches.json"));
        assert_eq!(options.replays, vec!["replays/a".to_string(), "replays/b".to_string()]);
    }

    #[test]
    fn unknown_replay_source() {
        assert!(CommandLineOptions::from_iter_safe(["app", "--replay-source", "mpq-archive"]).is_err());
    }

}
