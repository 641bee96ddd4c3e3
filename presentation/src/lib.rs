//! Small crate to be a central point for presentation requisites.
//!
//! Simply shows the `Stream` of replay reports as a Json array, with one object per analysed replay:
//! `{"source": ..., "summary": {...}}` for summarized matches and `{"source": ..., "rejection": "..."}`
//! for the rejected ones.

mod config;
pub use config::Config;

use std::io::Write;
use log::warn;
use model::report::{MatchSummary, ReplayReports};
use serde::Serialize;


#[derive(Serialize)]
struct ReportEntry<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a MatchSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<String>,
}

pub fn to_json(config: &Config, reports_stream: ReplayReports, mut writer: impl Write) -> Result<(), Box<dyn std::error::Error>> {

    let mut write = |text: &str|
        writer.write_all(text.as_bytes())
            .map_err(|err| format!("presentation: to_json(): Error writing `ReplayReport` to the given `writer`: {err}"));

    let mut replay_number = 1;
    let mut written_entries = 0;
    let reports_stream = futures::executor::block_on_stream(reports_stream);
    write("[\n")?;
    for report_result in reports_stream {
        match report_result {
            Ok(report) => {
                let entry = match &report.outcome {
                    Ok(summary) => ReportEntry { source: &report.source, summary: Some(summary), rejection: None },
                    Err(rejection) => ReportEntry { source: &report.source, summary: None, rejection: Some(rejection.to_string()) },
                };
                let json = if config.pretty { serde_json::to_string_pretty(&entry) } else { serde_json::to_string(&entry) }
                    .map_err(|err| format!("presentation: to_json(): Error serializing the report of '{}': {err}", report.source))?;
                if written_entries > 0 {
                    write(",\n")?;
                }
                write(&json)?;
                written_entries += 1;
            },

            Err(report_err) => {
                let msg = format!("presentation: to_json(): Error in `reports_stream` while processing replay #{replay_number}: {report_err}");
                if config.log_errors {
                    warn!("{msg}");
                }
                if config.stop_on_errors {
                    return Err(Box::from(msg))
                }
            }
        }
        replay_number += 1;
    }
    write("\n]\n")?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use futures::stream;
    use model::game_modes::GameType;
    use model::players::{Player, Team};
    use model::report::{MatchRejection, ReplayReport, SendRecord};
    use common::types::Result;


    #[test]
    fn summaries_and_rejections() {
        let reports = vec![
            Ok(ReplayReport { source: "replays/a".to_string(), outcome: Ok(summary()) }),
            Ok(ReplayReport { source: "replays/b".to_string(), outcome: Err(MatchRejection::GameDidNotEnd) }),
        ];
        let json = assert_json(&Config::default(), reports);
        let entries = json.as_array().expect("the report should be a json array");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["source"], "replays/a");
        assert_eq!(entries[0]["summary"]["gamemode"], "Chaos Refined");
        assert_eq!(entries[0]["summary"]["winner"], "West");
        assert_eq!(entries[0]["summary"]["sends"][0]["type"], "Send_Y");
        assert_eq!(entries[0]["summary"]["players"][0]["won"], true);
        assert!(entries[0].get("rejection").is_none());
        assert_eq!(entries[1]["rejection"], "Game did not end or was Cooperative.");
        assert!(entries[1].get("summary").is_none());
    }

    #[test]
    fn compact_output() {
        let reports = vec![
            Ok(ReplayReport { source: "replays/a".to_string(), outcome: Err(MatchRejection::MissingGameId) }),
            Ok(ReplayReport { source: "replays/b".to_string(), outcome: Err(MatchRejection::GameDidNotEnd) }),
        ];
        let mut buffer = Cursor::new(Vec::new());
        to_json(&Config { pretty: false, ..Config::default() }, Box::pin(stream::iter(reports)), &mut buffer)
            .expect("Failure in generating the json");
        let json_string = String::from_utf8(buffer.into_inner()).expect("the json should be utf-8");
        assert_eq!(json_string, concat!(
            "[\n",
            r#"{"source":"replays/a","rejection":"Invalid Replay Events: no sync loading time event was found, so the match has no id"},"#, "\n",
            r#"{"source":"replays/b","rejection":"Game did not end or was Cooperative."}"#, "\n",
            "]\n",
        ));
    }

    #[test]
    fn empty_stream() {
        let json = assert_json(&Config::default(), vec![]);
        assert_eq!(json, serde_json::json!([]));
    }

    /// Errors are skipped unless configured to stop on them
    #[test]
    fn errors() {
        let reports = || -> Vec<Result<ReplayReport>> { vec![
            Err(Box::from("summarize_replay(): failed at analysing replay 'replays/a': boom")),
            Ok(ReplayReport { source: "replays/b".to_string(), outcome: Err(MatchRejection::MissingGameId) }),
        ] };
        let json = assert_json(&Config { log_errors: false, ..Config::default() }, reports());
        assert_eq!(json.as_array().map(Vec::len), Some(1));

        let mut buffer = Cursor::new(Vec::new());
        let result = to_json(&Config { stop_on_errors: true, log_errors: false, ..Config::default() }, Box::pin(stream::iter(reports())), &mut buffer);
        assert_eq!(result.map_err(|err| err.to_string()),
                   Err("presentation: to_json(): Error in `reports_stream` while processing replay #1: summarize_replay(): failed at analysing replay 'replays/a': boom".to_string()));
    }


    fn assert_json(config: &Config, reports: Vec<Result<ReplayReport>>) -> serde_json::Value {
        let mut buffer = Cursor::new(Vec::new());
        to_json(config, Box::pin(stream::iter(reports)), &mut buffer)
            .expect("Failure in generating the json");
        let json_string = String::from_utf8(buffer.into_inner()).expect("the json should be utf-8");
        print!("{json_string}");
        serde_json::from_str(&json_string)
            .unwrap_or_else(|err| panic!("The produced JSON is not valid: {err}"))
    }

    fn summary() -> MatchSummary {
        MatchSummary {
            id: 1_700_000_000,
            patch: "2.1".to_string(),
            creeps: "3x".to_string(),
            game_type: GameType::ChaosRefined,
            end_wave: 4,
            winner: Team::West,
            players: vec![
                Player { handle: "1-S2-1-1003".to_string(), name: "Carla".to_string(), team: Some(Team::West), user_id: Some(2), player_id: Some(3), color: (28, 167, 234), won: true },
            ],
            towers: vec![],
            sends: vec![SendRecord { player: 3, kind: "Send_Y".to_string(), wave: 5 }],
            builders: vec![],
            workers: vec![],
            upgrades: vec![],
        }
    }
}
