//! Builds match reports out of replays: acceptance gates, then the reduction of the tracker events

use bll_api::{Config, SummaryLogicApi};
use common::types::Result;
use dal_api::{ReplayEventsDao, ReplayEventsStream};
use model::{
    replay_events::ReplayEvents,
    report::{MatchRejection, MatchSummary, ReplayReport, ReplayReports},
};
use std::sync::Arc;
use futures::{stream, StreamExt};
use log::debug;
use crate::acceptance::{accept_match, check_title};
use crate::reducer::{handle_feed_error, MatchReducer};


/// The [SummaryLogicApi] implementation
pub struct SummaryLogic {
    config: Arc<Config>,
}

impl SummaryLogicApi for SummaryLogic {

    fn new<IntoArcConfig: Into<Arc<Config>>>(config: IntoArcConfig) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// NOTE: blocks until the replay is fully processed -- not to be called from within an executor
    fn summarize_replay(&self, replay_dao: &dyn ReplayEventsDao) -> Result<ReplayReport> {
        futures::executor::block_on(report_replay(&self.config, replay_dao))
    }

    fn summarize_replays(self, replay_daos: Vec<Box<dyn ReplayEventsDao>>) -> ReplayReports {
        let config = self.config;
        let stream = stream::iter(replay_daos)
            .then(move |replay_dao| {
                let config = Arc::clone(&config);
                async move { report_replay(&config, replay_dao.as_ref()).await }
            });
        Box::pin(stream)
    }

}


async fn report_replay(config: &Arc<Config>, replay_dao: &dyn ReplayEventsDao) -> Result<ReplayReport> {
    let source = replay_dao.source_name().to_string();
    let outcome = analyse_replay(config, replay_dao).await
        .map_err(|err| format!("summarize_replay(): failed at analysing replay '{source}': {err}"))?;
    if let Err(rejection) = &outcome {
        debug!("Replay '{source}' rejected: {rejection}");
    }
    Ok(ReplayReport { source, outcome })
}

/// `Ok(Err(rejection))` is a successful analysis of a replay we don't summarize
async fn analyse_replay(config: &Arc<Config>, replay_dao: &dyn ReplayEventsDao) -> Result<std::result::Result<MatchSummary, MatchRejection>> {
    let metadata = replay_dao.metadata()?;
    if let Err(rejection) = check_title(config, &metadata) {
        return Ok(Err(rejection))
    }
    let game_id = find_game_id(config, replay_dao.game_events()?).await?;
    let accepted = match accept_match(config, &metadata, game_id) {
        Ok(accepted) => accepted,
        Err(rejection) => return Ok(Err(rejection)),
    };
    debug!("Reducing match {} from '{}' ({} players, {} mode)", accepted.game_id, replay_dao.source_name(), metadata.players.len(), accepted.game_mode);

    let mut reducer = MatchReducer::new(Arc::clone(config), accepted, metadata.players);
    let mut tracker_events = replay_dao.tracker_events()?;
    while let Some(event) = tracker_events.next().await {
        reducer.apply(&event)?;
    }
    Ok(reducer.finish())
}

/// The match id: the sync time of the first sync loading time event, if any
async fn find_game_id(config: &Config, mut game_events: ReplayEventsStream) -> Result<Option<u64>> {
    while let Some(event) = game_events.next().await {
        match event {
            ReplayEvents::SyncLoadingTime { sync_time, .. } => return Ok(Some(sync_time)),
            ReplayEvents::Error { event_id, err } => handle_feed_error(config, event_id, err.as_ref())?,
            _ => (),
        }
    }
    Ok(None)
}


/// Unit tests for the [summary](super) module
#[cfg(test)]
mod tests {
    use super::*;
    use dal_api::ReplayEventsStream;
    use model::game_modes::GameType;
    use model::patches::{PatchEntry, PatchTable};
    use model::players::{Player, Team};
    use model::replay_events::{EntityKey, MapPoint, UnitSpawn};
    use model::replay_metadata::ReplayMetadata;
    use model::report::{BuilderRecord, SendRecord, TowerRecord, UpgradeRecord, WorkerRecord};


    // unit-isolated tests section
    //////////////////////////////
    // the following tests use a mock implementation for the DAL layer: `TestDao`,
    // allowing us freedom to test some simple, yet diverse set of scenarios

    #[test]
    fn happy_path() {
        let dao = TestDao::new(metadata("Squadron TD"), || vec![
            ReplayEvents::PlayerSetup { game_loop: 0, player_id: 1, user_id: Some(0), slot_id: Some(0) },
            ReplayEvents::PlayerSetup { game_loop: 0, player_id: 2, user_id: Some(1), slot_id: Some(1) },
            ReplayEvents::PlayerSetup { game_loop: 0, player_id: 3, user_id: Some(2), slot_id: Some(2) },
            ReplayEvents::PlayerSetup { game_loop: 0, player_id: 4, user_id: Some(3), slot_id: Some(3) },
            born(1, 1, "Wave4", 13, None),
            born(2, 1, "SecuritySystem", 11, Some(MapPoint { x: 51.0, y: 10.0 })),
            born(3, 1, "XBuilder", 1, None),
            born(4, 1, "Send_Y", 3, None),
            ReplayEvents::UnitDied { game_loop: 9000, key: EntityKey::new(2, 1), killer_player_id: Some(13), killer_key: None, location: Some(MapPoint { x: 51.0, y: 10.0 }) },
        ], sync_time_events);
        let report = summary_logic().summarize_replay(&dao).expect("summarize_replay() shouldn't fail here");
        assert_eq!(report.source, "test-dao");
        let summary = report.outcome.expect("the match should have been summarized");
        assert_eq!(summary.end_wave, 4);
        assert_eq!(summary.winner, Team::West);
        assert_eq!(summary.game_type, GameType::ChaosRefined);
        assert_eq!(summary.builders, vec![BuilderRecord { player: 1, kind: "XBuilder".to_string(), wave: 4 }]);
        assert_eq!(summary.sends, vec![SendRecord { player: 3, kind: "Send_Y".to_string(), wave: 5 }]);
        assert_eq!(summary.players.iter().map(|player| (player.player_id, player.won)).collect::<Vec<_>>(),
                   vec![(Some(1), false), (Some(2), false), (Some(3), true), (Some(4), true)]);
    }

    #[test]
    fn unsupported_title() {
        let dao = TestDao::new(metadata("Nexus Wars"), Vec::new, || panic!("game events shouldn't be read for unsupported titles"));
        let report = summary_logic().summarize_replay(&dao).expect("summarize_replay() shouldn't fail here");
        assert_eq!(report.outcome, Err(MatchRejection::UnsupportedGame { title: "Nexus Wars".to_string() }));
    }

    #[test]
    fn missing_game_id() {
        let dao = TestDao::new(metadata("Squadron TD"), Vec::new, Vec::new);
        let report = summary_logic().summarize_replay(&dao).expect("summarize_replay() shouldn't fail here");
        assert_eq!(report.outcome, Err(MatchRejection::MissingGameId));
    }

    /// Feed errors in the game events are subject to the same policy as the tracker events'
    #[test]
    fn game_events_feed_errors() {
        let game_events = || vec![
            ReplayEvents::Error { event_id: 1, err: Box::from("unreadable line") },
            ReplayEvents::SyncLoadingTime { game_loop: 0, sync_time: 1_700_000_000 },
        ];
        let dao = TestDao::new(metadata("Squadron TD"), Vec::new, game_events);
        let report = summary_logic().summarize_replay(&dao).expect("feed errors should have been ignored");
        assert_eq!(report.outcome, Err(MatchRejection::GameDidNotEnd));

        let strict = SummaryLogic::new(Config { stop_on_feed_errors: true, ..config() });
        let err = strict.summarize_replay(&dao).expect_err("feed errors should have stopped the analysis");
        assert_eq!(err.to_string(), "summarize_replay(): failed at analysing replay 'test-dao': Event #1: Feed error: unreadable line");
    }

    /// Each replay gets a fresh state & the reports come out in order
    #[test]
    fn batches() {
        let daos: Vec<Box<dyn ReplayEventsDao>> = vec![
            Box::new(TestDao::new(metadata("Squadron TD"), || vec![born(1, 1, "Wave7", 13, None)], sync_time_events)),
            Box::new(TestDao::new(metadata("Squadron TD Beta"), Vec::new, Vec::new)),
            Box::new(TestDao::new(metadata("Squadron TD"), || vec![born(1, 1, "Wave2", 13, None), born(5, 1, "SquadronWorker", 1, None)], sync_time_events)),
        ];
        let reports: Vec<ReplayReport> = futures::executor::block_on_stream(summary_logic().summarize_replays(daos))
            .map(|report| report.expect("summarize_replays() shouldn't fail here"))
            .collect();
        assert_eq!(reports.iter().map(|report| report.outcome.clone().err()).collect::<Vec<_>>(),
                   vec![Some(MatchRejection::GameDidNotEnd), Some(MatchRejection::MissingGameId), Some(MatchRejection::GameDidNotEnd)]);
    }


    // unit-integrated tests section
    ////////////////////////////////
    // the tests bellow use a real DAL implementation
    // NOTE: they were not placed under this crate's 'tests/' directory as the mentioned directory
    //       is where tests with upwards integration must reside -- tests the usage of this crate's library,
    //       whereas the following tests are for downwards integration: we are testing if the DAL implementations
    //       work with this module.

    /// A complete dump, where all lines should be parsed OK and the match ends with West winning
    const WEST_WINS_DUMP_LOCATION: &str = "../dal/tests/resources/west_wins";
    /// The same match, cut before the base core falls
    const DID_NOT_END_DUMP_LOCATION: &str = "../dal/tests/resources/did_not_end";
    const MALFORMED_DUMP_LOCATION: &str = "../dal/tests/resources/malformed_lines";


    #[test]
    fn fully_working_dump() {
        let summary = integrated_report(config(), WEST_WINS_DUMP_LOCATION)
            .expect("summarize_replay() shouldn't fail here")
            .outcome
            .expect("the match should have been summarized");
        assert_eq!(summary.id, 1_700_000_000);
        assert_eq!(summary.patch, "2.1");
        assert_eq!(summary.creeps, "3x");
        assert_eq!(summary.game_type, GameType::ChaosRefined);
        assert_eq!(summary.end_wave, 2);
        assert_eq!(summary.winner, Team::West);
        assert_eq!(summary.players.iter().map(|player| (player.name.as_str(), player.player_id, player.won)).collect::<Vec<_>>(),
                   vec![("Alice", Some(1), false), ("Bruno", Some(2), false), ("Carla", Some(3), true), ("Dario", Some(4), true)]);
        assert_eq!(summary.towers, vec![TowerRecord { builder: 1, kind: "fFireTower".to_string(), wave: 1 }]);
        assert_eq!(summary.sends, vec![SendRecord { player: 4, kind: "Send_Zergling".to_string(), wave: 2 }]);
        assert_eq!(summary.builders, vec![
            BuilderRecord { player: 1, kind: "FireBuilder".to_string(),  wave: 1 },
            BuilderRecord { player: 3, kind: "FireBuilder".to_string(),  wave: 1 },
            BuilderRecord { player: 2, kind: "WaterBuilder".to_string(), wave: 2 },
            BuilderRecord { player: 4, kind: "WaterBuilder".to_string(), wave: 2 },
        ]);
        assert_eq!(summary.workers, vec![
            WorkerRecord { player: 2, wave: 1, number: 1 },
            WorkerRecord { player: 2, wave: 2, number: 2 },
        ]);
        assert_eq!(summary.upgrades, vec![
            UpgradeRecord { player: 2, wave: 1, number: 1 },
            UpgradeRecord { player: 2, wave: 2, number: 2 },
        ]);
    }

    #[test]
    fn unfinished_dump() {
        let report = integrated_report(config(), DID_NOT_END_DUMP_LOCATION).expect("summarize_replay() shouldn't fail here");
        assert_eq!(report.outcome, Err(MatchRejection::GameDidNotEnd));
    }

    #[test]
    fn malformed_dump() {
        let report = integrated_report(config(), MALFORMED_DUMP_LOCATION).expect("feed errors should have been ignored");
        assert_eq!(report.outcome, Err(MatchRejection::GameDidNotEnd));
        let result = integrated_report(Config { stop_on_feed_errors: true, ..config() }, MALFORMED_DUMP_LOCATION);
        assert!(result.is_err(), "feed errors should have stopped the analysis");
    }

    #[test]
    fn outdated_patch() {
        let config = Config { patches: PatchTable::new(vec![PatchEntry { time: 1_800_000_000, patch: "3.0".to_string() }]), ..config() };
        let report = integrated_report(config, WEST_WINS_DUMP_LOCATION).expect("summarize_replay() shouldn't fail here");
        assert_eq!(report.outcome, Err(MatchRejection::OutdatedPatch { game_id: 1_700_000_000 }));
    }


    fn integrated_report(config: Config, dump_location: &str) -> Result<ReplayReport> {
        let dal_config = Arc::new(dal_api::Config::default());
        let dao = dal::factory::instantiate_replay_dao(dal_config, dump_location);
        SummaryLogic::new(config).summarize_replay(dao.as_ref())
    }

    fn config() -> Config {
        Config {
            patches: PatchTable::new(vec![
                PatchEntry { time: 1_600_000_000, patch: "1.0".to_string() },
                PatchEntry { time: 1_690_000_000, patch: "2.1".to_string() },
            ]),
            ..Config::default()
        }
    }

    fn summary_logic() -> SummaryLogic {
        SummaryLogic::new(config())
    }

    fn metadata(title: &str) -> ReplayMetadata {
        let players = [Team::East, Team::East, Team::West, Team::West].into_iter()
            .enumerate()
            .map(|(n, team)| Player {
                handle: format!("1-S2-1-{n}"),
                name: format!("Player{n}"),
                team: Some(team),
                user_id: Some(n as u32),
                player_id: None,
                color: (0, 0, 0),
                won: false,
            })
            .collect();
        ReplayMetadata {
            title: title.to_string(),
            players,
            game_mode_attribute: Some("0002".to_string()),
            creep_attribute: Some("0003".to_string()),
        }
    }

    fn sync_time_events() -> Vec<ReplayEvents> {
        vec![
            ReplayEvents::Other { game_loop: 0, name: "NNet.Game.SUserFinishedLoadingSyncEvent".to_string() },
            ReplayEvents::SyncLoadingTime { game_loop: 0, sync_time: 1_700_000_000 },
        ]
    }

    fn born(tag_index: u32, tag_recycle: u32, unit_type_name: &str, control_player_id: u32, location: Option<MapPoint>) -> ReplayEvents {
        ReplayEvents::UnitBorn {
            game_loop: 100,
            unit: UnitSpawn {
                key: EntityKey::new(tag_index, tag_recycle),
                unit_type_name: unit_type_name.to_string(),
                control_player_id,
                upkeep_player_id: control_player_id,
                location,
            },
        }
    }


    /// Mock DAL for tests: events are produced anew for each requested `Stream`
    struct TestDao {
        metadata: ReplayMetadata,
        tracker_events: fn() -> Vec<ReplayEvents>,
        game_events: fn() -> Vec<ReplayEvents>,
    }
    impl TestDao {
        pub fn new(metadata: ReplayMetadata, tracker_events: fn() -> Vec<ReplayEvents>, game_events: fn() -> Vec<ReplayEvents>) -> Self {
            Self { metadata, tracker_events, game_events }
        }
    }
    impl ReplayEventsDao for TestDao {
        fn source_name(&self) -> &str {
            "test-dao"
        }
        fn metadata(&self) -> Result<ReplayMetadata> {
            Ok(self.metadata.clone())
        }
        fn tracker_events(&self) -> Result<ReplayEventsStream> {
            Ok(Box::pin(stream::iter((self.tracker_events)())))
        }
        fn game_events(&self) -> Result<ReplayEventsStream> {
            Ok(Box::pin(stream::iter((self.game_events)())))
        }
    }
}
