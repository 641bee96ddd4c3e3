//! The match state machine: a single pass over the tracker events of an accepted replay,
//! accumulating the per-wave statistics & detecting the winner

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use bll_api::Config;
use common::types::Result;
use log::{debug, trace, warn};
use model::players::{Player, Team};
use model::replay_events::{ReplayEvents, UnitSpawn};
use model::report::{BuilderRecord, MatchRejection, MatchSummary, SendRecord, TowerRecord, UpgradeRecord, WorkerRecord};
use crate::acceptance::AcceptedMatch;
use crate::entity_tracker::{EntityTracker, TrackedEntity};
use crate::game_type::classify_game_type;
use crate::ordinals::{OrdinalCounters, PlayerKey};
use crate::unit_classification::{classify_unit, UnitRole};
use crate::win_condition::detect_winner;
use model::game_modes::GameMode;


/// The only upgrade that makes into the statistics
pub const REFINERY_SPEED_UPGRADE: &str = "RefinerySpeed";


/// State of a single match reduction. Not to be shared: build a new one for each replay.
pub struct MatchReducer {
    config: Arc<Config>,
    accepted: AcceptedMatch,
    players: Vec<Player>,
    tracker: EntityTracker,

    wave: u32,
    builder_counts: BTreeMap<String, u32>,
    /// filled in for [GameMode::Dynamic] matches only
    builders_by_wave: BTreeMap<u32, BTreeSet<String>>,

    towers: Vec<TowerRecord>,
    sends: Vec<SendRecord>,
    builders: Vec<BuilderRecord>,
    workers: Vec<WorkerRecord>,
    upgrades: Vec<UpgradeRecord>,
    worker_ordinals: OrdinalCounters<PlayerKey>,
    upgrade_ordinals: OrdinalCounters<PlayerKey>,

    winner: Option<Team>,
}

impl MatchReducer {

    pub fn new(config: Arc<Config>, accepted: AcceptedMatch, players: Vec<Player>) -> Self {
        Self {
            config,
            accepted,
            players,
            tracker: EntityTracker::new(),
            wave: 0,
            builder_counts: BTreeMap::new(),
            builders_by_wave: BTreeMap::new(),
            towers: vec![],
            sends: vec![],
            builders: vec![],
            workers: vec![],
            upgrades: vec![],
            worker_ordinals: OrdinalCounters::new(),
            upgrade_ordinals: OrdinalCounters::new(),
            winner: None,
        }
    }

    /// Consumes all `events`, then concludes the match -- see [Self::finish()]
    pub fn reduce(mut self, events: impl IntoIterator<Item=ReplayEvents>) -> Result<std::result::Result<MatchSummary, MatchRejection>> {
        for event in events {
            self.apply(&event)?;
        }
        Ok(self.finish())
    }

    /// Folds a single event into the match state.\
    /// `Err` only for feed errors, when the configuration says to stop on them.
    pub fn apply(&mut self, event: &ReplayEvents) -> Result<()> {
        // resolved before the event gets to change the tracker
        let dying_entity = if event.is_unit_died() {
            self.tracker.lookup(event, false).cloned()
        } else {
            None
        };

        match event {
            ReplayEvents::Error { event_id, err } => handle_feed_error(&self.config, *event_id, err.as_ref())?,
            ReplayEvents::PlayerSetup { player_id, user_id, .. } => self.bind_player_id(*player_id, *user_id),
            ReplayEvents::UnitBorn { unit, .. } |
            ReplayEvents::UnitInit { unit, .. } => {
                self.tracker.register(event);
                self.handle_unit(unit);
            },
            ReplayEvents::Upgrade { player_id, upgrade_type_name, .. } => self.handle_upgrade(*player_id, upgrade_type_name),
            ReplayEvents::UnitDied { .. } => if let Some(birth) = dying_entity {
                self.handle_death(event, &birth);
            },
            _ => (),
        }
        Ok(())
    }

    /// Concludes the match: rejected if no base core fell, otherwise classified & summarized
    pub fn finish(self) -> std::result::Result<MatchSummary, MatchRejection> {
        let winner = self.winner.ok_or(MatchRejection::GameDidNotEnd)?;
        let game_type = classify_game_type(self.accepted.game_mode, &self.builder_counts, &self.builders_by_wave)?;
        let players = self.players.into_iter()
            .map(|player| Player { won: player.team == Some(winner), ..player })
            .collect();
        Ok(MatchSummary {
            id: self.accepted.game_id,
            patch: self.accepted.patch,
            creeps: self.accepted.creeps,
            game_type,
            end_wave: self.wave,
            winner,
            players,
            towers: self.towers,
            sends: self.sends,
            builders: self.builders,
            workers: self.workers,
            upgrades: self.upgrades,
        })
    }

    fn bind_player_id(&mut self, player_id: u32, user_id: Option<u32>) {
        let player = user_id.and_then(|user_id| self.players.iter_mut().find(|player| player.user_id == Some(user_id)));
        match player {
            Some(player) => player.player_id = Some(player_id),
            None => debug!("No player for the setup of player id {player_id} (user id {user_id:?})"),
        }
    }

    fn handle_unit(&mut self, unit: &UnitSpawn) {
        let player = unit.control_player_id;
        for role in classify_unit(&unit.unit_type_name, player) {
            match role {
                UnitRole::WaveMarker { wave } => self.advance_wave(wave),
                UnitRole::Worker => {
                    let number = self.worker_ordinals.next(PlayerKey::PlayerId(player));
                    self.workers.push(WorkerRecord { player, wave: self.wave, number });
                },
                UnitRole::Builder => {
                    *self.builder_counts.entry(unit.unit_type_name.clone()).or_insert(0) += 1;
                    self.builders.push(BuilderRecord { player, kind: unit.unit_type_name.clone(), wave: self.wave });
                    if self.accepted.game_mode == GameMode::Dynamic {
                        self.builders_by_wave.entry(self.wave)
                            .or_default()
                            .insert(unit.unit_type_name.clone());
                    }
                },
                UnitRole::Tower => self.towers.push(TowerRecord { builder: player, kind: unit.unit_type_name.clone(), wave: self.wave }),
                // sends hit the opponents in the next wave
                UnitRole::Send => self.sends.push(SendRecord { player, kind: unit.unit_type_name.clone(), wave: self.wave.saturating_add(1) }),
            }
        }
    }

    /// Waves never go back
    fn advance_wave(&mut self, wave: u32) {
        if wave >= self.wave {
            self.wave = wave;
        } else if self.config.log_issues {
            warn!("Ignoring marker for wave {wave}: already at wave {}", self.wave);
        }
    }

    fn handle_upgrade(&mut self, player_id: u32, upgrade_type_name: &str) {
        if upgrade_type_name != REFINERY_SPEED_UPGRADE {
            return
        }
        let key = self.player(player_id)
            .map_or(PlayerKey::PlayerId(player_id), |player| PlayerKey::Handle(player.handle.clone()));
        let number = self.upgrade_ordinals.next(key);
        self.upgrades.push(UpgradeRecord { player: player_id, wave: self.wave, number });
    }

    fn handle_death(&mut self, death: &ReplayEvents, birth: &TrackedEntity) {
        let owner = self.player(birth.unit.control_player_id).map(|player| player.name.as_str());
        let killer = match death {
            ReplayEvents::UnitDied { killer_player_id: Some(killer_player_id), .. } => self.player(*killer_player_id).map(|player| player.name.as_str()),
            _ => None,
        };
        trace!("{} died at {}s -- owner: {owner:?}; killer: {killer:?}", birth.unit.unit_type_name, death.game_time());

        let Some(winner) = detect_winner(death, birth)
            else {
                return
            };
        if let Some(previous_winner) = self.winner.replace(winner) {
            if previous_winner != winner && self.config.log_issues {
                warn!("Winner changed from {previous_winner} to {winner} at {}s", death.game_time());
            }
        }
    }

    /// The player bound to the in-game `player_id`
    fn player(&self, player_id: u32) -> Option<&Player> {
        self.players.iter().find(|player| player.player_id == Some(player_id))
    }

}

/// Applies the feed error policy: logs if asked to; stops if asked to
pub fn handle_feed_error(config: &Config, event_id: u32, err: &dyn std::error::Error) -> Result<()> {
    if config.log_issues {
        warn!("Failed to process event #{event_id}: {err}");
    }
    if config.stop_on_feed_errors {
        Err(Box::from(format!("Event #{event_id}: Feed error: {err}")))
    } else {
        Ok(())
    }
}
