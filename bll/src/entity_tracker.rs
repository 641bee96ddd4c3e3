//! Resting place for [EntityTracker]: resolves which in-match object an event is about,
//! given that the game recycles tag indexes over the course of a match.

use std::collections::HashMap;
use log::debug;
use model::replay_events::{EntityKey, ReplayEvents, UnitSpawn};


/// What is kept about a unit that was born or started being built
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    pub game_loop: u32,
    pub unit: UnitSpawn,
}

impl TrackedEntity {
    /// Projects birth & initialization events -- `None` for any other event
    pub fn from_event(event: &ReplayEvents) -> Option<Self> {
        event.spawn()
            .map(|unit| Self { game_loop: event.game_loop().unwrap_or(0), unit: unit.clone() })
    }

    pub fn matches_unit(&self, unit_type_name: &str) -> bool {
        self.unit.matches_unit(unit_type_name)
    }
}

/// Maps [EntityKey]s to the last entity registered under them.\
/// Misses are expected: a death of something that was never born in the replay is not an error.
#[derive(Debug, Default)]
pub struct EntityTracker {
    entities: HashMap<EntityKey, TrackedEntity>,
}

impl EntityTracker {

    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a birth or initialization event under its key, replacing whatever was there.\
    /// Returns false (and does nothing) for events that don't spawn units.
    pub fn register(&mut self, event: &ReplayEvents) -> bool {
        let Some(tracked_entity) = TrackedEntity::from_event(event)
            else {
                return false
            };
        self.entities.insert(tracked_entity.unit.key, tracked_entity);
        true
    }

    /// The entity currently tracked under the event's own key -- or its killer's, if `use_killer_tag`.\
    /// `None` if untracked or if the event doesn't carry the needed tags.
    pub fn lookup(&self, event: &ReplayEvents, use_killer_tag: bool) -> Option<&TrackedEntity> {
        let key = if use_killer_tag { event.killer_key() } else { event.key() };
        key.and_then(|key| self.entities.get(&key))
    }

    /// Stops tracking the entity under the event's own key, returning it
    pub fn remove(&mut self, event: &ReplayEvents) -> Option<TrackedEntity> {
        let key = event.key()?;
        let removed = self.entities.remove(&key);
        if removed.is_none() {
            debug!("EntityTracker: nothing to remove for {key:?}");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

}
