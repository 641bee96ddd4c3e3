//! Resting place for [ReplayEvents] & friends


use crate::board::board_position;
use crate::game_time::GameTime;

/// Identity of an in-match object: its numeric slot (`tag_index`) + how many times that slot has been reused (`tag_recycle`).\
/// Two objects sharing a `tag_index`, but with different `tag_recycle`s, are distinct objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey {
    pub tag_index: u32,
    pub tag_recycle: u32,
}

impl EntityKey {
    pub fn new(tag_index: u32, tag_recycle: u32) -> Self {
        Self { tag_index, tag_recycle }
    }
}

/// World coordinates, as reported by the game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

/// The data carried by unit birth & initialization events
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSpawn {
    pub key: EntityKey,
    pub unit_type_name: String,
    pub control_player_id: u32,
    pub upkeep_player_id: u32,
    pub location: Option<MapPoint>,
}

impl UnitSpawn {
    pub fn matches_unit(&self, unit_type_name: &str) -> bool {
        self.unit_type_name == unit_type_name
    }
}

/// Maps the decoded replay events we care about, in close relation to the `sc2-replay-events` crate's `RawEvent`.\
/// Each variant carries only the fields the business logic needs -- translated from the weakly-typed source by the DAL.
///
/// IMPLEMENTATION NOTE: the raw events are a bag of attributes, whose presence depends on the event name.
/// Having this closed model here decouples the application from the decoder & makes missing fields
/// a translation problem ([ReplayEvents::Error]) rather than a business logic one.
#[derive(Debug)]
pub enum ReplayEvents {
    UnitBorn        { game_loop: u32, unit: UnitSpawn },
    /// A unit started being constructed -- towers, most notably
    UnitInit        { game_loop: u32, unit: UnitSpawn },
    UnitDone        { game_loop: u32, key: EntityKey },
    UnitDied        { game_loop: u32, key: EntityKey, killer_player_id: Option<u32>, killer_key: Option<EntityKey>, location: Option<MapPoint> },
    Upgrade         { game_loop: u32, player_id: u32, upgrade_type_name: String, count: i32 },
    PlayerSetup     { game_loop: u32, player_id: u32, user_id: Option<u32>, slot_id: Option<u32> },
    PlayerStats     { game_loop: u32, player_id: u32 },
    UnitOwnerChange { game_loop: u32, key: EntityKey, control_player_id: u32, upkeep_player_id: u32 },
    UnitTypeChange  { game_loop: u32, key: EntityKey, unit_type_name: String },
    /// Game event carrying the match timestamp, used as the match id
    SyncLoadingTime { game_loop: u32, sync_time: u64 },
    ChatMessage     { game_loop: u32, user_id: Option<u32>, message: String },
    /// Any event kind we don't model -- passes through, ignored
    Other           { game_loop: u32, name: String },
    /// The source yielded something that couldn't be made into one of the variants above
    Error           { event_id: u32, err: Box<dyn std::error::Error> },
}

impl ReplayEvents {

    /// Returns true if the event was derived from an error while processing the event source
    pub fn is_err(&self) -> bool {
        matches!(self, ReplayEvents::Error { .. })
    }

    pub fn error(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let ReplayEvents::Error { err, .. } = self {
            Some(err.as_ref())
        } else {
            None
        }
    }

    pub fn is_unit_born(&self) -> bool         { matches!(self, ReplayEvents::UnitBorn { .. }) }
    pub fn is_unit_init(&self) -> bool         { matches!(self, ReplayEvents::UnitInit { .. }) }
    pub fn is_unit_done(&self) -> bool         { matches!(self, ReplayEvents::UnitDone { .. }) }
    pub fn is_unit_died(&self) -> bool         { matches!(self, ReplayEvents::UnitDied { .. }) }
    pub fn is_upgrade(&self) -> bool           { matches!(self, ReplayEvents::Upgrade { .. }) }
    pub fn is_player_setup(&self) -> bool      { matches!(self, ReplayEvents::PlayerSetup { .. }) }
    pub fn is_stats_update(&self) -> bool      { matches!(self, ReplayEvents::PlayerStats { .. }) }
    pub fn is_time_event(&self) -> bool        { matches!(self, ReplayEvents::SyncLoadingTime { .. }) }
    pub fn is_owner_transferred(&self) -> bool { matches!(self, ReplayEvents::UnitOwnerChange { .. }) }
    pub fn is_type_changed(&self) -> bool      { matches!(self, ReplayEvents::UnitTypeChange { .. }) }
    pub fn is_chat_message(&self) -> bool      { matches!(self, ReplayEvents::ChatMessage { .. }) }

    /// The game loop counter at which the event happened -- `None` for [ReplayEvents::Error]s
    pub fn game_loop(&self) -> Option<u32> {
        match self {
            ReplayEvents::UnitBorn        { game_loop, .. } |
            ReplayEvents::UnitInit        { game_loop, .. } |
            ReplayEvents::UnitDone        { game_loop, .. } |
            ReplayEvents::UnitDied        { game_loop, .. } |
            ReplayEvents::Upgrade         { game_loop, .. } |
            ReplayEvents::PlayerSetup     { game_loop, .. } |
            ReplayEvents::PlayerStats     { game_loop, .. } |
            ReplayEvents::UnitOwnerChange { game_loop, .. } |
            ReplayEvents::UnitTypeChange  { game_loop, .. } |
            ReplayEvents::SyncLoadingTime { game_loop, .. } |
            ReplayEvents::ChatMessage     { game_loop, .. } |
            ReplayEvents::Other           { game_loop, .. } => Some(*game_loop),
            ReplayEvents::Error { .. } => None,
        }
    }

    /// Real time elapsed until this event -- see [GameTime]
    pub fn game_time(&self) -> GameTime {
        GameTime::from_game_loop(self.game_loop().unwrap_or(0))
    }

    /// The identity of the unit this event is about, if any
    pub fn key(&self) -> Option<EntityKey> {
        match self {
            ReplayEvents::UnitBorn { unit, .. } |
            ReplayEvents::UnitInit { unit, .. } => Some(unit.key),
            ReplayEvents::UnitDone        { key, .. } |
            ReplayEvents::UnitDied        { key, .. } |
            ReplayEvents::UnitOwnerChange { key, .. } |
            ReplayEvents::UnitTypeChange  { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// The identity of the unit that caused this death, if informed
    pub fn killer_key(&self) -> Option<EntityKey> {
        match self {
            ReplayEvents::UnitDied { killer_key, .. } => *killer_key,
            _ => None,
        }
    }

    /// Returns the unit type name if any
    pub fn unit(&self) -> Option<&str> {
        match self {
            ReplayEvents::UnitBorn { unit, .. } |
            ReplayEvents::UnitInit { unit, .. } => Some(&unit.unit_type_name),
            ReplayEvents::UnitTypeChange { unit_type_name, .. } => Some(unit_type_name),
            _ => None,
        }
    }

    /// The spawn data of birth & initialization events
    pub fn spawn(&self) -> Option<&UnitSpawn> {
        match self {
            ReplayEvents::UnitBorn { unit, .. } |
            ReplayEvents::UnitInit { unit, .. } => Some(unit),
            _ => None,
        }
    }

    /// The board tile the event happened at -- see [board_position()].\
    /// `None` if the event doesn't carry both coordinates
    pub fn position(&self) -> Option<i32> {
        let location = match self {
            ReplayEvents::UnitBorn { unit, .. } |
            ReplayEvents::UnitInit { unit, .. } => unit.location,
            ReplayEvents::UnitDied { location, .. } => *location,
            _ => None,
        };
        location.map(|MapPoint { x, y }| board_position(x, y))
    }

    /// Tells if this event is about a unit of type `unit_type_name`
    pub fn matches_unit(&self, unit_type_name: &str) -> bool {
        match self {
            ReplayEvents::UnitTypeChange { unit_type_name: new_type_name, .. } => new_type_name == unit_type_name,
            _ => self.spawn().is_some_and(|unit| unit.matches_unit(unit_type_name)),
        }
    }

}
