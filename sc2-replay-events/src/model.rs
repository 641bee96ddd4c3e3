//! Resting place for [RawEvent], [Value] & friends

use std::collections::BTreeMap;


/// The attribute holding the event discriminator, as dumped by the decoder
pub const DISCRIMINATOR_KEY: &str = "_event";
/// The attribute holding the game loop counter at which the event happened
pub const GAME_LOOP_KEY: &str = "_gameloop";

/// Full names of the event kinds the decoder may emit.\
/// Tracker events come from `replay.tracker.events`; game events from `replay.game.events`.
pub mod event_names {
    pub const UNIT_BORN:          &str = "NNet.Replay.Tracker.SUnitBornEvent";
    pub const UNIT_INIT:          &str = "NNet.Replay.Tracker.SUnitInitEvent";
    pub const UNIT_DONE:          &str = "NNet.Replay.Tracker.SUnitDoneEvent";
    pub const UNIT_DIED:          &str = "NNet.Replay.Tracker.SUnitDiedEvent";
    pub const UPGRADE:            &str = "NNet.Replay.Tracker.SUpgradeEvent";
    pub const PLAYER_SETUP:       &str = "NNet.Replay.Tracker.SPlayerSetupEvent";
    pub const PLAYER_STATS:       &str = "NNet.Replay.Tracker.SPlayerStatsEvent";
    pub const UNIT_OWNER_CHANGE:  &str = "NNet.Replay.Tracker.SUnitOwnerChangeEvent";
    pub const UNIT_TYPE_CHANGE:   &str = "NNet.Replay.Tracker.SUnitTypeChangeEvent";
    pub const SYNC_LOADING_TIME:  &str = "NNet.Game.SSetSyncLoadingTimeEvent";
    pub const CHAT_MESSAGE:       &str = "NNet.Game.SChatMessage";
}

/// A single attribute value, as typed by the decoder
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Raw bytes -- never observed inside a [RawEvent], as they get normalized to [Value::Text] on construction
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {

    /// Converts any (possibly nested) [Value::Bytes] into [Value::Text]
    pub fn normalized(self) -> Self {
        match self {
            Value::Bytes(bytes) => Value::Text(String::from_utf8_lossy(&bytes).into_owned()),
            Value::List(list)   => Value::List(list.into_iter().map(Value::normalized).collect()),
            Value::Map(map)     => Value::Map(map.into_iter().map(|(key, value)| (key, value.normalized())).collect()),
            other => other,
        }
    }

    /// Integral view of this value. Floats are accepted only when they carry no fractional part
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n)   => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(number) => number.as_i64()
                .map(Value::Int)
                .unwrap_or_else(|| Value::Float(number.as_f64().unwrap_or(f64::NAN))),
            serde_json::Value::String(text) => Value::Text(text),
            serde_json::Value::Array(list) => Value::List(list.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Map(map.into_iter().map(|(key, value)| (key, Value::from(value))).collect()),
        }
    }
}

/// A decoded replay event: a discriminator ([Self::name()]) + the attributes that kind of event carries.\
/// Immutable once built -- binary attributes are normalized to text at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    name: String,
    attributes: BTreeMap<String, Value>,
}

impl RawEvent {

    pub fn new<IntoString: Into<String>>(name: IntoString, attributes: impl IntoIterator<Item=(String, Value)>) -> Self {
        Self {
            name: name.into(),
            attributes: attributes.into_iter()
                .map(|(key, value)| (key, value.normalized()))
                .collect(),
        }
    }

    /// The event discriminator, like `NNet.Replay.Tracker.SUnitBornEvent` -- see [event_names]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_text)
    }

    /// Compares the textual attribute at `key` against `expected`.\
    /// Unit names come either as text or as raw bytes, depending on the decoder: both compare the same,
    /// as bytes were normalized to text by [Self::new()]
    pub fn matches_text(&self, key: &str, expected: &str) -> bool {
        self.text(key) == Some(expected)
    }

    /// The game loop counter this event happened at -- 0 if the decoder didn't inform it
    pub fn game_loop(&self) -> u32 {
        self.int(GAME_LOOP_KEY)
            .and_then(|game_loop| u32::try_from(game_loop).ok())
            .unwrap_or(0)
    }

}
