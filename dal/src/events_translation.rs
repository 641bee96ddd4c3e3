//! Contains utilities for translating the outputs of the `sc2-replay-events` library
//! into our closed model for the events & info we care about

use common::types::Result;
use model::replay_events::{EntityKey, MapPoint, ReplayEvents, UnitSpawn};
use sc2_replay_events::model::{event_names, RawEvent, Value};
use futures::{Stream, StreamExt};


/// Receives a `Stream` of the raw events produced by the `sc2-replay-events` library and
/// translates them into another `Stream` of our [model::replay_events::ReplayEvents].\
/// Errors (either from the source or from the translation) become [ReplayEvents::Error]s,
/// numbered after their 1-based position in the source.
pub fn translate_replay_events(lib_events: impl Stream<Item=Result<RawEvent>>) -> impl Stream<Item=ReplayEvents> {
    let mut event_id = 0;
    lib_events
        .map(move |event_result| {
            event_id += 1;
            match event_result {
                Ok(raw_event) => translate_raw_event(event_id, &raw_event),
                Err(err) => ReplayEvents::Error { event_id, err },
            }
        })
}

/// Translates a single decoded event. Kinds we don't model become [ReplayEvents::Other]
pub fn translate_raw_event(event_id: u32, raw_event: &RawEvent) -> ReplayEvents {
    let game_loop = raw_event.game_loop();
    let translation = match raw_event.name() {
        event_names::UNIT_BORN => unit_spawn(raw_event)
            .map(|unit| ReplayEvents::UnitBorn { game_loop, unit }),
        event_names::UNIT_INIT => unit_spawn(raw_event)
            .map(|unit| ReplayEvents::UnitInit { game_loop, unit }),
        event_names::UNIT_DONE => entity_key(raw_event, "m_unitTagIndex", "m_unitTagRecycle")
            .map(|key| ReplayEvents::UnitDone { game_loop, key }),
        event_names::UNIT_DIED => unit_died(game_loop, raw_event),
        event_names::UPGRADE => upgrade(game_loop, raw_event),
        event_names::PLAYER_SETUP => player_setup(game_loop, raw_event),
        event_names::PLAYER_STATS => required_u32(raw_event, "m_playerId")
            .map(|player_id| ReplayEvents::PlayerStats { game_loop, player_id }),
        event_names::UNIT_OWNER_CHANGE => unit_owner_change(game_loop, raw_event),
        event_names::UNIT_TYPE_CHANGE => entity_key(raw_event, "m_unitTagIndex", "m_unitTagRecycle")
            .and_then(|key| required_text(raw_event, "m_unitTypeName")
                .map(|unit_type_name| ReplayEvents::UnitTypeChange { game_loop, key, unit_type_name })),
        event_names::SYNC_LOADING_TIME => required_u64(raw_event, "m_syncTime")
            .map(|sync_time| ReplayEvents::SyncLoadingTime { game_loop, sync_time }),
        event_names::CHAT_MESSAGE => chat_message(game_loop, raw_event),
        name => Ok(ReplayEvents::Other { game_loop, name: name.to_string() }),
    };
    translation.unwrap_or_else(|translation_err| ReplayEvents::Error {
        event_id,
        err: Box::from(format!("`TranslationError` for event #{event_id} '{}': {translation_err:?}", raw_event.name())),
    })
}

/// Problems found when a raw event lacks what its kind must carry
#[derive(Debug, PartialEq)]
pub enum TranslationError {
    AbsentKey { key_name: &'static str },
    UnparseableNumber { key_name: &'static str, observed_data: String },
    UnparseableText { key_name: &'static str },
}


fn unit_spawn(raw_event: &RawEvent) -> std::result::Result<UnitSpawn, TranslationError> {
    Ok(UnitSpawn {
        key: entity_key(raw_event, "m_unitTagIndex", "m_unitTagRecycle")?,
        unit_type_name: required_text(raw_event, "m_unitTypeName")?,
        control_player_id: required_u32(raw_event, "m_controlPlayerId")?,
        upkeep_player_id: optional_u32(raw_event, "m_upkeepPlayerId")?.unwrap_or(0),
        location: location(raw_event),
    })
}

fn unit_died(game_loop: u32, raw_event: &RawEvent) -> std::result::Result<ReplayEvents, TranslationError> {
    let key = entity_key(raw_event, "m_unitTagIndex", "m_unitTagRecycle")?;
    let killer_player_id = optional_u32(raw_event, "m_killerPlayerId")?;
    let killer_key = match optional_u32(raw_event, "m_killerUnitTagIndex")? {
        Some(tag_index) => optional_u32(raw_event, "m_killerUnitTagRecycle")?
            .map(|tag_recycle| EntityKey::new(tag_index, tag_recycle)),
        None => None,
    };
    Ok(ReplayEvents::UnitDied { game_loop, key, killer_player_id, killer_key, location: location(raw_event) })
}

fn upgrade(game_loop: u32, raw_event: &RawEvent) -> std::result::Result<ReplayEvents, TranslationError> {
    let player_id = required_u32(raw_event, "m_playerId")?;
    let upgrade_type_name = required_text(raw_event, "m_upgradeTypeName")?;
    let count = match raw_event.get("m_count") {
        None | Some(Value::Null) => 1,
        Some(value) => value.as_int()
            .and_then(|count| i32::try_from(count).ok())
            .ok_or_else(|| TranslationError::UnparseableNumber { key_name: "m_count", observed_data: format!("{value:?}") })?,
    };
    Ok(ReplayEvents::Upgrade { game_loop, player_id, upgrade_type_name, count })
}

fn player_setup(game_loop: u32, raw_event: &RawEvent) -> std::result::Result<ReplayEvents, TranslationError> {
    Ok(ReplayEvents::PlayerSetup {
        game_loop,
        player_id: required_u32(raw_event, "m_playerId")?,
        user_id: optional_u32(raw_event, "m_userId")?,
        slot_id: optional_u32(raw_event, "m_slotId")?,
    })
}

fn unit_owner_change(game_loop: u32, raw_event: &RawEvent) -> std::result::Result<ReplayEvents, TranslationError> {
    Ok(ReplayEvents::UnitOwnerChange {
        game_loop,
        key: entity_key(raw_event, "m_unitTagIndex", "m_unitTagRecycle")?,
        control_player_id: required_u32(raw_event, "m_controlPlayerId")?,
        upkeep_player_id: optional_u32(raw_event, "m_upkeepPlayerId")?.unwrap_or(0),
    })
}

/// Chat messages inform their sender as `_userid: {m_userId: n}`
fn chat_message(game_loop: u32, raw_event: &RawEvent) -> std::result::Result<ReplayEvents, TranslationError> {
    let user_id = raw_event.get("_userid")
        .and_then(Value::as_map)
        .and_then(|user| user.get("m_userId"))
        .and_then(Value::as_int)
        .and_then(|user_id| u32::try_from(user_id).ok());
    let message = required_text(raw_event, "m_string")?;
    Ok(ReplayEvents::ChatMessage { game_loop, user_id, message })
}

fn entity_key(raw_event: &RawEvent, index_key: &'static str, recycle_key: &'static str) -> std::result::Result<EntityKey, TranslationError> {
    Ok(EntityKey::new(required_u32(raw_event, index_key)?, required_u32(raw_event, recycle_key)?))
}

/// Both coordinates must be present for a location to exist
fn location(raw_event: &RawEvent) -> Option<MapPoint> {
    raw_event.f64("m_x")
        .zip(raw_event.f64("m_y"))
        .map(|(x, y)| MapPoint { x, y })
}

fn required_u32(raw_event: &RawEvent, key_name: &'static str) -> std::result::Result<u32, TranslationError> {
    optional_u32(raw_event, key_name)?
        .ok_or(TranslationError::AbsentKey { key_name })
}

/// `None` when the key is absent or null
fn optional_u32(raw_event: &RawEvent, key_name: &'static str) -> std::result::Result<Option<u32>, TranslationError> {
    match raw_event.get(key_name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_int()
            .and_then(|number| u32::try_from(number).ok())
            .map(Some)
            .ok_or_else(|| TranslationError::UnparseableNumber { key_name, observed_data: format!("{value:?}") }),
    }
}

fn required_u64(raw_event: &RawEvent, key_name: &'static str) -> std::result::Result<u64, TranslationError> {
    match raw_event.get(key_name) {
        None | Some(Value::Null) => Err(TranslationError::AbsentKey { key_name }),
        Some(value) => value.as_int()
            .and_then(|number| u64::try_from(number).ok())
            .ok_or_else(|| TranslationError::UnparseableNumber { key_name, observed_data: format!("{value:?}") }),
    }
}

fn required_text(raw_event: &RawEvent, key_name: &'static str) -> std::result::Result<String, TranslationError> {
    match raw_event.get(key_name) {
        None | Some(Value::Null) => Err(TranslationError::AbsentKey { key_name }),
        Some(value) => value.as_text()
            .map(str::to_string)
            .ok_or(TranslationError::UnparseableText { key_name }),
    }
}
