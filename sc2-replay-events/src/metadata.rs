//! Resting place for [ReplayMetadataDump] & friends: the non-event records of a replay,
//! as the decoder dumps them -- field names follow the decoder's own naming

use std::collections::BTreeMap;
use serde::Deserialize;


/// Everything, besides the events, that the decoder extracts from a replay archive
#[derive(Debug, Deserialize)]
pub struct ReplayMetadataDump {
    /// from `replay.details`
    pub details: Details,
    /// from `replay.initData`
    pub init_data: InitData,
    /// from `replay.attributes.events`
    pub attributes: AttributeEvents,
    /// from `replay.gamemetadata.json`
    pub game_metadata: GameMetadata,
}

#[derive(Debug, Deserialize)]
pub struct Details {
    #[serde(rename = "m_playerList", default)]
    pub player_list: Vec<PlayerDetails>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerDetails {
    /// May carry clan tag markup, like `&lt;CLAN&gt;<sp/>Name`
    #[serde(rename = "m_name")]
    pub name: String,
    #[serde(rename = "m_toon")]
    pub toon: Toon,
    #[serde(rename = "m_color")]
    pub color: Color,
    #[serde(rename = "m_teamId")]
    pub team_id: u32,
    #[serde(rename = "m_workingSetSlotId", default)]
    pub working_set_slot_id: Option<u32>,
}

/// The Battle.net profile identity
#[derive(Debug, Deserialize)]
pub struct Toon {
    #[serde(rename = "m_region")]
    pub region: u32,
    #[serde(rename = "m_programId", default)]
    pub program_id: String,
    #[serde(rename = "m_realm")]
    pub realm: u32,
    #[serde(rename = "m_id")]
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct Color {
    #[serde(rename = "m_a", default)]
    pub a: u8,
    #[serde(rename = "m_r")]
    pub r: u8,
    #[serde(rename = "m_g")]
    pub g: u8,
    #[serde(rename = "m_b")]
    pub b: u8,
}

#[derive(Debug, Deserialize)]
pub struct InitData {
    #[serde(rename = "m_syncLobbyState")]
    pub sync_lobby_state: SyncLobbyState,
}

#[derive(Debug, Deserialize)]
pub struct SyncLobbyState {
    #[serde(rename = "m_lobbyState")]
    pub lobby_state: LobbyState,
}

#[derive(Debug, Deserialize)]
pub struct LobbyState {
    #[serde(rename = "m_slots", default)]
    pub slots: Vec<LobbySlot>,
}

#[derive(Debug, Deserialize)]
pub struct LobbySlot {
    #[serde(rename = "m_workingSetSlotId", default)]
    pub working_set_slot_id: Option<u32>,
    #[serde(rename = "m_userId", default)]
    pub user_id: Option<u32>,
}

/// Game attributes, grouped by scope (the lobby slot they apply to -- 16 being the "global" scope) and by attribute id
#[derive(Debug, Deserialize)]
pub struct AttributeEvents {
    #[serde(default)]
    pub scopes: BTreeMap<u32, BTreeMap<u32, Vec<AttributeValue>>>,
}

impl AttributeEvents {

    /// The first value set for `attribute_id` within `scope`, if any
    pub fn value(&self, scope: u32, attribute_id: u32) -> Option<&str> {
        self.scopes.get(&scope)
            .and_then(|attributes| attributes.get(&attribute_id))
            .and_then(|values| values.first())
            .map(|attribute| attribute.value.as_str())
    }

}

#[derive(Debug, Deserialize)]
pub struct AttributeValue {
    pub value: String,
    #[serde(default)]
    pub namespace: Option<u32>,
    #[serde(default)]
    pub attrid: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct GameMetadata {
    #[serde(rename = "Title")]
    pub title: String,
}


/// Unit tests for the [metadata](super) module
#[cfg(test)]
mod tests {
    use super::*;


    const METADATA_DUMP: &str = r#"{
        "details": {"m_playerList": [
            {"m_name": "&lt;SQD&gt;<sp/>Zeh", "m_toon": {"m_region": 2, "m_programId": "S2", "m_realm": 1, "m_id": 4242}, "m_color": {"m_a": 255, "m_r": 180, "m_g": 20, "m_b": 30}, "m_teamId": 0, "m_workingSetSlotId": 0}
        ]},
        "init_data": {"m_syncLobbyState": {"m_lobbyState": {"m_slots": [{"m_workingSetSlotId": 0, "m_userId": 3}, {"m_workingSetSlotId": null, "m_userId": null}]}}},
        "attributes": {"scopes": {"16": {"2": [{"value": "0002", "namespace": 999, "attrid": 2}], "6": [{"value": "0001"}]}}},
        "game_metadata": {"Title": "Squadron TD"}
    }"#;

    #[test]
    fn full_dump() {
        let dump: ReplayMetadataDump = serde_json::from_str(METADATA_DUMP).expect("metadata dump couldn't be parsed");
        assert_eq!(dump.game_metadata.title, "Squadron TD");
        assert_eq!(dump.details.player_list.len(), 1);
        assert_eq!(dump.details.player_list[0].toon.id, 4242);
        assert_eq!(dump.init_data.sync_lobby_state.lobby_state.slots[0].user_id, Some(3));
        assert_eq!(dump.init_data.sync_lobby_state.lobby_state.slots[1].working_set_slot_id, None);
        assert_eq!(dump.attributes.value(16, 6), Some("0001"));
        assert_eq!(dump.attributes.value(16, 2), Some("0002"));
        assert_eq!(dump.attributes.value(16, 3), None);
        assert_eq!(dump.attributes.value(1, 2), None);
    }

}
