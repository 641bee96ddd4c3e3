//! Translates the decoder's metadata dump into our [ReplayMetadata]

use std::collections::HashMap;
use model::players::{Player, Team};
use model::replay_metadata::ReplayMetadata;
use sc2_replay_events::metadata::{PlayerDetails, ReplayMetadataDump};
use regex::Regex;
use once_cell::sync::Lazy;


/// Attribute scope applying to the whole lobby, rather than to a single slot
const GLOBAL_SCOPE: u32 = 16;
const GAME_MODE_ATTRIBUTE_ID: u32 = 6;
const CREEP_ATTRIBUTE_ID: u32 = 2;

/// Clan tags come escaped & separated from the name by a `<sp/>` marker
static CLAN_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"&lt;.*<sp/>"#)
        .expect("CLAN_TAG_REGEX compilation failed")
});


pub fn translate_metadata(dump: ReplayMetadataDump) -> ReplayMetadata {
    let user_ids_by_slot: HashMap<u32, u32> = dump.init_data.sync_lobby_state.lobby_state.slots.iter()
        .filter_map(|slot| slot.working_set_slot_id.zip(slot.user_id))
        .collect();
    let players = dump.details.player_list.iter()
        .map(|player_details| translate_player(player_details, &user_ids_by_slot))
        .collect();
    ReplayMetadata {
        title: dump.game_metadata.title,
        players,
        game_mode_attribute: dump.attributes.value(GLOBAL_SCOPE, GAME_MODE_ATTRIBUTE_ID).map(str::to_string),
        creep_attribute: dump.attributes.value(GLOBAL_SCOPE, CREEP_ATTRIBUTE_ID).map(str::to_string),
    }
}

fn translate_player(player_details: &PlayerDetails, user_ids_by_slot: &HashMap<u32, u32>) -> Player {
    let toon = &player_details.toon;
    Player {
        handle: format!("{}-S2-{}-{}", toon.region, toon.realm, toon.id),
        name: clean_player_name(&player_details.name),
        team: Team::from_team_id(player_details.team_id),
        user_id: player_details.working_set_slot_id
            .and_then(|slot_id| user_ids_by_slot.get(&slot_id))
            .copied(),
        player_id: None,
        color: (player_details.color.r, player_details.color.g, player_details.color.b),
        won: false,
    }
}

/// Strips the clan tag markup off a player's name
pub fn clean_player_name(name: &str) -> String {
    CLAN_TAG_REGEX.replace_all(name, "").into_owned()
}
