//! The naming conventions the map uses for its units, as an ordered table of rules.
//!
//! Every rule is evaluated for each spawned unit and all matching roles are returned, in table order.
//! Rules flagged as `real_players_only` stop the evaluation when the unit is controlled by one of the
//! [RESERVED_PLAYER_IDS] -- towers & sends must belong to a human player.

/// The gas harvester players hire
pub const WORKER_UNIT: &str = "SquadronWorker";
/// Units spawned by the map to mark the beginning of a wave: `Wave1`, `Wave2`...
pub const WAVE_MARKER_PREFIX: &str = "Wave";
pub const BUILDER_SUFFIX: &str = "Builder";
pub const TOWER_PREFIX: &str = "f";
pub const SEND_PREFIX: &str = "Send_";

/// Controller ids used by the map itself: creeps, neutral & the environment
pub const RESERVED_PLAYER_IDS: [u32; 3] = [13, 14, 0];


/// What a spawned unit means for the match statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitRole {
    WaveMarker { wave: u32 },
    Worker,
    Builder,
    Tower,
    Send,
}

struct UnitRule {
    real_players_only: bool,
    role: fn(&str) -> Option<UnitRole>,
}

const UNIT_RULES: [UnitRule; 5] = [
    UnitRule { real_players_only: false, role: wave_marker },
    UnitRule { real_players_only: false, role: worker },
    UnitRule { real_players_only: false, role: builder },
    UnitRule { real_players_only: true,  role: tower },
    UnitRule { real_players_only: true,  role: send },
];


/// All roles of a unit of type `unit_type_name` controlled by `control_player_id`
pub fn classify_unit(unit_type_name: &str, control_player_id: u32) -> Vec<UnitRole> {
    let reserved_owner = is_reserved_player(control_player_id);
    UNIT_RULES.iter()
        .take_while(|rule| !(rule.real_players_only && reserved_owner))
        .filter_map(|rule| (rule.role)(unit_type_name))
        .collect()
}

pub fn is_reserved_player(player_id: u32) -> bool {
    RESERVED_PLAYER_IDS.contains(&player_id)
}

/// `Wave` followed by digits only
fn wave_marker(unit_type_name: &str) -> Option<UnitRole> {
    unit_type_name.strip_prefix(WAVE_MARKER_PREFIX)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .map(|wave| UnitRole::WaveMarker { wave })
}

fn worker(unit_type_name: &str) -> Option<UnitRole> {
    (unit_type_name == WORKER_UNIT).then_some(UnitRole::Worker)
}

fn builder(unit_type_name: &str) -> Option<UnitRole> {
    unit_type_name.ends_with(BUILDER_SUFFIX).then_some(UnitRole::Builder)
}

fn tower(unit_type_name: &str) -> Option<UnitRole> {
    unit_type_name.starts_with(TOWER_PREFIX).then_some(UnitRole::Tower)
}

fn send(unit_type_name: &str) -> Option<UnitRole> {
    unit_type_name.starts_with(SEND_PREFIX).then_some(UnitRole::Send)
}
