//! Field-by-field snapshot decoding.
//!
//! A save written by an older build, or edited by hand, should cost the
//! player at most the fields that no longer parse. Each top-level field is
//! decoded on its own and falls back to the value from a fresh game.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use super::GameState;

/// Result of a lenient snapshot decode.
#[derive(Clone, Debug)]
pub struct SnapshotLoad {
    pub state: GameState,
    /// Fields that were missing or malformed and fell back to defaults.
    pub degraded: Vec<&'static str>,
}

impl SnapshotLoad {
    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }
}

fn decode_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &'static str,
    slot: &mut T,
    degraded: &mut Vec<&'static str>,
) {
    let Some(value) = object.get(key) else {
        degraded.push(key);
        return;
    };
    match serde_json::from_value::<T>(value.clone()) {
        Ok(decoded) => *slot = decoded,
        Err(error) => {
            warn!(field = key, %error, "snapshot field malformed; using default");
            degraded.push(key);
        }
    }
}

/// Decodes `document` on top of `fallback`.
///
/// Returns `None` when the document is not a JSON object at all, which the
/// caller treats the same as having no snapshot.
pub fn load_lenient(document: &str, fallback: GameState) -> Option<SnapshotLoad> {
    let value: Value = match serde_json::from_str(document) {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "snapshot is not valid JSON; ignoring it");
            return None;
        }
    };
    let Value::Object(object) = value else {
        warn!("snapshot is not a JSON object; ignoring it");
        return None;
    };

    let mut state = fallback;
    let mut degraded = Vec::new();
    let d = &mut degraded;
    decode_field(&object, "game_seed", &mut state.game_seed, d);
    decode_field(&object, "nonce", &mut state.nonce, d);
    decode_field(&object, "player", &mut state.player, d);
    decode_field(&object, "player_inventory", &mut state.player_inventory, d);
    decode_field(&object, "merchant_inventory", &mut state.merchant_inventory, d);
    decode_field(&object, "equipped", &mut state.equipped, d);
    decode_field(&object, "zone", &mut state.zone, d);
    decode_field(&object, "counters", &mut state.counters, d);
    decode_field(&object, "enemies", &mut state.enemies, d);
    decode_field(&object, "battle", &mut state.battle, d);
    decode_field(&object, "next_battle_serial", &mut state.next_battle_serial, d);
    decode_field(&object, "pending_revival", &mut state.pending_revival, d);

    state.normalize();
    Some(SnapshotLoad { state, degraded })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ItemKind, ZoneId};

    #[test]
    fn round_trips_a_clean_snapshot() {
        let mut state = GameState::default();
        state.player.credits = -30;
        state.player_inventory.add(ItemKind::Bat, 2);
        state.zone.current = ZoneId::CyberMarket;
        let json = serde_json::to_string(&state).expect("serialize");

        let loaded = load_lenient(&json, GameState::default()).expect("object");
        assert!(loaded.is_clean());
        assert_eq!(loaded.state, state);
    }

    #[test]
    fn malformed_fields_fall_back_individually() {
        let json = r#"{
            "player": "definitely not a player",
            "player_inventory": { "bat": 3, "sword": 0, "stimPack": 1 },
            "zone": { "current": "atlantis" }
        }"#;
        let loaded = load_lenient(json, GameState::default()).expect("object");

        assert_eq!(loaded.state.player, GameState::default().player);
        assert_eq!(loaded.state.player_inventory.bat, 3);
        assert_eq!(loaded.state.player_inventory.stim_pack, 1);
        assert_eq!(loaded.state.zone.current, ZoneId::Hospital);
        assert!(loaded.degraded.contains(&"player"));
        assert!(loaded.degraded.contains(&"zone"));
        assert!(!loaded.degraded.contains(&"player_inventory"));
    }

    #[test]
    fn non_object_documents_count_as_absent() {
        assert!(load_lenient("[1, 2, 3]", GameState::default()).is_none());
        assert!(load_lenient("not json", GameState::default()).is_none());
    }

    #[test]
    fn out_of_range_values_are_normalized() {
        let json = r#"{ "player": { "hp": 500.0, "max_hp": 100.0 } }"#;
        let loaded = load_lenient(json, GameState::default()).expect("object");
        assert_eq!(loaded.state.player.hp, 100.0);
    }
}
