//! Text rendering for engine events and the status screen.
//!
//! Every function here is a pure projection of events or state into lines
//! of text; the app decides when to print them.

use game_core::config::ZoneTable;
use game_core::{
    BattlePhase, CardId, Combatant, GameConfig, GameEvent, GameState, InventoryOwner, ItemKind,
    Stat, visible_cards,
};
use runtime::{Rejected, SessionEvent};

/// One line describing `event`, or `None` for events the player need not see.
pub fn describe(event: &GameEvent, zones: &ZoneTable) -> Option<String> {
    let line = match event {
        GameEvent::DamageDealt {
            target: Combatant::Player,
            amount,
            blocked,
        } if *blocked > 0.0 => {
            format!("You take {amount:.1} damage ({blocked:.1} blocked).")
        }
        GameEvent::DamageDealt {
            target: Combatant::Player,
            amount,
            ..
        } => format!("You take {amount:.1} damage."),
        GameEvent::DamageDealt {
            target: Combatant::Enemy(id),
            amount,
            ..
        } => format!("You hit {id} for {amount:.0}."),
        GameEvent::EnemyDefeated { id } => format!("{id} goes down."),
        GameEvent::EncounterStarted {
            enemies,
            archetype,
            ..
        } => {
            let plural = if *enemies == 1 { "" } else { "s" };
            format!("Ambush! {enemies} {archetype} punk{plural} block your way.")
        }
        GameEvent::BattleEnded { outcome, loot } => match outcome {
            BattlePhase::Victory if loot.is_empty() => "You win the fight.".to_owned(),
            BattlePhase::Victory => format!(
                "You win the fight and pick up {} bat(s) and {} sword(s).",
                loot.bats, loot.swords
            ),
            BattlePhase::Defeat => "You black out.".to_owned(),
            BattlePhase::Fled => "You get away.".to_owned(),
            BattlePhase::Active => return None,
        },
        GameEvent::LocationChanged { zone, .. } => {
            format!("You arrive at {}.", zones.display_name(*zone))
        }
        GameEvent::CardsSettled { .. } => return None,
        GameEvent::LevelUp { stat, new_value } => match stat {
            Stat::MaxHp => format!("Max HP is now {new_value:.0}."),
            other => format!("Your {other} improves to {new_value:.2}."),
        },
        GameEvent::CreditsChanged { value } => format!("Credits: {value}"),
        GameEvent::InventoryChanged {
            owner: InventoryOwner::Player,
            item,
            count,
        } => format!("You now carry {count} x {}.", item_name(*item)),
        GameEvent::InventoryChanged {
            owner: InventoryOwner::Merchant,
            ..
        } => return None,
        GameEvent::EquipmentChanged { weapon, equipped } => {
            let verb = if *equipped { "equip" } else { "put away" };
            format!("You {verb} the {}.", item_name(weapon.item()))
        }
        GameEvent::Healed { hp, max_hp, .. } => format!("HP {hp:.0}/{max_hp:.0}"),
        GameEvent::Confiscated { credits, items } => {
            let mut taken: Vec<String> = items
                .held()
                .map(|(item, count)| format!("{count} x {}", item_name(item)))
                .collect();
            if *credits > 0 {
                taken.insert(0, format!("{credits} credits"));
            }
            if taken.is_empty() {
                "The punks find nothing worth taking.".to_owned()
            } else {
                format!("The punks take {}.", taken.join(", "))
            }
        }
        GameEvent::Revived { debt } => {
            format!("You wake up in the hospital. The bill leaves you at {debt} credits.")
        }
        GameEvent::IntroductionCompleted => {
            "You wake up in a hospital bed. The doctor patched you up; the bill is on you."
                .to_owned()
        }
    };
    Some(line)
}

pub fn describe_rejection(rejected: &Rejected) -> String {
    format!("Can't do that: {}.", rejected.reason)
}

pub fn describe_session(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::Started { resumed: true, degraded, .. } if !degraded.is_empty() => Some(
            format!("Save loaded; reset damaged fields: {}.", degraded.join(", ")),
        ),
        SessionEvent::Started { resumed: true, .. } => Some("Save loaded.".to_owned()),
        SessionEvent::Started { resumed: false, .. } => Some("A new game begins.".to_owned()),
        SessionEvent::SaveFailed { error } => Some(format!("Warning: could not save ({error}).")),
        SessionEvent::ConfigReloaded => Some("Game content reloaded.".to_owned()),
        SessionEvent::Saved { .. } => None,
    }
}

fn item_name(item: ItemKind) -> &'static str {
    match item {
        ItemKind::Bat => "bat",
        ItemKind::Sword => "sword",
        ItemKind::StimPack => "stim pack",
    }
}

/// The command that plays `card`.
fn card_hint(card: CardId, zones: &ZoneTable) -> String {
    match card {
        CardId::Location(zone) => format!("go {:<20} {}", zone.as_str(), zones.display_name(zone)),
        CardId::Doctor => "heal                    doctor".to_owned(),
        CardId::Merchant => "buy / sell              merchant".to_owned(),
        CardId::BusRoute { to, fare: true } => {
            format!("bus {:<19} {}", to.as_str(), zones.display_name(to))
        }
        CardId::BusRoute { to, fare: false } => {
            format!("go {:<20} {} (walk back)", to.as_str(), zones.display_name(to))
        }
    }
}

/// Where the player is, who is fighting, and what can be done next.
pub fn render_look(state: &GameState, config: &GameConfig) -> Vec<String> {
    let zones = &config.zones;
    let mut lines = vec![format!("== {} ==", zones.display_name(state.zone.current))];

    let living: Vec<String> = state
        .enemies
        .living()
        .map(|enemy| {
            format!(
                "{} {} ({}/{} hp)",
                enemy.id, enemy.archetype, enemy.hp, enemy.max_hp
            )
        })
        .collect();
    if !living.is_empty() {
        lines.push(format!("Enemies: {}", living.join(", ")));
        lines.push("attack [enemy] | shoot [enemy] | flee".to_owned());
        return lines;
    }
    if state.zone.settling {
        lines.push("(looking around...)".to_owned());
        return lines;
    }

    let cards = visible_cards(state, config);
    if cards.is_empty() {
        lines.push("Nothing to do here right now.".to_owned());
    }
    lines.extend(cards.into_iter().map(|card| format!("  {}", card_hint(card, zones))));
    lines
}

pub fn render_status(state: &GameState, config: &GameConfig) -> Vec<String> {
    let player = &state.player;
    let mut lines = vec![
        format!("HP {:.0}/{:.0}   Credits {}", player.hp, player.max_hp, player.credits),
        format!(
            "Strength {:.2}   Defense {:.3}   Ranged {:.2}",
            player.strength, player.defense, player.ranged
        ),
        format!(
            "Healing banked {:.0}/{:.0} toward the next max HP",
            player.total_hp_healed, player.next_level_threshold
        ),
    ];

    let carried: Vec<String> = state
        .player_inventory
        .held()
        .map(|(item, count)| {
            let equipped = item
                .weapon()
                .is_some_and(|weapon| state.equipped.is_equipped(weapon));
            let marker = if equipped { " (equipped)" } else { "" };
            format!("{count} x {}{marker}", item_name(item))
        })
        .collect();
    lines.push(if carried.is_empty() {
        "Carrying nothing.".to_owned()
    } else {
        format!("Carrying: {}", carried.join(", "))
    });

    if config.zones.offers(state.zone.current, CardId::Merchant) {
        let stock: Vec<String> = ItemKind::ALL
            .iter()
            .filter_map(|&item| {
                let price = config.prices.buy.get(item)?;
                let count = state.merchant_inventory.count(item);
                Some(format!("{} {price}cr ({count} left)", item_name(item)))
            })
            .collect();
        lines.push(format!("For sale: {}", stock.join(", ")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EnemyId, Loot, ZoneId};

    #[test]
    fn victory_lists_the_loot() {
        let zones = ZoneTable::default();
        let line = describe(
            &GameEvent::BattleEnded {
                outcome: BattlePhase::Victory,
                loot: Loot { bats: 2, swords: 1 },
            },
            &zones,
        );
        assert_eq!(
            line.as_deref(),
            Some("You win the fight and pick up 2 bat(s) and 1 sword(s).")
        );
    }

    #[test]
    fn merchant_stock_changes_are_silent() {
        let zones = ZoneTable::default();
        let event = GameEvent::InventoryChanged {
            owner: InventoryOwner::Merchant,
            item: ItemKind::StimPack,
            count: 9,
        };
        assert_eq!(describe(&event, &zones), None);
        assert_eq!(
            describe(&GameEvent::EnemyDefeated { id: EnemyId(2) }, &zones).as_deref(),
            Some("enemy2 goes down.")
        );
    }

    #[test]
    fn look_in_the_hospital_offers_the_doctor() {
        let config = GameConfig::default();
        let state = GameState::default();
        let lines = render_look(&state, &config);
        assert_eq!(lines[0], "== Hospital ==");
        assert!(lines.iter().any(|line| line.contains("doctor")));
        assert!(lines.iter().any(|line| line.contains("go streets")));
    }

    #[test]
    fn look_during_a_fight_lists_enemies_only() {
        let config = GameConfig::default();
        let mut state = GameState::default();
        state.zone.current = ZoneId::Battle;
        state.begin_battle(game_core::EnemyArchetype::Club);
        state.enemies.spawn(game_core::EnemyArchetype::Club, 100);
        let lines = render_look(&state, &config);
        assert!(lines[1].starts_with("Enemies: enemy1 club"));
        assert!(!lines.iter().any(|line| line.contains("doctor")));
    }
}
