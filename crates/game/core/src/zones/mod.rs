//! Zone graph navigation.
//!
//! The graph itself is data ([`ZoneTable`]); this module answers which moves
//! it allows from the current state, performs arrivals, and projects the set
//! of cards a presentation layer should show.

use std::collections::BTreeSet;

use crate::config::{GameConfig, ZoneTable};
use crate::event::GameEvent;
use crate::state::{CardId, GameState, ZoneId};

/// How a validated trip is made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Follow a location card.
    Walk,
    /// Ride from the bus stop; `fare` is `None` for the free return trip.
    Bus { fare: Option<i64> },
}

/// Street the player reached the bus stop from.
///
/// The previous location if it is a street, else the current zone if it is a
/// street, else the configured fallback street.
pub fn bus_origin(state: &GameState, zones: &ZoneTable) -> ZoneId {
    state
        .zone
        .previous
        .filter(|zone| zones.is_street(*zone))
        .or_else(|| Some(state.zone.current).filter(|zone| zones.is_street(*zone)))
        .unwrap_or(zones.fallback_street)
}

/// Route cards offered at the bus stop, one per registered street.
pub fn bus_routes(state: &GameState, zones: &ZoneTable) -> Vec<CardId> {
    let origin = bus_origin(state, zones);
    zones
        .streets
        .iter()
        .map(|street| CardId::BusRoute {
            to: street.zone,
            fare: street.zone != origin,
        })
        .collect()
}

/// Cards the presentation layer should show for `state`.
///
/// Nothing is offered while a living enemy is in the arena. The engine never
/// calls this; it exists for clients.
pub fn visible_cards(state: &GameState, config: &GameConfig) -> BTreeSet<CardId> {
    if state.enemies.any_alive() {
        return BTreeSet::new();
    }
    let zones = &config.zones;
    let mut cards: BTreeSet<CardId> = zones.cards_for(state.zone.current).iter().copied().collect();
    if state.zone.current == ZoneId::BusStop {
        cards.extend(bus_routes(state, zones));
    }
    cards
}

/// Resolves how the player may reach `destination` from the current zone.
pub fn route_to(state: &GameState, config: &GameConfig, destination: ZoneId) -> Option<Route> {
    let zones = &config.zones;
    if destination == ZoneId::Battle || destination == state.zone.current {
        return None;
    }
    if state.zone.current == ZoneId::BusStop && zones.is_street(destination) {
        let fare = (destination != bus_origin(state, zones)).then_some(config.prices.bus_fare);
        return Some(Route::Bus { fare });
    }
    zones
        .offers(state.zone.current, CardId::Location(destination))
        .then_some(Route::Walk)
}

/// Records where the player is leaving from before a trip.
///
/// Walking to the bus stop only remembers the origin when leaving a street,
/// so a detour through the bus stop keeps the original street as origin.
pub fn record_departure(state: &mut GameState, zones: &ZoneTable, destination: ZoneId) {
    let current = state.zone.current;
    if destination == ZoneId::BusStop {
        if zones.is_street(current) {
            state.zone.previous = Some(current);
        }
    } else {
        state.zone.previous = Some(current);
    }
}

/// Moves the player into `zone` and starts the card-settling window.
pub fn arrive(state: &mut GameState, config: &GameConfig, zone: ZoneId) -> GameEvent {
    let zones = &config.zones;
    state.zone.current = zone;
    state.zone.street = zones.is_street(zone).then_some(zone);
    state.zone.settling = true;
    GameEvent::LocationChanged {
        zone,
        allowed_cards: zones.cards_for(zone).to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EnemyArchetype;

    fn at(zone: ZoneId) -> GameState {
        let mut state = GameState::default();
        state.zone.current = zone;
        state
    }

    #[test]
    fn bus_origin_prefers_previous_street() {
        let zones = ZoneTable::default();
        let mut state = at(ZoneId::BusStop);
        assert_eq!(bus_origin(&state, &zones), ZoneId::Streets);

        state.zone.previous = Some(ZoneId::MainStreet);
        assert_eq!(bus_origin(&state, &zones), ZoneId::MainStreet);

        state.zone.previous = Some(ZoneId::Hospital);
        assert_eq!(bus_origin(&state, &zones), ZoneId::Streets);
    }

    #[test]
    fn bus_stop_offers_free_return_and_paid_routes() {
        let config = GameConfig::default();
        let mut state = at(ZoneId::BusStop);
        state.zone.previous = Some(ZoneId::MainStreet);

        let cards = visible_cards(&state, &config);
        assert!(cards.contains(&CardId::BusRoute {
            to: ZoneId::MainStreet,
            fare: false
        }));
        assert!(cards.contains(&CardId::BusRoute {
            to: ZoneId::Streets,
            fare: true
        }));
        assert_eq!(
            route_to(&state, &config, ZoneId::Streets),
            Some(Route::Bus { fare: Some(10) })
        );
        assert_eq!(
            route_to(&state, &config, ZoneId::MainStreet),
            Some(Route::Bus { fare: None })
        );
    }

    #[test]
    fn walking_follows_zone_rules() {
        let config = GameConfig::default();
        let state = at(ZoneId::Streets);
        assert_eq!(route_to(&state, &config, ZoneId::CyberMarket), Some(Route::Walk));
        assert_eq!(route_to(&state, &config, ZoneId::MainStreet), None);
        assert_eq!(route_to(&state, &config, ZoneId::Battle), None);
    }

    #[test]
    fn living_enemies_hide_every_card() {
        let config = GameConfig::default();
        let mut state = at(ZoneId::Hospital);
        state.begin_battle(EnemyArchetype::Club);
        state.enemies.spawn(EnemyArchetype::Club, 100);
        assert!(visible_cards(&state, &config).is_empty());
    }

    #[test]
    fn departure_to_bus_stop_only_remembers_streets() {
        let zones = ZoneTable::default();
        let mut state = at(ZoneId::Hospital);
        record_departure(&mut state, &zones, ZoneId::BusStop);
        assert_eq!(state.zone.previous, None);

        state.zone.current = ZoneId::MainStreet;
        record_departure(&mut state, &zones, ZoneId::BusStop);
        assert_eq!(state.zone.previous, Some(ZoneId::MainStreet));

        record_departure(&mut state, &zones, ZoneId::MainStreetMarket);
        assert_eq!(state.zone.previous, Some(ZoneId::MainStreet));
    }

    #[test]
    fn arrival_sets_street_and_settling() {
        let config = GameConfig::default();
        let mut state = at(ZoneId::BusStop);
        let event = arrive(&mut state, &config, ZoneId::MainStreet);
        assert_eq!(state.zone.street, Some(ZoneId::MainStreet));
        assert!(state.zone.settling);
        assert!(matches!(event, GameEvent::LocationChanged { zone: ZoneId::MainStreet, .. }));
    }
}
