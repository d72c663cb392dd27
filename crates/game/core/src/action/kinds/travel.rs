//! Travel intents: walking between zones and riding the bus.

use tracing::debug;

use crate::action::system::arrive_and_settle;
use crate::action::{IntentError, IntentTransition, Outcome};
use crate::encounter;
use crate::env::GameEnv;
use crate::event::GameEvent;
use crate::ledger;
use crate::state::{GameState, ZoneId};
use crate::zones::{self, Route};

/// Moves the player to `destination` along a card the current zone offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelIntent {
    pub destination: ZoneId,
}

impl TravelIntent {
    pub fn new(destination: ZoneId) -> Self {
        Self { destination }
    }
}

impl IntentTransition for TravelIntent {
    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), IntentError> {
        validate_trip(state, env, self.destination).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
        let route = validate_trip(state, env, self.destination)?;
        depart(state, env, self.destination, route)
    }
}

/// Boards the bus at the bus stop towards a street.
///
/// Same trip as [`TravelIntent`], but only valid from the bus stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayFareIntent {
    pub destination: ZoneId,
}

impl PayFareIntent {
    pub fn new(destination: ZoneId) -> Self {
        Self { destination }
    }

    fn route(&self, state: &GameState, env: &GameEnv<'_>) -> Result<Route, IntentError> {
        match validate_trip(state, env, self.destination)? {
            route @ Route::Bus { .. } => Ok(route),
            Route::Walk => Err(IntentError::InvalidDestination(self.destination)),
        }
    }
}

impl IntentTransition for PayFareIntent {
    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), IntentError> {
        self.route(state, env).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Outcome, IntentError> {
        let route = self.route(state, env)?;
        depart(state, env, self.destination, route)
    }
}

fn validate_trip(
    state: &GameState,
    env: &GameEnv<'_>,
    destination: ZoneId,
) -> Result<Route, IntentError> {
    if state.in_battle() || state.zone.current == ZoneId::Battle {
        return Err(IntentError::InBattle);
    }
    if state.player.is_down() {
        return Err(IntentError::PlayerDefeated);
    }
    if state.zone.settling {
        return Err(IntentError::TransitionInProgress);
    }
    let route = zones::route_to(state, env.config(), destination)
        .ok_or(IntentError::InvalidDestination(destination))?;
    if let Route::Bus { fare: Some(fare) } = route {
        if state.player.credits < fare {
            return Err(IntentError::InsufficientCredits {
                needed: fare,
                available: state.player.credits,
            });
        }
    }
    Ok(route)
}

/// Pays for the trip, records the origin, then either arrives or gets ambushed.
fn depart(
    state: &mut GameState,
    env: &GameEnv<'_>,
    destination: ZoneId,
    route: Route,
) -> Result<Outcome, IntentError> {
    let config = env.config();
    let mut out = Outcome::new();

    if let Route::Bus { fare: Some(fare) } = route {
        let credits = ledger::pay_fare(state, fare)?;
        out.push(GameEvent::CreditsChanged { value: credits });
    }
    zones::record_departure(state, &config.zones, destination);

    if let Some(ambush) = encounter::maybe_trigger_encounter(state, env, destination) {
        out.merge(ambush);
        return Ok(out);
    }
    arrive_and_settle(state, config, destination, &mut out);
    debug!(%destination, ?route, "arrived");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::ConstantRng;

    fn awake_at(zone: ZoneId) -> GameState {
        let mut state = GameState::default();
        state.player.hp = 100.0;
        state.zone.current = zone;
        state
    }

    fn quiet() -> GameConfig {
        GameConfig::default().with_encounter_chance(0.0)
    }

    #[test]
    fn walking_updates_previous_and_street() {
        let config = quiet();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = awake_at(ZoneId::Hospital);

        let intent = TravelIntent::new(ZoneId::Streets);
        intent.pre_validate(&state, &env).unwrap();
        let out = intent.apply(&mut state, &env).unwrap();

        assert_eq!(state.zone.current, ZoneId::Streets);
        assert_eq!(state.zone.street, Some(ZoneId::Streets));
        assert_eq!(state.zone.previous, Some(ZoneId::Hospital));
        assert!(state.zone.settling);
        assert_eq!(out.follow_ups.len(), 1);
    }

    #[test]
    fn settling_blocks_the_next_trip() {
        let config = quiet();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = awake_at(ZoneId::Streets);
        state.zone.settling = true;
        assert_eq!(
            TravelIntent::new(ZoneId::CyberMarket).pre_validate(&state, &env),
            Err(IntentError::TransitionInProgress)
        );
    }

    #[test]
    fn unaffordable_fare_aborts_the_trip() {
        let config = quiet();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = awake_at(ZoneId::BusStop);
        state.zone.previous = Some(ZoneId::Streets);
        state.player.credits = 5;

        assert_eq!(
            PayFareIntent::new(ZoneId::MainStreet).pre_validate(&state, &env),
            Err(IntentError::InsufficientCredits {
                needed: 10,
                available: 5
            })
        );
        // The ride home is free.
        PayFareIntent::new(ZoneId::Streets)
            .pre_validate(&state, &env)
            .unwrap();
    }

    #[test]
    fn paid_ride_charges_fare_and_arrives() {
        let config = quiet();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = awake_at(ZoneId::BusStop);
        state.zone.previous = Some(ZoneId::Streets);
        state.player.credits = 25;

        let out = TravelIntent::new(ZoneId::MainStreet)
            .apply(&mut state, &env)
            .unwrap();
        assert_eq!(state.player.credits, 15);
        assert_eq!(state.zone.current, ZoneId::MainStreet);
        assert_eq!(state.zone.previous, Some(ZoneId::BusStop));
        assert_eq!(out.events[0], GameEvent::CreditsChanged { value: 15 });
    }

    #[test]
    fn pay_fare_needs_the_bus_stop() {
        let config = quiet();
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let state = awake_at(ZoneId::Streets);
        assert_eq!(
            PayFareIntent::new(ZoneId::Hospital).pre_validate(&state, &env),
            Err(IntentError::InvalidDestination(ZoneId::Hospital))
        );
    }

    #[test]
    fn ambush_replaces_arrival() {
        let config = GameConfig::default().with_encounter_chance(1.0);
        let rng = ConstantRng(0);
        let env = GameEnv::new(&config, &rng);
        let mut state = awake_at(ZoneId::Streets);

        let out = TravelIntent::new(ZoneId::CyberMarket)
            .apply(&mut state, &env)
            .unwrap();
        assert_eq!(state.zone.current, ZoneId::Battle);
        assert_eq!(state.zone.pending_destination, Some(ZoneId::CyberMarket));
        assert!(out.follow_ups.is_empty());
        assert!(matches!(
            out.events[0],
            GameEvent::EncounterStarted { enemies: 1, .. }
        ));
    }
}
