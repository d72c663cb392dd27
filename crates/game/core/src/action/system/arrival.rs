//! Arrival settling.
//!
//! Entering a zone opens a short window in which its cards are shown but not
//! yet usable. The window closes when the queued `SettleArrival` fires.

use crate::action::{Outcome, SystemTask};
use crate::config::GameConfig;
use crate::event::GameEvent;
use crate::state::{GameState, ZoneId};
use crate::zones;

/// Moves the player into `zone` and queues the end of the arrival window.
pub(crate) fn arrive_and_settle(
    state: &mut GameState,
    config: &GameConfig,
    zone: ZoneId,
    out: &mut Outcome,
) {
    out.push(zones::arrive(state, config, zone));
    out.schedule(config.timings.settle_ms, SystemTask::SettleArrival { zone });
}

pub(super) fn settle(state: &mut GameState, zone: ZoneId) -> Outcome {
    let mut out = Outcome::new();
    // A later arrival owns the window now.
    if state.zone.current != zone || !state.zone.settling {
        return out;
    }
    state.zone.settling = false;
    out.push(GameEvent::CardsSettled { zone });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_only_closes_the_matching_window() {
        let config = GameConfig::default();
        let mut state = GameState::default();
        let mut out = Outcome::new();
        arrive_and_settle(&mut state, &config, ZoneId::Streets, &mut out);
        arrive_and_settle(&mut state, &config, ZoneId::CyberMarket, &mut out);

        assert!(settle(&mut state, ZoneId::Streets).is_empty());
        assert!(state.zone.settling);

        let settled = settle(&mut state, ZoneId::CyberMarket);
        assert_eq!(settled.events, vec![GameEvent::CardsSettled {
            zone: ZoneId::CyberMarket
        }]);
        assert!(!state.zone.settling);
    }
}
