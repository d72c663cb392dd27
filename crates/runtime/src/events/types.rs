use serde::Serialize;

use game_core::{GameError, Intent, Rejection, TransitionPhase};

/// An intent the engine refused. The state did not change.
#[derive(Debug, Clone, Serialize)]
pub struct Rejected {
    pub intent: Intent,
    pub phase: TransitionPhase,
    pub code: &'static str,
    pub reason: String,
}

impl Rejected {
    pub fn new(intent: Intent, rejection: &Rejection) -> Self {
        Self {
            intent,
            phase: rejection.phase,
            code: rejection.error_code(),
            reason: rejection.error.to_string(),
        }
    }
}

/// Lifecycle of the running game, outside the rules themselves.
#[derive(Debug, Clone, Serialize)]
pub enum SessionEvent {
    /// A game is live, either fresh or loaded from a snapshot.
    Started {
        resumed: bool,
        nonce: u64,
        /// Snapshot fields that failed to decode and were reset.
        degraded: Vec<&'static str>,
    },
    Saved {
        nonce: u64,
    },
    SaveFailed {
        error: String,
    },
    ConfigReloaded,
}
