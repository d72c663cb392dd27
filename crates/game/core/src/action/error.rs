//! Intent rejection taxonomy.
//!
//! Every reason the engine can refuse an intent is a variant of
//! [`IntentError`]. Rejections are ordinary control flow: the state is left
//! exactly as it was before the intent and the caller decides how to show
//! the reason.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CardId, EnemyId, ItemKind, ZoneId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntentError {
    #[error("not enough credits: need {needed}, have {available}")]
    InsufficientCredits { needed: i64, available: i64 },

    #[error("the merchant is out of {0}")]
    OutOfStock(ItemKind),

    #[error("you have no {0} to sell")]
    NothingToSell(ItemKind),

    #[error("the merchant does not trade in {0}")]
    NotForSale(ItemKind),

    #[error("no enemy {0} in this battle")]
    InvalidTarget(EnemyId),

    #[error("{0} is already down")]
    TargetAlreadyDown(EnemyId),

    #[error("you are defeated and cannot act")]
    PlayerDefeated,

    #[error("there is no battle to fight")]
    NoActiveBattle,

    #[error("you cannot do that during a battle")]
    InBattle,

    #[error("still arriving; wait for the area to settle")]
    TransitionInProgress,

    #[error("cannot travel to {0} from here")]
    InvalidDestination(ZoneId),

    #[error("no {service} available at {zone}")]
    ServiceUnavailable { service: CardId, zone: ZoneId },

    #[error("you are already at full health")]
    AlreadyFullHealth,

    #[error("you have no {0}")]
    NotInInventory(ItemKind),

    #[error("{0} cannot be equipped")]
    NotEquippable(ItemKind),

    #[error("{0} cannot be consumed")]
    NotConsumable(ItemKind),

    #[error("state invariant violated: {0}")]
    InvariantViolated(&'static str),
}

impl GameError for IntentError {
    fn severity(&self) -> ErrorSeverity {
        use IntentError::*;
        match self {
            InsufficientCredits { .. } | OutOfStock(_) | NothingToSell(_) => {
                ErrorSeverity::Recoverable
            }
            PlayerDefeated | NoActiveBattle | InBattle | TransitionInProgress => {
                ErrorSeverity::Recoverable
            }
            TargetAlreadyDown(_) | ServiceUnavailable { .. } | AlreadyFullHealth => {
                ErrorSeverity::Recoverable
            }
            NotInInventory(_) => ErrorSeverity::Recoverable,
            NotForSale(_) | InvalidTarget(_) | InvalidDestination(_) => ErrorSeverity::Validation,
            NotEquippable(_) | NotConsumable(_) => ErrorSeverity::Validation,
            InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use IntentError::*;
        match self {
            InsufficientCredits { .. } => "INTENT_INSUFFICIENT_CREDITS",
            OutOfStock(_) => "INTENT_OUT_OF_STOCK",
            NothingToSell(_) => "INTENT_NOTHING_TO_SELL",
            NotForSale(_) => "INTENT_NOT_FOR_SALE",
            InvalidTarget(_) => "INTENT_INVALID_TARGET",
            TargetAlreadyDown(_) => "INTENT_TARGET_ALREADY_DOWN",
            PlayerDefeated => "INTENT_PLAYER_DEFEATED",
            NoActiveBattle => "INTENT_NO_ACTIVE_BATTLE",
            InBattle => "INTENT_IN_BATTLE",
            TransitionInProgress => "INTENT_TRANSITION_IN_PROGRESS",
            InvalidDestination(_) => "INTENT_INVALID_DESTINATION",
            ServiceUnavailable { .. } => "INTENT_SERVICE_UNAVAILABLE",
            AlreadyFullHealth => "INTENT_ALREADY_FULL_HEALTH",
            NotInInventory(_) => "INTENT_NOT_IN_INVENTORY",
            NotEquippable(_) => "INTENT_NOT_EQUIPPABLE",
            NotConsumable(_) => "INTENT_NOT_CONSUMABLE",
            InvariantViolated(_) => "INTENT_INVARIANT_VIOLATED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_violations_are_internal() {
        let err = IntentError::InvariantViolated("hp above max");
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "INTENT_INVARIANT_VIOLATED");
    }

    #[test]
    fn messages_name_the_item() {
        let err = IntentError::OutOfStock(ItemKind::StimPack);
        assert_eq!(err.to_string(), "the merchant is out of stimPack");
    }
}
