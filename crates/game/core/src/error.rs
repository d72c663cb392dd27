//! Shared error classification for game-core.
//!
//! Domain errors live next to the code that raises them (intent rejections
//! in [`crate::action`], configuration problems in [`crate::config`]); this
//! module only provides the common vocabulary the runtime uses to decide how
//! loudly to report them.

/// How a rejected operation should be treated by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The game state does not allow this right now (not enough credits,
    /// still walking, battle running). Another intent may succeed.
    Recoverable,

    /// The intent itself is malformed for this game (unknown target, item
    /// that cannot be equipped).
    Validation,

    /// A state invariant did not hold after a transition. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, suitable for logs and client UIs.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
