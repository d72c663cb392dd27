//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, content loading and
//! engine rejections so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ConfigError, GameError, Rejection};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine refused the intent; the game state is unchanged.
    #[error("intent rejected: {0}")]
    Rejected(#[source] Rejection),

    #[error("invalid game configuration")]
    InvalidConfig(#[from] ConfigError),

    #[error("failed to load game content: {0}")]
    Content(String),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RuntimeError {
    /// The engine rejection behind this error, if that is what it is.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            RuntimeError::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Stable code for logs and presentation.
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::Rejected(rejection) => rejection.error_code(),
            RuntimeError::InvalidConfig(_) => "INVALID_CONFIG",
            RuntimeError::Content(_) => "CONTENT",
            RuntimeError::CommandChannelClosed | RuntimeError::ReplyChannelClosed(_) => {
                "WORKER_GONE"
            }
            RuntimeError::WorkerJoin(_) => "WORKER_JOIN",
            RuntimeError::Repository(_) => "REPOSITORY",
        }
    }
}

impl From<Rejection> for RuntimeError {
    fn from(rejection: Rejection) -> Self {
        RuntimeError::Rejected(rejection)
    }
}
