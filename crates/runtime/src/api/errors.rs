//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the cost engine and the command executor so hosts can
//! map every outcome of a teleport to player feedback.
use cost_core::{ConsumptionError, CostStrategyError, ErrorSeverity};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player `{0}` cannot teleport to themselves")]
    SelfTeleport(String),

    #[error("player `{0}` not found")]
    PlayerNotFound(String),

    #[error("route `{0}` is disabled")]
    RouteDisabled(String),

    #[error(transparent)]
    Cost(#[from] ConsumptionError),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error("teleport service requires {0} to be configured before building")]
    MissingComponent(&'static str),
}

/// Failures reported by a [`CommandExecutor`](super::CommandExecutor).
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("command executor lock was poisoned")]
    LockPoisoned,

    #[error("command `{command}` was rejected: {reason}")]
    Rejected { command: String, reason: String },
}

impl CostStrategyError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SelfTeleport(_) | Self::PlayerNotFound(_) => ErrorSeverity::Recoverable,
            Self::RouteDisabled(_) | Self::MissingComponent(_) => ErrorSeverity::Validation,
            Self::Cost(err) => err.severity(),
            Self::Executor(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SelfTeleport(_) => "TELEPORT_SELF",
            Self::PlayerNotFound(_) => "TELEPORT_PLAYER_NOT_FOUND",
            Self::RouteDisabled(_) => "TELEPORT_ROUTE_DISABLED",
            Self::Cost(err) => err.error_code(),
            Self::Executor(_) => "TELEPORT_EXECUTOR",
            Self::MissingComponent(_) => "TELEPORT_MISSING_COMPONENT",
        }
    }
}
