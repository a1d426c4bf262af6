//! Common error infrastructure for cost-core.
//!
//! Two families of failure exist and they are handled very differently:
//!
//! - **Insufficiency** ([`InsufficientResources`]): a strict consumption leaf found
//!   that the player cannot cover the price. Hosts catch it at the boundary and turn
//!   it into player feedback.
//! - **Configuration** ([`ConfigError`]): a strategy document names an unknown
//!   `type` tag or carries invalid parameters. Raised while building, never per call.
//!
//! Everything else is internal and surfaces unchanged.

use crate::consumption::ExperienceMode;
use crate::resource::ResourceKind;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The player lacks resources; retrying with more resources may succeed.
    Recoverable,

    /// Invalid configuration; must be fixed before any strategy can be built.
    Validation,

    /// Unexpected numeric or state condition inside the engine.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all cost-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CostStrategyError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Hosts use it as a translation key suffix and in logs.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

// ============================================================================
// Insufficiency
// ============================================================================

/// A strict consumption leaf could not cover the requested amount.
///
/// `available` and `required` are expressed in the unit of the resource that
/// detected the shortfall (points or levels, item value, hunger points, health).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("insufficient {resource}: available {available}, required {required}{}", mode_suffix(.strategy))]
pub struct InsufficientResources {
    pub resource: ResourceKind,
    pub available: f64,
    pub required: f64,
    /// Experience only: the mode that was used for the comparison.
    pub strategy: Option<ExperienceMode>,
}

fn mode_suffix(strategy: &Option<ExperienceMode>) -> String {
    match strategy {
        Some(mode) => format!(" ({mode})"),
        None => String::new(),
    }
}

impl InsufficientResources {
    pub fn new(resource: ResourceKind, available: f64, required: f64) -> Self {
        Self {
            resource,
            available,
            required,
            strategy: None,
        }
    }

    /// Creates an experience shortfall tagged with the mode that detected it.
    pub fn experience(available: f64, required: f64, mode: ExperienceMode) -> Self {
        Self {
            resource: ResourceKind::Experience,
            available,
            required,
            strategy: Some(mode),
        }
    }
}

impl CostStrategyError for InsufficientResources {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self.resource {
            ResourceKind::Experience => "INSUFFICIENT_EXPERIENCE",
            ResourceKind::Items => "INSUFFICIENT_ITEMS",
            ResourceKind::Hunger => "INSUFFICIENT_HUNGER",
            ResourceKind::Health => "INSUFFICIENT_HEALTH",
        }
    }
}

/// Errors raised while applying a consumption strategy.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConsumptionError {
    #[error(transparent)]
    Insufficient(#[from] InsufficientResources),

    /// A value could not be represented for exact arithmetic.
    #[error("{what} cannot be represented exactly: {value}")]
    Unrepresentable { what: &'static str, value: f64 },
}

impl ConsumptionError {
    /// Returns the insufficiency payload, if this is a shortfall.
    pub fn as_insufficient(&self) -> Option<&InsufficientResources> {
        match self {
            Self::Insufficient(err) => Some(err),
            Self::Unrepresentable { .. } => None,
        }
    }
}

impl CostStrategyError for ConsumptionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Insufficient(err) => err.severity(),
            Self::Unrepresentable { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Insufficient(err) => err.error_code(),
            Self::Unrepresentable { .. } => "CONSUMPTION_UNREPRESENTABLE",
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Pipeline stage a configuration node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Distance,
    Cost,
    Consumption,
}

/// Fatal configuration errors raised while building a strategy.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown {stage} type `{tag}`")]
    UnknownType { stage: Stage, tag: String },

    #[error("invalid parameters for {stage} type `{tag}`")]
    InvalidParameters {
        stage: Stage,
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{stage} lower bound {min} exceeds upper bound {max}")]
    InvalidBounds { stage: Stage, min: f64, max: f64 },

    #[error("{stage} parameter `{field}` must be finite, got {value}")]
    NonFinite {
        stage: Stage,
        field: &'static str,
        value: f64,
    },

    #[error("price of `{item}` cannot be represented exactly: {price}")]
    InvalidPrice { item: String, price: f64 },
}

impl CostStrategyError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownType { .. } => "CONFIG_UNKNOWN_TYPE",
            Self::InvalidParameters { .. } => "CONFIG_INVALID_PARAMETERS",
            Self::InvalidBounds { .. } => "CONFIG_INVALID_BOUNDS",
            Self::NonFinite { .. } => "CONFIG_NON_FINITE",
            Self::InvalidPrice { .. } => "CONFIG_INVALID_PRICE",
        }
    }
}
