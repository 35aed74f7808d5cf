//! Common error infrastructure for revenge-core.
//!
//! Domain-specific errors (`CombatError`, `OracleError`) live next to the
//! operations they guard. This module provides the shared classification.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same input may succeed once the situation changes
/// - **Validation**: invalid input, reject without retry
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: a required collaborator is missing, the action cannot run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - e.g. no item selected yet.
    Recoverable,

    /// Validation error - e.g. item locked or unknown.
    Validation,

    /// Internal error - state inconsistency that indicates a bug.
    Internal,

    /// Fatal error - missing oracle, player or enemy.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug or missing wiring.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all revenge-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers for logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
