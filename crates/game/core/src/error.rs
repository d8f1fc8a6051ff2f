//! Common error infrastructure for game-core.
//!
//! Construction-time failures are [`ValidationError`]s and abort battle setup.
//! Cast failures are [`CastError`]s; the turn engine turns them into a retry
//! or a fallback action, so they never leave a running battle.

use crate::stats::{ResourceKind, Side};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with the same or an alternative action.
    ///
    /// Examples: not enough mana, unknown spell name
    Recoverable,

    /// Validation error - invalid setup input, should not retry without changes.
    ///
    /// Examples: starting hp outside the configured range
    Validation,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Invalid input while building combatants or spellbooks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("starting {kind} {value} must be within {min}..={max}")]
    StatOutOfRange {
        kind: ResourceKind,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("spell '{name}' level {level} must be within {min}..={max}")]
    SpellLevelOutOfRange {
        name: String,
        level: u8,
        min: u8,
        max: u8,
    },

    #[error("spell '{name}' is already in the spellbook")]
    DuplicateSpell { name: String },

    #[error("{what} name must not be empty")]
    EmptyName { what: &'static str },

    #[error("combatant '{name}' must fight on the {expected} side")]
    WrongSide { name: String, expected: Side },
}

impl GameError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StatOutOfRange { .. } => "STAT_OUT_OF_RANGE",
            Self::SpellLevelOutOfRange { .. } => "SPELL_LEVEL_OUT_OF_RANGE",
            Self::DuplicateSpell { .. } => "DUPLICATE_SPELL",
            Self::EmptyName { .. } => "EMPTY_NAME",
            Self::WrongSide { .. } => "WRONG_SIDE",
        }
    }
}

/// A cast attempt that was refused before any state changed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("spell '{name}' is not in the spellbook")]
    SpellNotFound { name: String },

    #[error("spell '{name}' costs {cost} mana but only {available} is left")]
    InsufficientMana {
        name: String,
        cost: u32,
        available: u32,
    },
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SpellNotFound { .. } => "SPELL_NOT_FOUND",
            Self::InsufficientMana { .. } => "INSUFFICIENT_MANA",
        }
    }
}
