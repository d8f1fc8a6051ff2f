//! Deterministic duel rules and data types shared across the workspace.
//!
//! `game-core` defines the canonical rules (combatants, spellbook, effect
//! dispatch, battle engine) and exposes pure APIs that the runtime drives.
//! All battle-state mutation flows through [`engine::BattleEngine`] or the
//! clamped mutation methods on [`Combatant`].
pub mod action;
pub mod combat;
pub mod config;
pub mod effect;
pub mod engine;
pub mod error;
pub mod spell;
pub mod state;
pub mod stats;

pub use action::{
    ActionRecord, ActionReport, AllowedActions, AttackReport, BattleAction, SpellOption,
};
pub use config::{EventLimits, GameConfig, StatBounds};
pub use effect::{EffectKind, Target};
pub use engine::{BattleEngine, fallback_action};
pub use error::{CastError, ErrorSeverity, GameError, ValidationError};
pub use spell::{CastReport, Spell, Spellbook};
pub use state::{BattleSnapshot, BattleState, Combatants, Outcome, TurnPhase};
pub use stats::{Combatant, CombatantStatus, ResourceChange, ResourceKind, ResourceMeter, Side};
