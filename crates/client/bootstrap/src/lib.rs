//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, default content, and battle runtime setup
//! that any front-end crate can reuse.
pub mod builder;
pub mod config;
pub mod roster;

pub use builder::BattleBuilder;
pub use config::{CombatantSetup, RuntimeConfig};
pub use roster::{default_spellbook, new_battle, spawn_combatant};
