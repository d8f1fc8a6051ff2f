//! Stat containers for battle participants.
//!
//! Every write to hp or mana flows through [`ResourceMeter`], which saturates
//! at `0` and at the meter's maximum. Mutations never fail; they report the
//! old and new values as a [`ResourceChange`].

pub mod combatant;
pub mod resources;

pub use combatant::{Combatant, CombatantStatus, Side};
pub use resources::{ResourceChange, ResourceKind, ResourceMeter};
