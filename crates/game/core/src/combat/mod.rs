//! Combat resolution that does not involve the spellbook.
//!
//! - `basic_attack`: fixed damage from attacker to defender, no resource cost

pub mod damage;

pub use damage::basic_attack;
