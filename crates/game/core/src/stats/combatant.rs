//! Battle participant with clamped hp and mana.

use crate::config::StatBounds;
use crate::error::ValidationError;

use super::resources::{ResourceChange, ResourceKind, ResourceMeter};

/// Which side of the duel a combatant fights on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// A player character or an enemy.
///
/// Behavior does not differ by side; the side tag only drives targeting and
/// presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    name: String,
    side: Side,
    hp: ResourceMeter,
    mana: ResourceMeter,
    level: u32,
    experience: u32,
}

impl Combatant {
    /// Builds a combatant at full hp and mana.
    ///
    /// Both maximums must lie inside `bounds`.
    pub fn new(
        name: impl Into<String>,
        side: Side,
        max_hp: u32,
        max_mana: u32,
        bounds: &StatBounds,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "combatant" });
        }
        if !(bounds.min_mana..=bounds.max_mana).contains(&max_mana) {
            return Err(ValidationError::StatOutOfRange {
                kind: ResourceKind::Mana,
                value: max_mana,
                min: bounds.min_mana,
                max: bounds.max_mana,
            });
        }
        if !(bounds.min_hp..=bounds.max_hp).contains(&max_hp) {
            return Err(ValidationError::StatOutOfRange {
                kind: ResourceKind::Hp,
                value: max_hp,
                min: bounds.min_hp,
                max: bounds.max_hp,
            });
        }

        Ok(Self {
            name,
            side,
            hp: ResourceMeter::full(max_hp),
            mana: ResourceMeter::full(max_mana),
            level: 1,
            experience: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    pub const fn hp(&self) -> ResourceMeter {
        self.hp
    }

    pub const fn mana(&self) -> ResourceMeter {
        self.mana
    }

    pub const fn level(&self) -> u32 {
        self.level
    }

    pub const fn experience(&self) -> u32 {
        self.experience
    }

    /// Check if combatant is alive (HP > 0)
    pub const fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    pub const fn can_afford(&self, cost: u32) -> bool {
        self.mana.current() >= cost
    }

    pub fn apply_damage(&mut self, amount: u32) -> ResourceChange {
        self.change_hp(-i64::from(amount))
    }

    pub fn apply_heal(&mut self, amount: u32) -> ResourceChange {
        self.change_hp(i64::from(amount))
    }

    pub fn apply_mana_delta(&mut self, amount: i64) -> ResourceChange {
        let (old, new) = self.mana.apply_delta(amount);
        self.record(ResourceKind::Mana, old, new)
    }

    /// Signed hp change; used by narrator events, which may push either way.
    pub fn apply_hp_delta(&mut self, amount: i64) -> ResourceChange {
        self.change_hp(amount)
    }

    /// Rest between encounters: hp back to maximum, mana down to the
    /// configured minimum.
    pub fn restore_to_full(&mut self, bounds: &StatBounds) -> [ResourceChange; 2] {
        let max_hp = self.hp.maximum();
        let (old_hp, new_hp) = self.hp.set(max_hp);
        let (old_mana, new_mana) = self.mana.set(bounds.min_mana);
        tracing::info!(combatant = %self.name, "rested, health restored");
        [
            self.record(ResourceKind::Hp, old_hp, new_hp),
            self.record(ResourceKind::Mana, old_mana, new_mana),
        ]
    }

    /// Adds experience and returns the new total.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        tracing::info!(
            combatant = %self.name,
            gained = amount,
            total = self.experience,
            "experience gained"
        );
        self.experience
    }

    pub fn status(&self) -> CombatantStatus {
        CombatantStatus {
            name: self.name.clone(),
            side: self.side,
            current_hp: self.hp.current(),
            max_hp: self.hp.maximum(),
            current_mana: self.mana.current(),
            max_mana: self.mana.maximum(),
            level: self.level,
            experience: self.experience,
        }
    }

    fn change_hp(&mut self, amount: i64) -> ResourceChange {
        let (old, new) = self.hp.apply_delta(amount);
        self.record(ResourceKind::Hp, old, new)
    }

    fn record(&self, kind: ResourceKind, old: u32, new: u32) -> ResourceChange {
        tracing::debug!(combatant = %self.name, %kind, old, new, "stat changed");
        ResourceChange { kind, old, new }
    }
}

/// Read-only view of a combatant, as shown to players and the narrator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CombatantStatus {
    pub name: String,
    pub side: Side,
    pub current_hp: u32,
    pub max_hp: u32,
    pub current_mana: u32,
    pub max_mana: u32,
    pub level: u32,
    pub experience: u32,
}

impl core::fmt::Display for CombatantStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}: hp {}/{}, mana {}/{}, level {}",
            self.name, self.current_hp, self.max_hp, self.current_mana, self.max_mana, self.level
        )
    }
}
