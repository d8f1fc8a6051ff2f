//! Spell definitions and the spellbook registry.

use crate::config::GameConfig;
use crate::effect::{EffectKind, Target};
use crate::error::{CastError, ValidationError};
use crate::stats::{Combatant, ResourceChange, Side};

/// Immutable spell record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Spell {
    name: String,
    mana_cost: u32,
    level: u8,
    effect: EffectKind,
    power: u32,
}

impl Spell {
    /// Creates a spell; `level` must lie in `1..=10`.
    pub fn new(
        name: impl Into<String>,
        mana_cost: u32,
        level: u8,
        effect: EffectKind,
        power: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "spell" });
        }
        if !(GameConfig::MIN_SPELL_LEVEL..=GameConfig::MAX_SPELL_LEVEL).contains(&level) {
            return Err(ValidationError::SpellLevelOutOfRange {
                name,
                level,
                min: GameConfig::MIN_SPELL_LEVEL,
                max: GameConfig::MAX_SPELL_LEVEL,
            });
        }
        Ok(Self {
            name,
            mana_cost,
            level,
            effect,
            power,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn mana_cost(&self) -> u32 {
        self.mana_cost
    }

    pub const fn level(&self) -> u8 {
        self.level
    }

    pub const fn effect(&self) -> EffectKind {
        self.effect
    }

    pub const fn power(&self) -> u32 {
        self.power
    }
}

/// What a successful cast did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CastReport {
    pub spell: String,
    pub effect: EffectKind,
    pub caster: Side,
    pub target: Side,
    /// Mana paid by the caster.
    pub cost: ResourceChange,
    /// Stat change on the target.
    pub outcome: ResourceChange,
    /// Caster's experience total after the reward.
    pub experience: u32,
}

/// Ordered spell registry keyed by unique name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spellbook {
    spells: Vec<Spell>,
}

impl Spellbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a spellbook, rejecting duplicate names.
    pub fn with_spells(spells: impl IntoIterator<Item = Spell>) -> Result<Self, ValidationError> {
        let mut book = Self::new();
        for spell in spells {
            book.insert(spell)?;
        }
        Ok(book)
    }

    pub fn insert(&mut self, spell: Spell) -> Result<(), ValidationError> {
        if self.lookup(spell.name()).is_some() {
            return Err(ValidationError::DuplicateSpell {
                name: spell.name.clone(),
            });
        }
        self.spells.push(spell);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Spell> {
        self.spells.iter().find(|spell| spell.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spell> {
        self.spells.iter()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Spells costing no more than `mana`, in spellbook order.
    pub fn affordable(&self, mana: u32) -> impl Iterator<Item = &Spell> {
        self.spells.iter().filter(move |spell| spell.mana_cost <= mana)
    }

    pub fn any_affordable(&self, mana: u32) -> bool {
        self.affordable(mana).next().is_some()
    }

    /// Checks existence and affordability without touching any state.
    pub fn check(&self, name: &str, caster: &Combatant) -> Result<&Spell, CastError> {
        let spell = self.lookup(name).ok_or_else(|| CastError::SpellNotFound {
            name: name.to_string(),
        })?;
        if !caster.can_afford(spell.mana_cost) {
            return Err(CastError::InsufficientMana {
                name: spell.name.clone(),
                cost: spell.mana_cost,
                available: caster.mana().current(),
            });
        }
        Ok(spell)
    }

    /// Casts `name` from `caster` onto `target`.
    ///
    /// On failure neither combatant is touched. On success the cost is paid
    /// before the effect lands, then the caster earns
    /// [`GameConfig::SPELL_EXPERIENCE`].
    pub fn cast(
        &self,
        name: &str,
        caster: &mut Combatant,
        target: Target<'_>,
    ) -> Result<CastReport, CastError> {
        let spell = self.check(name, caster)?;

        tracing::info!(
            caster = caster.name(),
            spell = spell.name(),
            mana = caster.mana().current(),
            remaining = caster.mana().current() - spell.mana_cost,
            "casting spell"
        );

        let cost = caster.apply_mana_delta(-i64::from(spell.mana_cost));
        let (target_side, outcome) = match target {
            Target::Caster => (caster.side(), spell.effect.apply(spell.power, caster)),
            Target::Other(other) => (other.side(), spell.effect.apply(spell.power, other)),
        };
        let experience = caster.gain_experience(GameConfig::SPELL_EXPERIENCE);

        Ok(CastReport {
            spell: spell.name.clone(),
            effect: spell.effect,
            caster: caster.side(),
            target: target_side,
            cost,
            outcome,
            experience,
        })
    }
}
