//! Battle actions and their resolution reports.

use crate::effect::EffectKind;
use crate::spell::{CastReport, Spellbook};
use crate::stats::{Combatant, ResourceChange, Side};

/// Something a combatant does on its turn.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BattleAction {
    /// Fixed-damage attack; free and always available.
    BasicAttack,
    /// Cast a spell from the shared spellbook.
    CastSpell { spell_name: String },
}

impl BattleAction {
    pub fn cast(spell_name: impl Into<String>) -> Self {
        Self::CastSpell {
            spell_name: spell_name.into(),
        }
    }

    pub fn spell_name(&self) -> Option<&str> {
        match self {
            Self::BasicAttack => None,
            Self::CastSpell { spell_name } => Some(spell_name),
        }
    }
}

impl core::fmt::Display for BattleAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BasicAttack => f.write_str("basic attack"),
            Self::CastSpell { spell_name } => write!(f, "cast {spell_name}"),
        }
    }
}

/// Who did what, kept as the "last action" for narration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ActionRecord {
    pub actor: Side,
    pub action: BattleAction,
}

/// Result of a basic attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttackReport {
    pub attacker: Side,
    pub defender: Side,
    pub damage: u32,
    pub outcome: ResourceChange,
}

/// Result of any resolved action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ActionReport {
    Attack(AttackReport),
    Cast(CastReport),
}

impl ActionReport {
    pub fn target(&self) -> Side {
        match self {
            Self::Attack(report) => report.defender,
            Self::Cast(report) => report.target,
        }
    }
}

/// One castable option offered to an external decision source.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpellOption {
    pub spell_name: String,
    pub mana_cost: u32,
    pub power: u32,
}

/// Explicit allow-list of actions an enemy may take this turn.
///
/// Only damage spells the enemy can currently afford are listed; the basic
/// attack is always allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AllowedActions {
    pub basic_attack_damage: u32,
    pub cast_spell: Vec<SpellOption>,
}

impl AllowedActions {
    pub fn for_enemy(enemy: &Combatant, spellbook: &Spellbook, basic_attack_damage: u32) -> Self {
        let cast_spell = spellbook
            .affordable(enemy.mana().current())
            .filter(|spell| spell.effect() == EffectKind::Damage)
            .map(|spell| SpellOption {
                spell_name: spell.name().to_string(),
                mana_cost: spell.mana_cost(),
                power: spell.power(),
            })
            .collect();
        Self {
            basic_attack_damage,
            cast_spell,
        }
    }

    pub fn permits(&self, action: &BattleAction) -> bool {
        match action {
            BattleAction::BasicAttack => true,
            BattleAction::CastSpell { spell_name } => self
                .cast_spell
                .iter()
                .any(|option| &option.spell_name == spell_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatBounds;
    use crate::spell::Spell;

    #[test]
    fn allow_list_contains_only_affordable_damage_spells() {
        let book = Spellbook::with_spells([
            Spell::new("Fireball", 30, 3, EffectKind::Damage, 20).unwrap(),
            Spell::new("Healing", 20, 2, EffectKind::Heal, 25).unwrap(),
            Spell::new("Frost Bolt", 15, 2, EffectKind::Damage, 12).unwrap(),
        ])
        .unwrap();
        let mut enemy =
            Combatant::new("Goblin", Side::Enemy, 80, 50, &StatBounds::DEFAULT).unwrap();
        enemy.apply_mana_delta(-30);

        let allowed = AllowedActions::for_enemy(&enemy, &book, 10);

        assert_eq!(allowed.cast_spell.len(), 1);
        assert!(allowed.permits(&BattleAction::cast("Frost Bolt")));
        assert!(!allowed.permits(&BattleAction::cast("Fireball")));
        assert!(!allowed.permits(&BattleAction::cast("Healing")));
        assert!(allowed.permits(&BattleAction::BasicAttack));
    }

    #[test]
    fn display_names_the_action() {
        assert_eq!(BattleAction::BasicAttack.to_string(), "basic attack");
        assert_eq!(BattleAction::cast("Fireball").to_string(), "cast Fireball");
        assert_eq!(BattleAction::cast("Fireball").spell_name(), Some("Fireball"));
    }
}
