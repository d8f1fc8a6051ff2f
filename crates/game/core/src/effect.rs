//! Effect dispatch: what a spell does to the combatant it lands on.
//!
//! The mapping is a closed enum match, so every effect kind has exactly one
//! stat mutation and an unknown kind cannot exist at runtime.

use crate::stats::{Combatant, ResourceChange};

/// Closed set of spell effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectKind {
    Damage,
    Heal,
    RestoreMana,
}

impl EffectKind {
    /// Heal and mana restoration land on the caster's own side.
    pub const fn targets_caster(self) -> bool {
        matches!(self, EffectKind::Heal | EffectKind::RestoreMana)
    }

    /// Applies `power` to `target` through its clamped mutation path.
    pub fn apply(self, power: u32, target: &mut Combatant) -> ResourceChange {
        match self {
            EffectKind::Damage => target.apply_damage(power),
            EffectKind::Heal => target.apply_heal(power),
            EffectKind::RestoreMana => target.apply_mana_delta(i64::from(power)),
        }
    }
}

/// Resolved recipient of a cast.
///
/// Self-targeted effects reuse the caster's own borrow instead of a second
/// mutable reference.
#[derive(Debug)]
pub enum Target<'a> {
    Caster,
    Other(&'a mut Combatant),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatBounds;
    use crate::stats::{ResourceKind, Side};

    fn goblin() -> Combatant {
        Combatant::new("Goblin", Side::Enemy, 80, 50, &StatBounds::DEFAULT).unwrap()
    }

    #[test]
    fn damage_hits_opponent_and_hp() {
        let mut goblin = goblin();
        let change = EffectKind::Damage.apply(20, &mut goblin);
        assert_eq!(change.kind, ResourceKind::Hp);
        assert_eq!(goblin.hp().current(), 60);
        assert!(!EffectKind::Damage.targets_caster());
    }

    #[test]
    fn heal_and_restore_target_caster() {
        assert!(EffectKind::Heal.targets_caster());
        assert!(EffectKind::RestoreMana.targets_caster());
    }

    #[test]
    fn restore_mana_changes_mana_only() {
        let mut goblin = goblin();
        goblin.apply_mana_delta(-30);
        let change = EffectKind::RestoreMana.apply(15, &mut goblin);
        assert_eq!(change.kind, ResourceKind::Mana);
        assert_eq!((change.old, change.new), (20, 35));
        assert_eq!(goblin.hp().current(), 80);
    }

    #[test]
    fn kinds_round_trip_through_tags() {
        assert_eq!(EffectKind::RestoreMana.to_string(), "restore_mana");
        assert_eq!("heal".parse::<EffectKind>().unwrap(), EffectKind::Heal);
    }
}
