//! Basic attack damage application.

use crate::action::AttackReport;
use crate::stats::Combatant;

/// Apply a basic attack from `attacker` to `defender`.
///
/// The attack always lands and costs nothing; HP is clamped at 0 by the
/// defender's meter.
pub fn basic_attack(attacker: &Combatant, defender: &mut Combatant, damage: u32) -> AttackReport {
    tracing::info!(
        attacker = attacker.name(),
        defender = defender.name(),
        damage,
        "basic attack"
    );
    let outcome = defender.apply_damage(damage);
    AttackReport {
        attacker: attacker.side(),
        defender: defender.side(),
        damage,
        outcome,
    }
}
