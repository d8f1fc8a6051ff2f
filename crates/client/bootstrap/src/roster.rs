//! Built-in content: the default spellbook and combatant construction.
use anyhow::{Context, Result};
use game_core::{
    BattleState, Combatant, Combatants, EffectKind, Side, Spell, Spellbook, StatBounds,
    ValidationError,
};

use crate::config::{CombatantSetup, RuntimeConfig};

/// Fireball, Healing, Mana Surge, Frost Bolt, in that order.
///
/// Order matters: the enemy fallback picks the first affordable damage spell.
pub fn default_spellbook() -> Result<Spellbook, ValidationError> {
    Spellbook::with_spells([
        Spell::new("Fireball", 30, 3, EffectKind::Damage, 20)?,
        Spell::new("Healing", 20, 2, EffectKind::Heal, 25)?,
        Spell::new("Mana Surge", 0, 1, EffectKind::RestoreMana, 15)?,
        Spell::new("Frost Bolt", 15, 2, EffectKind::Damage, 12)?,
    ])
}

pub fn spawn_combatant(
    setup: &CombatantSetup,
    side: Side,
    bounds: &StatBounds,
) -> Result<Combatant, ValidationError> {
    Combatant::new(setup.name.as_str(), side, setup.max_hp, setup.max_mana, bounds)
}

/// Pairs `player` with a freshly spawned enemy.
pub fn new_battle(player: Combatant, config: &RuntimeConfig) -> Result<BattleState> {
    let enemy = spawn_combatant(&config.enemy, Side::Enemy, &config.game.bounds)
        .with_context(|| format!("invalid enemy setup {:?}", config.enemy))?;
    let spellbook = default_spellbook().context("invalid default spellbook")?;
    let combatants = Combatants::new(player, enemy).context("invalid combatant pairing")?;
    Ok(BattleState::new(combatants, spellbook))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spellbook_order() {
        let book = default_spellbook().unwrap();
        let names: Vec<_> = book.iter().map(|spell| spell.name()).collect();
        assert_eq!(names, ["Fireball", "Healing", "Mana Surge", "Frost Bolt"]);
        assert_eq!(book.lookup("Mana Surge").unwrap().mana_cost(), 0);
    }

    #[test]
    fn new_battle_uses_configured_enemy() {
        let config = RuntimeConfig::default();
        let player = spawn_combatant(&config.player, Side::Player, &config.game.bounds).unwrap();
        let state = new_battle(player, &config).unwrap();

        assert_eq!(state.round, 0);
        assert_eq!(state.combatants.enemy().name(), "Goblin Shaman");
        assert_eq!(state.combatants.enemy().hp().current(), 80);
        assert_eq!(state.spellbook.len(), 4);
    }

    #[test]
    fn out_of_range_enemy_is_rejected() {
        let mut config = RuntimeConfig::default();
        config.enemy.max_hp = 500;
        let player = spawn_combatant(&config.player, Side::Player, &config.game.bounds).unwrap();
        let err = new_battle(player, &config).unwrap_err();
        assert!(err.to_string().contains("invalid enemy setup"));
    }
}
