//! Enemy decision sources.

use async_trait::async_trait;
use game_core::{AllowedActions, BattleState, Side, fallback_action};

use crate::api::{ActionProvider, Decision, Result};
use crate::narrator::Narrator;

/// Deterministic enemy: first affordable damage spell, else basic attack.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackEnemyProvider;

#[async_trait]
impl ActionProvider for FallbackEnemyProvider {
    async fn provide_action(&self, side: Side, state: &BattleState) -> Result<Decision> {
        Ok(fallback_action(state, side).into())
    }
}

/// Enemy that lets the narrator pick from an allow-list.
///
/// An absent, malformed, or disallowed choice falls back to the deterministic
/// policy. The runtime still re-validates whatever this returns.
#[derive(Debug, Clone)]
pub struct NarratorEnemyProvider {
    narrator: Narrator,
    basic_attack_damage: u32,
}

impl NarratorEnemyProvider {
    pub fn new(narrator: Narrator, basic_attack_damage: u32) -> Self {
        Self {
            narrator,
            basic_attack_damage,
        }
    }
}

#[async_trait]
impl ActionProvider for NarratorEnemyProvider {
    async fn provide_action(&self, side: Side, state: &BattleState) -> Result<Decision> {
        let allowed = AllowedActions::for_enemy(
            state.combatants.get(side),
            &state.spellbook,
            self.basic_attack_damage,
        );

        match self
            .narrator
            .choose_enemy_action(&state.snapshot(), &allowed)
            .await
        {
            Some(choice) => Ok(Decision {
                action: choice.action,
                narration: choice.narration,
            }),
            None => {
                let action = fallback_action(state, side);
                tracing::debug!(%action, "no narrator choice; using fallback policy");
                Ok(action.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{BattleAction, Combatant, Combatants, EffectKind, Spell, Spellbook, StatBounds};

    fn state(enemy_mana: u32) -> BattleState {
        let bounds = StatBounds::DEFAULT;
        let combatants = Combatants::new(
            Combatant::new("Hero", Side::Player, 100, 60, &bounds).unwrap(),
            Combatant::new("Goblin", Side::Enemy, 80, enemy_mana, &bounds).unwrap(),
        )
        .unwrap();
        let book = Spellbook::with_spells([
            Spell::new("Healing", 20, 2, EffectKind::Heal, 25).unwrap(),
            Spell::new("Fireball", 30, 3, EffectKind::Damage, 20).unwrap(),
        ])
        .unwrap();
        BattleState::new(combatants, book)
    }

    #[tokio::test]
    async fn fallback_skips_non_damage_spells() {
        let decision = FallbackEnemyProvider
            .provide_action(Side::Enemy, &state(50))
            .await
            .unwrap();
        assert_eq!(decision.action, BattleAction::cast("Fireball"));
        assert_eq!(decision.narration, None);
    }

    #[tokio::test]
    async fn disabled_narrator_uses_fallback() {
        let provider = NarratorEnemyProvider::new(Narrator::disabled(), 10);
        let decision = provider.provide_action(Side::Enemy, &state(20)).await.unwrap();
        assert_eq!(decision, Decision::from(BattleAction::BasicAttack));
    }
}
