//! Rules engine for a single duel.
//!
//! [`BattleEngine`] borrows a [`BattleState`] and exposes the pure rule
//! operations the runtime's turn loop is built from: validating and executing
//! actions, the deterministic fallback policy, draw detection, and outcome
//! classification. It performs no I/O and never asks anyone for input.

use crate::action::{ActionRecord, ActionReport, BattleAction};
use crate::combat::basic_attack;
use crate::config::GameConfig;
use crate::effect::{EffectKind, Target};
use crate::error::CastError;
use crate::state::{BattleState, Outcome, TurnPhase};
use crate::stats::Side;

/// Deterministic policy: the first affordable damage spell in spellbook
/// order, otherwise a basic attack.
pub fn fallback_action(state: &BattleState, actor: Side) -> BattleAction {
    let mana = state.combatants.get(actor).mana().current();
    state
        .spellbook
        .affordable(mana)
        .find(|spell| spell.effect() == EffectKind::Damage)
        .map(|spell| BattleAction::cast(spell.name()))
        .unwrap_or(BattleAction::BasicAttack)
}

/// Applies battle rules to a borrowed [`BattleState`].
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    config: &'a GameConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &BattleState {
        &*self.state
    }

    /// Checks that `actor` may take `action` right now, without mutating.
    pub fn validate(&self, actor: Side, action: &BattleAction) -> Result<(), CastError> {
        match action {
            BattleAction::BasicAttack => Ok(()),
            BattleAction::CastSpell { spell_name } => self
                .state
                .spellbook
                .check(spell_name, self.state.combatants.get(actor))
                .map(|_| ()),
        }
    }

    /// Resolves `action` for `actor` and records it as the last action.
    ///
    /// A refused cast leaves the state untouched.
    pub fn execute(
        &mut self,
        actor: Side,
        action: &BattleAction,
    ) -> Result<ActionReport, CastError> {
        let state = &mut *self.state;
        let (caster, opponent) = state.combatants.split_mut(actor);

        let report = match action {
            BattleAction::BasicAttack => ActionReport::Attack(basic_attack(
                caster,
                opponent,
                self.config.basic_attack_damage,
            )),
            BattleAction::CastSpell { spell_name } => {
                let effect = state
                    .spellbook
                    .lookup(spell_name)
                    .map(|spell| spell.effect())
                    .ok_or_else(|| CastError::SpellNotFound {
                        name: spell_name.clone(),
                    })?;
                let target = if effect.targets_caster() {
                    Target::Caster
                } else {
                    Target::Other(opponent)
                };
                ActionReport::Cast(state.spellbook.cast(spell_name, caster, target)?)
            }
        };

        state.last_action = Some(ActionRecord {
            actor,
            action: action.clone(),
        });
        Ok(report)
    }

    /// See [`fallback_action`].
    pub fn fallback_action(&self, actor: Side) -> BattleAction {
        fallback_action(&*self.state, actor)
    }

    /// True when neither side can afford any spell in the spellbook.
    ///
    /// Only spells are considered; the free basic attack is ignored here.
    pub fn resources_exhausted(&self) -> bool {
        let book = &self.state.spellbook;
        let combatants = &self.state.combatants;
        !book.any_affordable(combatants.player().mana().current())
            && !book.any_affordable(combatants.enemy().mana().current())
    }

    /// Whether the configured rules end the battle in a draw now.
    pub fn should_draw(&self) -> bool {
        self.config.exhaustion_draw && self.resources_exhausted()
    }

    pub fn has_casualty(&self) -> bool {
        !self.state.combatants.both_alive()
    }

    /// Counts the round in progress as completed.
    pub fn close_round(&mut self) -> u32 {
        self.state.round += 1;
        self.state.round
    }

    /// Classifies the outcome and moves the battle into its terminal phase.
    pub fn finish(&mut self) -> Outcome {
        let combatants = &self.state.combatants;
        let outcome = Outcome::classify(combatants.player(), combatants.enemy());
        self.state.phase = TurnPhase::Ended(outcome);
        outcome
    }
}
