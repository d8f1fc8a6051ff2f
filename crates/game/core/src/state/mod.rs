//! Battle session state.
//!
//! [`BattleState`] is the single source of truth for one duel: both
//! combatants, the shared spellbook, the round counter, and the current
//! [`TurnPhase`]. It is mutated only through [`crate::engine::BattleEngine`]
//! and the runtime's narrator adapter, which both go through the
//! combatants' clamped mutation paths.
mod turn;

pub use turn::{Outcome, TurnPhase};

use crate::action::ActionRecord;
use crate::error::ValidationError;
use crate::spell::Spellbook;
use crate::stats::{Combatant, CombatantStatus, Side};

/// Exactly two combatants, addressed by side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatants {
    player: Combatant,
    enemy: Combatant,
}

impl Combatants {
    pub fn new(player: Combatant, enemy: Combatant) -> Result<Self, ValidationError> {
        for (combatant, expected) in [(&player, Side::Player), (&enemy, Side::Enemy)] {
            if combatant.side() != expected {
                return Err(ValidationError::WrongSide {
                    name: combatant.name().to_string(),
                    expected,
                });
            }
        }
        Ok(Self { player, enemy })
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn get(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Borrows the acting combatant and its opponent at the same time.
    pub fn split_mut(&mut self, actor: Side) -> (&mut Combatant, &mut Combatant) {
        match actor {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        }
    }

    pub fn both_alive(&self) -> bool {
        self.player.is_alive() && self.enemy.is_alive()
    }

    /// Consumes the pair, handing back the player for the next encounter.
    pub fn into_player(self) -> Combatant {
        self.player
    }
}

/// Complete state of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleState {
    pub combatants: Combatants,
    pub spellbook: Spellbook,
    /// Completed rounds; 0 before the first round ends.
    pub round: u32,
    pub phase: TurnPhase,
    pub last_action: Option<ActionRecord>,
}

impl BattleState {
    pub fn new(combatants: Combatants, spellbook: Spellbook) -> Self {
        Self {
            combatants,
            spellbook,
            round: 0,
            phase: TurnPhase::RoundStart,
            last_action: None,
        }
    }

    /// Number of the round in progress (1-based).
    pub fn current_round(&self) -> u32 {
        if self.phase.is_terminal() {
            self.round
        } else {
            self.round + 1
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            TurnPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            round: self.current_round(),
            player: self.combatants.player().status(),
            enemy: self.combatants.enemy().status(),
            last_action: self.last_action.clone(),
        }
    }
}

/// Serializable view of a battle, handed to presentation and the narrator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BattleSnapshot {
    pub round: u32,
    pub player: CombatantStatus,
    pub enemy: CombatantStatus,
    pub last_action: Option<ActionRecord>,
}

impl BattleSnapshot {
    pub fn combatant(&self, side: Side) -> &CombatantStatus {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }
}
