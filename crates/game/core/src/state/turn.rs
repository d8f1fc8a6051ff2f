use crate::stats::Combatant;

/// Position of a battle inside its round loop.
///
/// ```text
/// RoundStart → PlayerActing → PlayerActionResolved → NarratorReactToPlayer
///   → EnemyCheck → EnemyActing → EnemyActionResolved → NarratorReactToEnemy
///   → RoundEnd → RoundStart | Ended
/// ```
///
/// Any step may jump to [`TurnPhase::Ended`] once a terminal condition fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TurnPhase {
    #[default]
    RoundStart,
    PlayerActing,
    PlayerActionResolved,
    NarratorReactToPlayer,
    EnemyCheck,
    EnemyActing,
    EnemyActionResolved,
    NarratorReactToEnemy,
    RoundEnd,
    Ended(Outcome),
}

impl TurnPhase {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::Ended(_))
    }
}

/// How a battle finished, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Outcome {
    Victory,
    Defeat,
    Draw,
}

impl Outcome {
    /// Both alive is a draw, then a living player wins, otherwise the player
    /// lost. The order matters: an exhaustion draw leaves both sides alive.
    pub fn classify(player: &Combatant, enemy: &Combatant) -> Self {
        match (player.is_alive(), enemy.is_alive()) {
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::Victory,
            _ => Outcome::Defeat,
        }
    }
}
