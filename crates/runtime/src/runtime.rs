//! Turn-loop orchestrator.
//!
//! [`BattleRuntime`] owns one [`BattleState`] and drives it through the
//! [`TurnPhase`] machine one step at a time. Each step awaits at most one
//! collaborator (an action provider or the narrator), so turns stay strictly
//! alternating and no state is ever touched concurrently.

use game_core::{
    ActionReport, BattleAction, BattleEngine, BattleState, CombatantStatus, GameConfig, GameError,
    Outcome, Side, TurnPhase,
};

use crate::api::{ActionProvider, Decision, ProviderKind, Result, RuntimeError};
use crate::events::{BattleEvent, EventSink, NullSink};
use crate::narrator::Narrator;

/// Final summary of a finished battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub outcome: Outcome,
    /// Completed rounds, including one cut short by a death or a draw.
    pub rounds: u32,
    pub player: CombatantStatus,
    pub enemy: CombatantStatus,
}

/// Drives a single duel to completion.
pub struct BattleRuntime {
    state: BattleState,
    config: GameConfig,
    player: Box<dyn ActionProvider>,
    enemy: Box<dyn ActionProvider>,
    narrator: Narrator,
    sink: Box<dyn EventSink>,
}

impl BattleRuntime {
    pub fn builder() -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new()
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Hands the state back, e.g. to carry the player into a rematch.
    pub fn into_state(self) -> BattleState {
        self.state
    }

    /// Runs steps until the battle ends.
    pub async fn run(&mut self) -> Result<BattleReport> {
        while !self.state.phase.is_terminal() {
            self.step().await?;
        }
        Ok(self.report())
    }

    /// Advances the battle by one phase and returns the new phase.
    ///
    /// Errors only when an action source is lost or the battle is already
    /// over; cast refusals and narrator failures are handled here.
    pub async fn step(&mut self) -> Result<TurnPhase> {
        let next = match self.state.phase {
            TurnPhase::Ended(_) => return Err(RuntimeError::BattleEnded),
            TurnPhase::RoundStart => {
                if self.has_casualty() {
                    return Ok(self.finish_battle());
                }
                let round = self.state.current_round();
                tracing::info!(round, "round started");
                self.publish(BattleEvent::RoundStarted {
                    round,
                    snapshot: self.state.snapshot(),
                });
                TurnPhase::PlayerActing
            }
            TurnPhase::PlayerActing => {
                self.player_turn().await?;
                TurnPhase::PlayerActionResolved
            }
            TurnPhase::PlayerActionResolved => {
                if self.has_casualty() {
                    return Ok(self.end_battle());
                }
                TurnPhase::NarratorReactToPlayer
            }
            TurnPhase::NarratorReactToPlayer => {
                self.narrator_react(Side::Player).await;
                TurnPhase::EnemyCheck
            }
            TurnPhase::EnemyCheck => {
                if self.has_casualty() {
                    return Ok(self.end_battle());
                }
                let engine = BattleEngine::new(&mut self.state, &self.config);
                if engine.should_draw() {
                    tracing::info!("neither side can afford a spell; declaring a draw");
                    self.publish(BattleEvent::ResourcesExhausted {
                        snapshot: self.state.snapshot(),
                    });
                    return Ok(self.end_battle());
                }
                TurnPhase::EnemyActing
            }
            TurnPhase::EnemyActing => {
                self.enemy_turn().await?;
                TurnPhase::EnemyActionResolved
            }
            TurnPhase::EnemyActionResolved => {
                if self.has_casualty() {
                    return Ok(self.end_battle());
                }
                TurnPhase::NarratorReactToEnemy
            }
            TurnPhase::NarratorReactToEnemy => {
                self.narrator_react(Side::Enemy).await;
                if self.has_casualty() {
                    return Ok(self.end_battle());
                }
                TurnPhase::RoundEnd
            }
            TurnPhase::RoundEnd => {
                self.close_round();
                TurnPhase::RoundStart
            }
        };

        self.state.phase = next;
        Ok(next)
    }

    pub fn report(&self) -> BattleReport {
        let combatants = &self.state.combatants;
        BattleReport {
            outcome: self
                .state
                .outcome()
                .unwrap_or_else(|| Outcome::classify(combatants.player(), combatants.enemy())),
            rounds: self.state.round,
            player: combatants.player().status(),
            enemy: combatants.enemy().status(),
        }
    }

    /// Asks the player until a valid action arrives, then executes it.
    async fn player_turn(&mut self) -> Result<()> {
        loop {
            let decision = self
                .player
                .provide_action(Side::Player, &self.state)
                .await?;

            let mut engine = BattleEngine::new(&mut self.state, &self.config);
            match engine.execute(Side::Player, &decision.action) {
                Ok(report) => {
                    self.publish_narration(Side::Player, decision.narration);
                    self.publish_resolved(Side::Player, decision.action, report);
                    return Ok(());
                }
                Err(error) => {
                    tracing::debug!(
                        %error,
                        code = error.error_code(),
                        severity = ?error.severity(),
                        action = %decision.action,
                        "player action rejected"
                    );
                    self.publish(BattleEvent::ActionRejected {
                        actor: Side::Player,
                        action: decision.action,
                        error,
                    });
                }
            }
        }
    }

    /// Executes the enemy's proposal, or the fallback policy if it fails
    /// re-validation.
    async fn enemy_turn(&mut self) -> Result<()> {
        let Decision { action, narration } = self
            .enemy
            .provide_action(Side::Enemy, &self.state)
            .await?;

        let mut engine = BattleEngine::new(&mut self.state, &self.config);
        let (action, narration, report) = match engine.execute(Side::Enemy, &action) {
            Ok(report) => (action, narration, report),
            Err(error) => {
                let fallback = engine.fallback_action(Side::Enemy);
                let report = match engine.execute(Side::Enemy, &fallback) {
                    Ok(report) => report,
                    Err(fallback_error) => {
                        tracing::warn!(
                            %fallback_error,
                            "fallback action refused; enemy loses its turn"
                        );
                        return Ok(());
                    }
                };
                tracing::warn!(
                    %error,
                    code = error.error_code(),
                    proposed = %action,
                    fallback = %fallback,
                    "overriding enemy decision"
                );
                self.publish(BattleEvent::DecisionOverridden {
                    actor: Side::Enemy,
                    proposed: action,
                    fallback: fallback.clone(),
                    error,
                });
                (fallback, None, report)
            }
        };

        self.publish_narration(Side::Enemy, narration);
        self.publish_resolved(Side::Enemy, action, report);
        Ok(())
    }

    /// Lets the narrator react to `actor`'s action and applies its bounded
    /// event. Does nothing once someone has fallen.
    async fn narrator_react(&mut self, actor: Side) {
        if !self.narrator.is_enabled() || self.has_casualty() {
            return;
        }
        let Some(reaction) = self.narrator.react(&self.state.snapshot(), actor).await else {
            return;
        };

        self.publish_narration(actor, reaction.narration);
        if let Some(event) = reaction.event.filter(|event| !event.is_noop()) {
            let applied = event.apply(&mut self.state.combatants);
            self.publish(BattleEvent::NarratorEventApplied {
                target: applied.target,
                hp: applied.hp,
                mana: applied.mana,
            });
        }
    }

    fn has_casualty(&mut self) -> bool {
        BattleEngine::new(&mut self.state, &self.config).has_casualty()
    }

    fn close_round(&mut self) -> u32 {
        let round = BattleEngine::new(&mut self.state, &self.config).close_round();
        tracing::debug!(round, "round ended");
        self.publish(BattleEvent::RoundEnded { round });
        round
    }

    /// Counts the interrupted round, then finishes the battle.
    fn end_battle(&mut self) -> TurnPhase {
        self.close_round();
        self.finish_battle()
    }

    /// Classifies the outcome and publishes the final event.
    fn finish_battle(&mut self) -> TurnPhase {
        let outcome = BattleEngine::new(&mut self.state, &self.config).finish();
        tracing::info!(%outcome, rounds = self.state.round, "battle ended");
        self.publish(BattleEvent::BattleEnded {
            outcome,
            rounds: self.state.round,
            snapshot: self.state.snapshot(),
        });
        self.state.phase
    }

    fn publish_resolved(&mut self, actor: Side, action: BattleAction, report: ActionReport) {
        tracing::info!(%actor, %action, "action resolved");
        self.publish(BattleEvent::ActionResolved {
            actor,
            action,
            report,
            snapshot: self.state.snapshot(),
        });
    }

    fn publish_narration(&mut self, actor: Side, narration: Option<String>) {
        if let Some(text) = narration {
            self.publish(BattleEvent::Narration { actor, text });
        }
    }

    fn publish(&mut self, event: BattleEvent) {
        self.sink.publish(&event);
    }
}

/// Builder for [`BattleRuntime`].
pub struct BattleRuntimeBuilder {
    state: Option<BattleState>,
    config: GameConfig,
    player: Option<Box<dyn ActionProvider>>,
    enemy: Option<Box<dyn ActionProvider>>,
    narrator: Narrator,
    sink: Box<dyn EventSink>,
}

impl BattleRuntimeBuilder {
    fn new() -> Self {
        Self {
            state: None,
            config: GameConfig::default(),
            player: None,
            enemy: None,
            narrator: Narrator::disabled(),
            sink: Box::new(NullSink),
        }
    }

    /// Provide the battle to run (required).
    pub fn state(mut self, state: BattleState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Set player action provider (required).
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player = Some(Box::new(provider));
        self
    }

    /// Set enemy action provider (required).
    pub fn enemy_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.enemy = Some(Box::new(provider));
        self
    }

    /// Defaults to [`Narrator::disabled`].
    pub fn narrator(mut self, narrator: Narrator) -> Self {
        self.narrator = narrator;
        self
    }

    /// Defaults to [`NullSink`].
    pub fn sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn build(self) -> Result<BattleRuntime> {
        let state = self.state.ok_or(RuntimeError::MissingState)?;
        if state.phase.is_terminal() {
            return Err(RuntimeError::BattleEnded);
        }
        let player = self.player.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Player,
        })?;
        let enemy = self.enemy.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Enemy,
        })?;

        tracing::debug!(narrator = self.narrator.is_enabled(), "battle runtime built");
        Ok(BattleRuntime {
            state,
            config: self.config,
            player,
            enemy,
            narrator: self.narrator,
            sink: self.sink,
        })
    }
}
