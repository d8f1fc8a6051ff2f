//! Assembles battle runtimes from configuration.
use std::sync::Arc;

use anyhow::{Context, Result};
use client_narrator::PerplexityClient;
use game_core::{BattleState, Combatant, Side};
use runtime::{
    ActionProvider, BattleRuntime, EventSink, FallbackEnemyProvider, Narrator,
    NarratorEnemyProvider, NarratorTransport,
};

use crate::config::RuntimeConfig;
use crate::roster;

/// Builds one [`BattleRuntime`] per encounter, sharing the narrator.
pub struct BattleBuilder {
    config: RuntimeConfig,
    narrator: Narrator,
}

impl BattleBuilder {
    /// Uses the Perplexity transport when an API key is configured.
    ///
    /// A client that cannot be set up leaves the narrator disabled.
    pub fn new(config: RuntimeConfig) -> Self {
        let transport = config
            .narrator
            .clone()
            .and_then(|narrator| match PerplexityClient::new(narrator) {
                Ok(client) => Some(Arc::new(client) as Arc<dyn NarratorTransport>),
                Err(err) => {
                    tracing::error!(%err, "failed to set up narrator client");
                    None
                }
            });
        Self::with_transport(config, transport)
    }

    /// Provide a custom narrator transport (or none at all).
    pub fn with_transport(
        config: RuntimeConfig,
        transport: Option<Arc<dyn NarratorTransport>>,
    ) -> Self {
        let limits = config.game.event_limits;
        let narrator = match transport {
            Some(transport) => Narrator::new(transport, limits),
            None => {
                tracing::info!("no narrator configured; enemy uses the fallback policy");
                Narrator::disabled()
            }
        };
        Self { config, narrator }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    /// Creates the player described by the configuration.
    pub fn spawn_player(&self) -> Result<Combatant> {
        roster::spawn_combatant(&self.config.player, Side::Player, &self.config.game.bounds)
            .with_context(|| format!("invalid player setup {:?}", self.config.player))
    }

    /// Pairs `player` with a fresh enemy.
    pub fn battle(&self, player: Combatant) -> Result<BattleState> {
        roster::new_battle(player, &self.config)
    }

    /// Wires a runtime for `state`.
    pub fn runtime(
        &self,
        state: BattleState,
        player: impl ActionProvider + 'static,
        sink: impl EventSink + 'static,
    ) -> Result<BattleRuntime> {
        let builder = BattleRuntime::builder()
            .state(state)
            .config(self.config.game.clone())
            .player_provider(player)
            .narrator(self.narrator.clone())
            .sink(sink);

        let builder = if self.narrator.is_enabled() && self.config.narrator_enemy_choice {
            builder.enemy_provider(NarratorEnemyProvider::new(
                self.narrator.clone(),
                self.config.game.basic_attack_damage,
            ))
        } else {
            builder.enemy_provider(FallbackEnemyProvider)
        };

        builder.build().context("failed to assemble battle runtime")
    }
}
