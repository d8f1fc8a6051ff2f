//! Spell duel client binary.
//!
//! Composition root: loads configuration, sets up logging, and runs
//! encounters in the console until the player loses, draws, or declines a
//! rematch.
//!
//! ```bash
//! # Offline, enemy uses the fallback policy
//! cargo run -p arena-client
//!
//! # With the narrator
//! PERPLEXITY_API_KEY=... cargo run -p arena-client
//! ```

use std::sync::Arc;

use anyhow::Result;
use client_bootstrap::{BattleBuilder, RuntimeConfig};
use client_frontend_cli::{CliConfig, ConsoleActionProvider, logging};
use game_core::Outcome;
use runtime::RuntimeError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli_config = CliConfig::from_env();
    let _logging = logging::setup_logging(&cli_config)?;

    let runtime_config = RuntimeConfig::from_env();
    tracing::info!(
        narrator = runtime_config.narrator.is_some(),
        enemy_choice = runtime_config.narrator_enemy_choice,
        exhaustion_draw = runtime_config.game.exhaustion_draw,
        "starting arena"
    );

    match play(BattleBuilder::new(runtime_config), &cli_config).await {
        Err(err) if is_closed(&err) => {
            tracing::info!("input closed; exiting");
            Ok(())
        }
        other => other,
    }
}

/// Runs encounters back to back, carrying the player between them.
async fn play(builder: BattleBuilder, cli_config: &CliConfig) -> Result<()> {
    let console = Arc::new(ConsoleActionProvider::stdio(
        builder.config().game.basic_attack_damage,
    ));
    let mut player = builder.spawn_player()?;
    let mut encounter = 1u32;

    loop {
        let state = builder.battle(player)?;
        let mut runtime = builder.runtime(state, Arc::clone(&console), cli_config.renderer())?;
        let report = runtime.run().await?;
        tracing::info!(
            encounter,
            outcome = %report.outcome,
            rounds = report.rounds,
            "encounter finished"
        );

        if report.outcome != Outcome::Victory || !console.confirm("Fight again?").await? {
            return Ok(());
        }

        player = runtime.into_state().combatants.into_player();
        player.restore_to_full(&builder.config().game.bounds);
        encounter += 1;
    }
}

fn is_closed(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<RuntimeError>(),
        Some(RuntimeError::ActionSourceClosed { .. })
    )
}
