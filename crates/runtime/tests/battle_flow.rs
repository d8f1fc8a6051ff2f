mod common;

use common::duel;
use game_core::{BattleAction, CastError, GameConfig, Outcome, Side, TurnPhase};
use runtime::{
    BattleEvent, BattleRuntime, FallbackEnemyProvider, ProviderKind, RecordingSink, RuntimeError,
    ScriptedActionProvider,
};

fn basic_attacks(count: usize) -> ScriptedActionProvider {
    ScriptedActionProvider::new(std::iter::repeat_n(BattleAction::BasicAttack, count))
}

#[tokio::test]
async fn fireball_then_fallback_basic_attack() {
    let mut state = duel(60, 50);
    state.combatants.get_mut(Side::Enemy).apply_mana_delta(-30);
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(state)
        .player_provider(ScriptedActionProvider::new([BattleAction::cast("Fireball")]))
        .enemy_provider(FallbackEnemyProvider)
        .sink(sink.clone())
        .build()
        .unwrap();

    assert_eq!(runtime.step().await.unwrap(), TurnPhase::PlayerActing);
    assert_eq!(runtime.step().await.unwrap(), TurnPhase::PlayerActionResolved);

    let combatants = &runtime.state().combatants;
    assert_eq!(combatants.enemy().hp().current(), 60);
    assert_eq!(combatants.player().mana().current(), 30);
    assert_eq!(combatants.player().experience(), 10);

    while runtime.state().phase != TurnPhase::RoundStart {
        runtime.step().await.unwrap();
    }

    let state = runtime.state();
    assert_eq!(state.combatants.player().hp().current(), 90);
    assert_eq!(state.round, 1);
    assert_eq!(state.current_round(), 2);

    let enemy_actions: Vec<_> = sink
        .events()
        .into_iter()
        .filter_map(|event| match event {
            BattleEvent::ActionResolved {
                actor: Side::Enemy,
                action,
                ..
            } => Some(action),
            _ => None,
        })
        .collect();
    assert_eq!(enemy_actions, vec![BattleAction::BasicAttack]);
}

#[tokio::test]
async fn basic_attacks_run_to_victory() {
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(duel(60, 50))
        .player_provider(basic_attacks(8))
        .enemy_provider(FallbackEnemyProvider)
        .sink(sink.clone())
        .build()
        .unwrap();

    let report = runtime.run().await.unwrap();

    assert_eq!(report.outcome, Outcome::Victory);
    assert_eq!(report.rounds, 8);
    // One Fireball (20) then six basic attacks (10 each) before the last round.
    assert_eq!(report.player.current_hp, 20);
    assert_eq!(report.enemy.current_hp, 0);

    let ended: Vec<u32> = sink
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::RoundEnded { round } => Some(*round),
            _ => None,
        })
        .collect();
    assert_eq!(ended, (1..=8).collect::<Vec<_>>());
    assert!(matches!(
        sink.events().last(),
        Some(BattleEvent::BattleEnded {
            outcome: Outcome::Victory,
            rounds: 8,
            ..
        })
    ));
}

#[tokio::test]
async fn invalid_player_action_is_asked_again() {
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(duel(10, 50))
        .player_provider(ScriptedActionProvider::new([
            BattleAction::cast("Meteor"),
            BattleAction::cast("Fireball"),
            BattleAction::BasicAttack,
        ]))
        .enemy_provider(FallbackEnemyProvider)
        .sink(sink.clone())
        .build()
        .unwrap();

    runtime.step().await.unwrap();
    assert_eq!(runtime.step().await.unwrap(), TurnPhase::PlayerActionResolved);

    let events = sink.events();
    let rejected: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::ActionRejected { error, .. } => Some(error.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        rejected,
        vec![
            CastError::SpellNotFound {
                name: "Meteor".into()
            },
            CastError::InsufficientMana {
                name: "Fireball".into(),
                cost: 30,
                available: 10
            },
        ]
    );
    assert_eq!(runtime.state().combatants.enemy().hp().current(), 70);
    assert_eq!(runtime.state().combatants.player().mana().current(), 10);
}

#[tokio::test]
async fn unaffordable_enemy_choice_is_overridden() {
    let mut state = duel(60, 50);
    state.combatants.get_mut(Side::Enemy).apply_mana_delta(-30);
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(state)
        .player_provider(basic_attacks(1))
        .enemy_provider(ScriptedActionProvider::new([BattleAction::cast("Fireball")]))
        .sink(sink.clone())
        .build()
        .unwrap();

    while runtime.state().phase != TurnPhase::RoundEnd {
        runtime.step().await.unwrap();
    }

    assert!(sink.events().iter().any(|event| matches!(
        event,
        BattleEvent::DecisionOverridden {
            actor: Side::Enemy,
            fallback: BattleAction::BasicAttack,
            error: CastError::InsufficientMana { .. },
            ..
        }
    )));
    assert_eq!(runtime.state().combatants.player().hp().current(), 90);
    assert_eq!(runtime.state().combatants.enemy().mana().current(), 20);
}

#[tokio::test]
async fn resource_exhaustion_is_a_draw() {
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(duel(10, 5))
        .player_provider(basic_attacks(1))
        .enemy_provider(FallbackEnemyProvider)
        .sink(sink.clone())
        .build()
        .unwrap();

    let report = runtime.run().await.unwrap();

    assert_eq!(report.outcome, Outcome::Draw);
    assert_eq!(report.rounds, 1);
    assert_eq!(report.enemy.current_hp, 70);
    assert_eq!(report.player.current_hp, 100);
    assert!(
        sink.events()
            .iter()
            .any(|event| matches!(event, BattleEvent::ResourcesExhausted { .. }))
    );
}

#[tokio::test]
async fn exhaustion_draw_can_be_disabled() {
    let mut runtime = BattleRuntime::builder()
        .state(duel(10, 5))
        .config(GameConfig::default().with_exhaustion_draw(false))
        .player_provider(basic_attacks(8))
        .enemy_provider(FallbackEnemyProvider)
        .build()
        .unwrap();

    let report = runtime.run().await.unwrap();

    assert_eq!(report.outcome, Outcome::Victory);
    assert_eq!(report.rounds, 8);
    assert_eq!(report.player.current_hp, 30);
}

#[tokio::test]
async fn lost_action_source_stops_the_loop() {
    let mut runtime = BattleRuntime::builder()
        .state(duel(60, 50))
        .player_provider(basic_attacks(0))
        .enemy_provider(FallbackEnemyProvider)
        .build()
        .unwrap();

    let err = runtime.run().await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::ScriptExhausted {
            kind: ProviderKind::Player
        }
    ));
}

#[tokio::test]
async fn fallen_combatant_ends_battle_before_first_round() {
    let mut state = duel(60, 50);
    state.combatants.get_mut(Side::Enemy).apply_damage(80);
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(state)
        .player_provider(ScriptedActionProvider::new([BattleAction::cast("Fireball")]))
        .enemy_provider(FallbackEnemyProvider)
        .sink(sink.clone())
        .build()
        .unwrap();

    let report = runtime.run().await.unwrap();
    assert_eq!(report.outcome, Outcome::Victory);
    assert_eq!(report.rounds, 0);

    let player = runtime.state().combatants.player();
    assert_eq!(player.mana().current(), 60);
    assert_eq!(player.experience(), 0);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        BattleEvent::BattleEnded {
            outcome: Outcome::Victory,
            rounds: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn finished_battle_refuses_more_steps() {
    let mut state = duel(60, 50);
    state.combatants.get_mut(Side::Enemy).apply_damage(75);
    let mut runtime = BattleRuntime::builder()
        .state(state)
        .player_provider(basic_attacks(1))
        .enemy_provider(FallbackEnemyProvider)
        .build()
        .unwrap();

    let report = runtime.run().await.unwrap();
    assert_eq!(report.outcome, Outcome::Victory);
    assert_eq!(report.rounds, 1);
    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::BattleEnded)
    ));
}

#[test]
fn builder_requires_state_and_providers() {
    assert!(matches!(
        BattleRuntime::builder().build(),
        Err(RuntimeError::MissingState)
    ));
    assert!(matches!(
        BattleRuntime::builder()
            .state(duel(60, 50))
            .player_provider(basic_attacks(1))
            .build(),
        Err(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Enemy
        })
    ));
}
