mod common;

use std::sync::Arc;

use common::{CannedTransport, duel, narration_count};
use game_core::{BattleAction, EventLimits, Side, TurnPhase};
use runtime::{
    BattleEvent, BattleReport, BattleRuntime, FallbackEnemyProvider, Narrator,
    NarratorEnemyProvider, NarratorTransport, RecordingSink, ScriptedActionProvider,
};

fn basic_attacks(count: usize) -> ScriptedActionProvider {
    ScriptedActionProvider::new(std::iter::repeat_n(BattleAction::BasicAttack, count))
}

async fn full_battle(narrator: Narrator) -> (BattleReport, Vec<BattleEvent>) {
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(duel(60, 50))
        .player_provider(basic_attacks(8))
        .enemy_provider(NarratorEnemyProvider::new(narrator.clone(), 10))
        .narrator(narrator)
        .sink(sink.clone())
        .build()
        .unwrap();
    let report = runtime.run().await.unwrap();
    (report, sink.events())
}

fn narrator(transport: Arc<dyn NarratorTransport>) -> Narrator {
    Narrator::new(transport, EventLimits::DEFAULT)
}

#[tokio::test]
async fn absent_narrator_runs_the_deterministic_battle() {
    let (report, events) = full_battle(Narrator::disabled()).await;
    let (failing_report, failing_events) = full_battle(narrator(CannedTransport::silent())).await;

    assert_eq!(report.rounds, 8);
    assert_eq!(narration_count(&events), 0);
    assert_eq!(report, failing_report);
    assert_eq!(events, failing_events);
}

#[tokio::test]
async fn malformed_response_changes_nothing() {
    let transport = CannedTransport::replying("not json");
    let (report, events) = full_battle(narrator(transport.clone())).await;
    let (baseline, baseline_events) = full_battle(Narrator::disabled()).await;

    assert!(transport.calls() > 0);
    assert_eq!(report, baseline);
    assert_eq!(events, baseline_events);
}

#[tokio::test]
async fn oversized_event_is_clamped() {
    let transport = CannedTransport::replying(
        r#"```json
{"narration": "Lightning splits the sky.",
 "event": {"type": "modify_stats", "target": "enemy", "hp_delta": -500, "mana_delta": 0}}
```"#,
    );
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(duel(60, 50))
        .player_provider(basic_attacks(1))
        .enemy_provider(FallbackEnemyProvider)
        .narrator(narrator(transport.clone()))
        .sink(sink.clone())
        .build()
        .unwrap();

    while runtime.state().phase != TurnPhase::RoundEnd {
        runtime.step().await.unwrap();
    }

    // 80 - 10 (basic attack) - 10 - 10 (two clamped narrator events)
    assert_eq!(runtime.state().combatants.enemy().hp().current(), 50);
    assert_eq!(runtime.state().combatants.player().hp().current(), 80);
    assert_eq!(transport.calls(), 2);

    let applied: Vec<i64> = sink
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::NarratorEventApplied { hp, .. } => Some(hp.delta()),
            _ => None,
        })
        .collect();
    assert_eq!(applied, vec![-10, -10]);
    assert_eq!(narration_count(&sink.events()), 4);
}

#[tokio::test]
async fn narrator_event_can_end_the_battle() {
    let transport = CannedTransport::replying(
        r#"{"narration": "The goblin trips.", "event": {"type": "modify_stats", "target": "enemy", "hp_delta": -10}}"#,
    );
    let mut state = duel(60, 50);
    state.combatants.get_mut(Side::Enemy).apply_damage(75);
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(state)
        .player_provider(ScriptedActionProvider::new([BattleAction::cast("Healing")]))
        .enemy_provider(FallbackEnemyProvider)
        .narrator(narrator(transport.clone()))
        .sink(sink.clone())
        .build()
        .unwrap();

    let report = runtime.run().await.unwrap();

    assert_eq!(report.outcome, game_core::Outcome::Victory);
    assert_eq!(report.rounds, 1);
    assert_eq!(report.enemy.current_hp, 0);
    assert_eq!(transport.calls(), 1);
    assert!(!sink.events().iter().any(|event| matches!(
        event,
        BattleEvent::ActionResolved {
            actor: Side::Enemy,
            ..
        }
    )));
}

#[tokio::test]
async fn narrator_choice_outside_allow_list_falls_back() {
    let transport = CannedTransport::replying(
        r#"{"action": {"type": "cast_spell", "spell_name": "Healing"}, "narration": "The goblin mends its wounds."}"#,
    );
    let narrator = narrator(transport);
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(duel(60, 50))
        .player_provider(basic_attacks(1))
        .enemy_provider(NarratorEnemyProvider::new(narrator, 10))
        .sink(sink.clone())
        .build()
        .unwrap();

    while runtime.state().phase != TurnPhase::RoundEnd {
        runtime.step().await.unwrap();
    }

    assert_eq!(runtime.state().combatants.player().hp().current(), 80);
    assert_eq!(
        runtime.state().last_action.as_ref().map(|record| &record.action),
        Some(&BattleAction::cast("Fireball"))
    );
    assert_eq!(narration_count(&sink.events()), 0);
}

#[tokio::test]
async fn narrator_choice_inside_allow_list_is_used() {
    let transport = CannedTransport::replying(
        r#"{"action": {"type": "basic_attack"}, "narration": "The goblin swings its staff."}"#,
    );
    let narrator = narrator(transport);
    let sink = RecordingSink::new();
    let mut runtime = BattleRuntime::builder()
        .state(duel(60, 50))
        .player_provider(basic_attacks(1))
        .enemy_provider(NarratorEnemyProvider::new(narrator, 10))
        .sink(sink.clone())
        .build()
        .unwrap();

    while runtime.state().phase != TurnPhase::RoundEnd {
        runtime.step().await.unwrap();
    }

    assert_eq!(runtime.state().combatants.player().hp().current(), 90);
    assert!(sink.events().iter().any(|event| matches!(
        event,
        BattleEvent::Narration { actor: Side::Enemy, text } if text == "The goblin swings its staff."
    )));
}
