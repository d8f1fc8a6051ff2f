//! Runtime orchestration for the duel simulation.
//!
//! This crate wires the rules in `game-core` to the outside world: action
//! providers, the narrator adapter, and event sinks. Consumers build a
//! [`BattleRuntime`] and either [`BattleRuntime::run`] it to completion or
//! drive it one [`BattleRuntime::step`] at a time.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the turn loop and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] defines what the turn loop reports and who receives it
//! - [`narrator`] validates and applies untrusted narrator output
//! - [`providers`] holds the stock decision sources
pub mod api;
pub mod events;
pub mod narrator;
pub mod providers;
pub mod runtime;

pub use api::{ActionProvider, Decision, ProviderKind, Result, RuntimeError};
pub use events::{BattleEvent, EventSink, NullSink, RecordingSink};
pub use narrator::{
    ChatMessage, EnemyChoice, Narrator, NarratorError, NarratorEvent, NarratorTransport, Reaction,
    Role, parse_json_object, parse_reaction, sanitize_event,
};
pub use providers::{FallbackEnemyProvider, NarratorEnemyProvider, ScriptedActionProvider};
pub use runtime::{BattleReport, BattleRuntime, BattleRuntimeBuilder};
