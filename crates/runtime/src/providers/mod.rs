//! Action provider implementations for different decision sources.

pub mod enemy;
pub mod scripted;

pub use enemy::{FallbackEnemyProvider, NarratorEnemyProvider};
pub use scripted::ScriptedActionProvider;
