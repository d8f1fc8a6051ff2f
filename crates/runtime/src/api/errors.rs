//! Unified error types surfaced by the runtime API.
//!
//! Cast refusals and narrator failures are handled inside the turn loop and
//! never appear here. What remains are setup problems and the loss of an
//! action source (for example, the console reaching end of input).
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("{kind} action source closed")]
    ActionSourceClosed { kind: ProviderKind },

    #[error("{kind} action source failed")]
    ActionSource {
        kind: ProviderKind,
        #[source]
        source: std::io::Error,
    },

    #[error("scripted {kind} provider ran out of actions")]
    ScriptExhausted { kind: ProviderKind },

    #[error("runtime requires a battle state before building")]
    MissingState,

    #[error("battle has already ended")]
    BattleEnded,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Enemy,
}

impl From<game_core::Side> for ProviderKind {
    fn from(side: game_core::Side) -> Self {
        match side {
            game_core::Side::Player => ProviderKind::Player,
            game_core::Side::Enemy => ProviderKind::Enemy,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Enemy => "enemy",
        };
        write!(f, "{}", label)
    }
}
