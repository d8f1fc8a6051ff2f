//! Perplexity-backed narrator transport.
//!
//! Implements [`runtime::NarratorTransport`] over the OpenAI-compatible chat
//! completions endpoint. Every failure collapses to `None` after being
//! logged, so a flaky network can never stop a battle.
mod client;
mod config;

pub use client::PerplexityClient;
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, PerplexityConfig,
};
