//! Battle events and the sinks that consume them.
//!
//! The runtime publishes a [`BattleEvent`] for every observable step of the
//! turn loop. Frontends render them; tests record them.

mod sink;
mod types;

pub use sink::{EventSink, NullSink, RecordingSink};
pub use types::BattleEvent;
