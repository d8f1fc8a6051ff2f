//! Console presentation: ASCII visuals, colors, and the event renderer.
pub mod art;
mod renderer;
mod theme;

pub use renderer::ConsoleRenderer;
pub use theme::{Theme, Tone};
