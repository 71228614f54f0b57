//! Rendering backend abstraction for the simulated scene
//!
//! Provides a trait-based abstraction over different rendering backends:
//! - Terminal backend for interactive simulation
//! - Recording backend for headless dumps and tests

mod backend;
mod surface;
mod recording;
pub mod terminal;

pub use backend::{RenderBackend, RenderError, RenderGlyph};
pub use surface::Color;
pub use recording::{DrawCommand, RecordingBackend};
