//! Application framework and runner

mod framework;

pub use framework::{run_scripted, FrameContext, XrApp, XrAppRunner};
