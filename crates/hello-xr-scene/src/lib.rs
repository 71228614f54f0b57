//! hello-xr-scene: scene-graph toolkit boundary for the hello-xr sample
//!
//! This crate provides everything the sample application needs from the
//! host platform, expressed as traits plus a terminal simulation:
//! - Session, glTF model, model entity and PBR material abstractions
//! - A simulated session that parses glTF/GLB assets
//! - Spatial math (vectors, quaternions, poses)
//! - Render backends (terminal with depth buffer, in-memory recording)
//! - Spatial capability signal and window size classes
//! - Spatial panel, orbiter and pane layout primitives
//! - Fade/tween animation helpers
//! - The application runner driving the terminal event loop

pub mod spatial;
pub mod renderer;
pub mod input;
pub mod layout;
pub mod animation;
pub mod context;
pub mod session;
pub mod sim;
pub mod app;

// Re-export commonly used types
pub use spatial::{Pose, Quaternion, Vector3};
pub use renderer::{Color, RenderBackend, RenderError, RenderGlyph};
pub use input::XrEvent;
pub use context::{SpatialCapabilities, WindowSizeClass, WindowWidthClass};
pub use session::{
    GltfModel, MaterialSpec, ModelEntity, PbrMaterial, ResourceSource, SceneError, XrSession,
};
pub use app::{FrameContext, XrApp, XrAppRunner};
