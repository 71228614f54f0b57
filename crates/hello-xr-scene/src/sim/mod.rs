//! Simulated platform toolkit
//!
//! Stands in for the host scene graph when running in a terminal or under
//! test. Assets are validated and their mesh/animation names extracted;
//! entities and materials record what the application asked of them.

pub mod gltf;
mod session;

pub use session::{MaterialValues, SimEntity, SimMaterial, SimModel, SimSession};
