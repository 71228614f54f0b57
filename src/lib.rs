//! hello-xr: terminal simulation of the "hello XR" spatial sample
//!
//! The workspace is split into:
//! - `hello-xr-scene`: session/model/entity/material traits, spatial math,
//!   render backends and the terminal app runner
//! - `hello-xr-config`: TOML configuration and file lookup
//! - `hello-xr-app`: UI state, model cache, model controller, composition
//!   and rendering
//!
//! This crate adds the command line surface and logging setup.

pub mod cli;
pub mod logging;

pub use hello_xr_app as app;
pub use hello_xr_config as config;
pub use hello_xr_scene as scene;

pub use cli::Cli;
