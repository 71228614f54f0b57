//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hello_xr_config::{AppConfig, SpatialMode};

/// Spatial presentation requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpatialArg {
    Auto,
    On,
    Off,
}

impl From<SpatialArg> for SpatialMode {
    fn from(arg: SpatialArg) -> Self {
        match arg {
            SpatialArg::Auto => SpatialMode::Auto,
            SpatialArg::On => SpatialMode::On,
            SpatialArg::Off => SpatialMode::Off,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "hello-xr")]
#[command(about = "Hello XR sample: a droid on spatial panels, simulated in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start in full space (on), home space (off) or let the device decide
    #[arg(long, value_enum)]
    pub spatial: Option<SpatialArg>,

    /// Simulate a device without XR spatial support
    #[arg(long)]
    pub no_xr: bool,

    /// glTF or GLB file to show instead of the bundled droid
    #[arg(long)]
    pub asset: Option<PathBuf>,

    /// Fixed window width in dp instead of the terminal width
    #[arg(long)]
    pub width_dp: Option<f32>,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Render headless and print the final frame instead of running the UI
    #[arg(long)]
    pub dump: bool,

    /// Keys replayed before the dump, e.g. "s 1 right"
    #[arg(long, requires = "dump")]
    pub keys: Option<String>,
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(spatial) = self.spatial {
            config.display.spatial = spatial.into();
        }
        if self.no_xr {
            config.display.xr_feature = false;
        }
        if let Some(asset) = &self.asset {
            config.model.asset = Some(asset.clone());
        }
        if let Some(width) = self.width_dp {
            config.display.window_width_dp = Some(width);
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}
