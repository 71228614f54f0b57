//! hello-xr
//!
//! Usage:
//!   hello-xr                         # interactive terminal simulation
//!   hello-xr --spatial off           # start in home space
//!   hello-xr --no-xr --width-dp 400  # phone without XR support
//!   hello-xr --dump --keys "s 1"     # print the composed frame and exit

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use hello_xr::logging::{self, LogTarget};
use hello_xr::Cli;
use hello_xr_app::{dump, parse_keys, run, LaunchOptions};
use hello_xr_config::AppConfig;
use hello_xr_scene::sim::SimSession;

/// Frames rendered before scripted keys so the model can finish loading
const DUMP_SETTLE_TICKS: usize = 10;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = AppConfig::load(cli.config.clone())?;
    cli.apply(&mut config);
    config.validate()?;

    let target = logging::init(&config.logging, !cli.dump)?;
    match &source {
        Some(path) => tracing::info!("Using configuration {}", path.display()),
        None => tracing::info!("No configuration file found, using defaults"),
    }
    if let LogTarget::File(path) = &target {
        tracing::debug!("Logging to {}", path.display());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let _guard = runtime.enter();

    let session = config.display.xr_feature.then(|| Arc::new(SimSession::new()));
    let options = LaunchOptions::from_config(&config, session.is_some());

    if cli.dump {
        let keys = parse_keys(cli.keys.as_deref().unwrap_or_default())?;
        for line in dump(session, options, DUMP_SETTLE_TICKS, &keys)? {
            println!("{}", line);
        }
        return Ok(());
    }

    run(session, options)
}
