//! hello-xr-app: the "hello XR" sample application
//!
//! A droid model shown either on spatial panels (full space) or in a flat
//! two-pane layout (home space, phones, tablets):
//! - Observable UI state with clamped transform and material setters
//! - Session-scoped cache so the model asset is parsed once
//! - Background model loading and entity lifecycle handling
//! - Capability-driven composition of the screen
//!
//! Controls:
//! - s: show/hide the droid, a: toggle the wave animation
//! - 1-5: pick a slider group, 0: hide sliders, r: reset the model
//! - Up/Down: focus a slider, Left/Right: adjust it
//! - Tab: switch between full space and home space
//! - q or Esc: quit

pub mod cache;
pub mod composition;
pub mod controller;
pub mod handlers;
pub mod model;
pub mod state;
pub mod store;
pub mod ui;
pub mod view_model;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hello_xr_config::{AppConfig, ModelConfig};
use hello_xr_scene::app::run_scripted;
use hello_xr_scene::renderer::{RecordingBackend, RenderBackend};
use hello_xr_scene::session::{EmbeddedSource, FileSource};
use hello_xr_scene::{
    FrameContext, ResourceSource, SpatialCapabilities, WindowSizeClass, XrApp, XrAppRunner,
    XrEvent, XrSession,
};

use cache::ModelCache;
use controller::{ModelController, ModelSettings};
use state::AppState;
use view_model::ViewModel;

/// The bundled droid asset
pub const DEFAULT_ASSET: &[u8] = include_bytes!("../assets/bugdroid_animated_wave.gltf");

/// Where the model bytes come from: the configured file or the bundled asset
pub fn default_source(model: &ModelConfig) -> Arc<dyn ResourceSource> {
    match &model.asset {
        Some(path) => Arc::new(FileSource::new(path.clone())),
        None => Arc::new(EmbeddedSource::new("bugdroid_animated_wave.gltf", DEFAULT_ASSET)),
    }
}

/// Everything needed to start the app
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub capabilities: SpatialCapabilities,
    /// Fixed window width; otherwise derived from the terminal
    pub window: Option<WindowSizeClass>,
    pub model: ModelConfig,
    pub tick_rate: Duration,
}

impl LaunchOptions {
    pub fn from_config(config: &AppConfig, has_session: bool) -> Self {
        let display = &config.display;
        Self {
            capabilities: SpatialCapabilities::resolve(
                has_session && display.xr_feature,
                display.spatial.requests_spatial(),
            ),
            window: display.window_width_dp.map(WindowSizeClass::from_width_dp),
            model: config.model.clone(),
            tick_rate: display.tick_rate(),
        }
    }
}

/// The sample application, generic over the scene session
pub struct HelloXrApp<S: XrSession> {
    session: Option<Arc<S>>,
    options: LaunchOptions,
    source: Arc<dyn ResourceSource>,
}

impl<S: XrSession + 'static> HelloXrApp<S> {
    pub fn new(session: Option<Arc<S>>, options: LaunchOptions) -> Self {
        let source = default_source(&options.model);
        Self { session, options, source }
    }

    pub fn with_source(mut self, source: Arc<dyn ResourceSource>) -> Self {
        self.source = source;
        self
    }
}

impl<S: XrSession + 'static> XrApp for HelloXrApp<S> {
    type State = AppState<S>;

    fn init(&mut self) -> Self::State {
        let cache = Arc::new(ModelCache::new(self.options.model.name.clone()));
        let controller = ModelController::new(
            self.session.clone(),
            cache,
            self.source.clone(),
            ModelSettings::from(&self.options.model),
        );
        let window = self.options.window.unwrap_or_default();

        tracing::info!(
            spatial = self.options.capabilities.spatial_ui_enabled,
            xr = self.options.capabilities.has_xr_spatial_feature,
            source = %self.source.describe(),
            "Starting hello-xr"
        );
        AppState::new(ViewModel::new(), self.options.capabilities, window, controller)
    }

    fn handle_event(&mut self, event: XrEvent, state: &mut Self::State) -> bool {
        handlers::handle_event(event, state)
    }

    fn update(&mut self, state: &mut Self::State, frame: &FrameContext) {
        state.update(frame);
    }

    fn render(&self, state: &Self::State, backend: &mut dyn RenderBackend) {
        ui::render(state, backend);
    }

    fn on_tick(&mut self, state: &mut Self::State) {
        state.tick = state.tick.wrapping_add(1);
    }

    fn on_exit(&mut self, state: &mut Self::State) {
        state.shutdown();
        tracing::info!("hello-xr stopped");
    }
}

/// Run interactively in the terminal.
///
/// Must be called with a tokio runtime entered.
pub fn run<S: XrSession + 'static>(
    session: Option<Arc<S>>,
    options: LaunchOptions,
) -> anyhow::Result<()> {
    let tick_rate = options.tick_rate;
    let window = options.window;
    let app = HelloXrApp::new(session, options);

    let mut runner = XrAppRunner::new(app)
        .context("Failed to initialize terminal")?
        .with_tick_rate(tick_rate);
    if let Some(window) = window {
        runner = runner.with_window(window);
    }
    runner.run().context("Terminal event loop failed")
}

/// Parse a whitespace separated key script such as `"s 1 right right"`
pub fn parse_keys(script: &str) -> anyhow::Result<Vec<KeyCode>> {
    script
        .split_whitespace()
        .map(|token| {
            let code = match token.to_ascii_lowercase().as_str() {
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "tab" => KeyCode::Tab,
                "esc" => KeyCode::Esc,
                _ => {
                    let mut chars = token.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => KeyCode::Char(c),
                        _ => anyhow::bail!("Unknown key '{}'", token),
                    }
                }
            };
            Ok(code)
        })
        .collect()
}

/// Run headless for `settle_ticks` frames, replay `keys` one per frame and
/// return the text of the final frame.
///
/// Ticks are spaced by the configured tick rate so background loading can
/// finish. Must be called with a multi-thread tokio runtime entered.
pub fn dump<S: XrSession + 'static>(
    session: Option<Arc<S>>,
    options: LaunchOptions,
    settle_ticks: usize,
    keys: &[KeyCode],
) -> anyhow::Result<Vec<String>> {
    let tick_rate = options.tick_rate;
    let window = options.window.unwrap_or_default();
    let mut app = HelloXrApp::new(session, options);
    let mut backend = RecordingBackend::default();

    let mut events: Vec<XrEvent> = std::iter::repeat(XrEvent::Tick).take(settle_ticks).collect();
    for code in keys {
        events.push(XrEvent::Key(KeyEvent::new(*code, KeyModifiers::NONE)));
        events.push(XrEvent::Tick);
    }
    events.push(XrEvent::Tick);

    let paced = events.into_iter().inspect(|event| {
        if event.is_tick() {
            std::thread::sleep(tick_rate);
        }
    });

    run_scripted(&mut app, paced, &mut backend, window, tick_rate)
        .context("Headless render failed")?;
    Ok(backend.text_lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hello_xr_scene::sim::SimSession;

    fn options(capabilities: SpatialCapabilities) -> LaunchOptions {
        LaunchOptions {
            capabilities,
            window: Some(WindowSizeClass::from_width_dp(1280.0)),
            model: ModelConfig::default(),
            tick_rate: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_options_from_config() {
        let config = AppConfig::from_toml_str(
            r#"
            [display]
            spatial = "off"
            window_width_dp = 500.0
            "#,
        )
        .unwrap();

        let opts = LaunchOptions::from_config(&config, true);
        assert_eq!(opts.capabilities, SpatialCapabilities::home_space());
        assert!(opts.window.unwrap().is_compact());

        let opts = LaunchOptions::from_config(&AppConfig::default(), false);
        assert_eq!(opts.capabilities, SpatialCapabilities::flat());
    }

    #[test]
    fn test_parse_keys() {
        let keys = parse_keys("s 1 Right tab").unwrap();
        assert_eq!(
            keys,
            vec![KeyCode::Char('s'), KeyCode::Char('1'), KeyCode::Right, KeyCode::Tab]
        );
        assert!(parse_keys("bogus").is_err());
        assert!(parse_keys("").unwrap().is_empty());
    }

    #[test]
    fn test_bundled_asset_parses() {
        let summary = hello_xr_scene::sim::gltf::parse(DEFAULT_ASSET).unwrap();
        assert!(summary.meshes.iter().any(|m| m == "Bugdroid"));
        assert!(summary.animations.iter().any(|a| a == "Armature|Take 001|BaseLayer"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_dump_spatial_with_keys() {
        let keys = parse_keys("s 2").unwrap();
        let lines = dump(
            Some(Arc::new(SimSession::new())),
            options(SpatialCapabilities::spatial()),
            5,
            &keys,
        )
        .unwrap();

        let text = lines.join("\n");
        assert!(text.contains("Hide droid"));
        assert!(text.contains("X rotation"));
        assert!(text.contains("mode: spatial"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_dump_without_session_is_flat() {
        let lines = dump::<SimSession>(None, options(SpatialCapabilities::flat()), 3, &[]).unwrap();

        let text = lines.join("\n");
        assert!(text.contains("mode: flat"));
        assert!(text.contains("model: unavailable"));
    }
}
