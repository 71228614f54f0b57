//! XR application framework

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::context::WindowSizeClass;
use crate::input::XrEvent;
use crate::renderer::{terminal::TerminalBackend, RenderBackend, RenderError};

/// Per-frame information handed to [`XrApp::update`]
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub window: WindowSizeClass,
    pub delta: Duration,
    pub frame: u64,
}

impl FrameContext {
    pub fn new(window: WindowSizeClass, delta: Duration, frame: u64) -> Self {
        Self { window, delta, frame }
    }
}

/// XR application trait
pub trait XrApp {
    /// Application state type
    type State;

    /// Initialize application state
    fn init(&mut self) -> Self::State;

    /// Handle an event, return true to continue, false to quit
    fn handle_event(&mut self, event: XrEvent, state: &mut Self::State) -> bool;

    /// Update application state
    fn update(&mut self, state: &mut Self::State, frame: &FrameContext);

    /// Render the application
    fn render(&self, state: &Self::State, backend: &mut dyn RenderBackend);

    /// Called each tick (for animations and background results)
    fn on_tick(&mut self, _state: &mut Self::State) {}

    /// Called once when the loop ends, before the terminal is restored
    fn on_exit(&mut self, _state: &mut Self::State) {}
}

/// Drive one tick: update, tick hook, render
fn tick<A: XrApp>(
    app: &mut A,
    state: &mut A::State,
    backend: &mut dyn RenderBackend,
    frame: &FrameContext,
) -> Result<(), RenderError> {
    app.update(state, frame);
    app.on_tick(state);

    backend.begin_frame()?;
    app.render(state, backend);
    backend.end_frame()
}

/// Feed a fixed event sequence to an app without a terminal.
///
/// Every [`XrEvent::Tick`] advances one frame and renders to `backend`.
/// Stops early if the app asks to quit. Returns the final state.
pub fn run_scripted<A, I>(
    app: &mut A,
    events: I,
    backend: &mut dyn RenderBackend,
    window: WindowSizeClass,
    tick_rate: Duration,
) -> Result<A::State, RenderError>
where
    A: XrApp,
    I: IntoIterator<Item = XrEvent>,
{
    let mut state = app.init();
    let mut window = window;
    let mut frame = 0;

    for event in events {
        match event {
            XrEvent::Tick => {
                frame += 1;
                let ctx = FrameContext::new(window, tick_rate, frame);
                tick(app, &mut state, backend, &ctx)?;
                app.handle_event(XrEvent::Tick, &mut state);
            }
            other => {
                if let XrEvent::Resize { width, .. } = other {
                    window = WindowSizeClass::from_columns(width);
                }
                if !app.handle_event(other, &mut state) {
                    break;
                }
            }
        }
    }

    app.on_exit(&mut state);
    Ok(state)
}

/// Application runner for XR apps in a terminal
pub struct XrAppRunner<A: XrApp> {
    app: A,
    backend: TerminalBackend,
    tick_rate: Duration,
    window: Option<WindowSizeClass>,
    running: bool,
}

impl<A: XrApp> XrAppRunner<A> {
    /// Create a new app runner
    pub fn new(app: A) -> io::Result<Self> {
        let backend = TerminalBackend::new().map_err(|e| io::Error::other(e.to_string()))?;

        Ok(Self {
            app,
            backend,
            tick_rate: Duration::from_millis(50),
            window: None,
            running: true,
        })
    }

    /// Set tick rate
    pub fn with_tick_rate(mut self, rate: Duration) -> Self {
        self.tick_rate = rate;
        self
    }

    /// Pin the window size class instead of deriving it from the terminal width
    pub fn with_window(mut self, window: WindowSizeClass) -> Self {
        self.window = Some(window);
        self
    }

    fn window_class(&self) -> WindowSizeClass {
        self.window
            .unwrap_or_else(|| WindowSizeClass::from_columns(self.backend.size().0))
    }

    /// Run the application until it asks to quit or Ctrl+C is pressed
    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;

        let mut state = self.app.init();
        let result = self.event_loop(&mut state);
        self.app.on_exit(&mut state);

        // Restore the terminal even when the loop failed
        let restore = terminal::disable_raw_mode()
            .and_then(|_| execute!(io::stdout(), LeaveAlternateScreen));

        result.and(restore)
    }

    fn event_loop(&mut self, state: &mut A::State) -> io::Result<()> {
        let mut last_tick = Instant::now();
        let mut frame = 0;

        while self.running {
            let timeout = self
                .tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_default();

            if event::poll(timeout)? {
                let event = match event::read()? {
                    CrosstermEvent::Key(key)
                        if key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        self.running = false;
                        continue;
                    }
                    CrosstermEvent::Key(key) => Some(XrEvent::Key(key)),
                    CrosstermEvent::Resize(width, height) => Some(XrEvent::Resize {
                        width: width as u32,
                        height: height as u32,
                    }),
                    _ => None,
                };

                if let Some(event) = event {
                    if !self.app.handle_event(event, state) {
                        self.running = false;
                        continue;
                    }
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                frame += 1;
                let ctx = FrameContext::new(self.window_class(), last_tick.elapsed(), frame);
                tick(&mut self.app, state, &mut self.backend, &ctx)
                    .map_err(|e| io::Error::other(e.to_string()))?;

                self.app.handle_event(XrEvent::Tick, state);
                last_tick = Instant::now();
            }
        }

        Ok(())
    }
}
