//! Input events delivered to the application

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Input event for the simulated headset
#[derive(Debug, Clone)]
pub enum XrEvent {
    /// Keyboard input standing in for controller/hand input
    Key(KeyEvent),

    /// Regular tick for animations and polling background work
    Tick,

    /// Terminal/window resized
    Resize { width: u32, height: u32 },
}

impl XrEvent {
    pub fn is_tick(&self) -> bool {
        matches!(self, XrEvent::Tick)
    }

    /// Key code of a key press, ignoring repeats and releases
    pub fn pressed_key(&self) -> Option<KeyCode> {
        match self {
            XrEvent::Key(key) if key.kind == KeyEventKind::Press => Some(key.code),
            _ => None,
        }
    }
}
