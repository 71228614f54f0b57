//! Input abstraction
//!
//! Without headset hardware, keyboard input from the terminal stands in
//! for controller and hand input.

mod event;

pub use event::XrEvent;
