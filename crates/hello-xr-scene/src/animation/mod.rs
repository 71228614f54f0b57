//! Animation helpers for panel fades

mod tween;
mod easing;

pub use tween::Tween;
pub use easing::Easing;
