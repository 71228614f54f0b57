//! Terminal backend used to simulate the headset display

mod backend;
mod projection;

pub use backend::TerminalBackend;
pub use projection::Projection;
