//! Configuration types
//!
//! Board-agnostic settings for the bus: which GPIO carries which signal,
//! strobe timing, and the compatibility switches for legacy drawing
//! behaviour. The firmware fills these in from `display.toml` at build time.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;
