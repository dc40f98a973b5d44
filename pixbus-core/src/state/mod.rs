//! Controller lifecycle
//!
//! The controller only ever moves forward through its bring-up states.
//! A fresh reset is the single way back to the start.

pub mod events;
pub mod machine;

pub use events::LifecycleEvent;
pub use machine::Lifecycle;
