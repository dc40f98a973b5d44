//! Board-agnostic core types for the pixbus TFT driver
//!
//! Everything here is independent of the pins and the delay source:
//!
//! - Frame geometry and the shared bounds check ([`geometry`])
//! - RGB565 color values ([`color`])
//! - Controller lifecycle state machine ([`state`])
//! - Pin assignment, bus timing and compatibility settings ([`config`])
//! - Error kinds reported by the drawing API ([`error`])

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod state;

pub use color::Rgb565;
pub use error::{ConfigError, DrawError};
pub use geometry::{AddressWindow, FrameGeometry, FRAME};
pub use state::{Lifecycle, LifecycleEvent};

#[cfg(test)]
extern crate std;
