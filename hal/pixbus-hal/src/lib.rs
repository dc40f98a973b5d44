//! pixbus Hardware Abstraction Layer
//!
//! Board-agnostic traits the display driver is written against. A chip
//! specific crate implements them for its GPIO type.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pixbus-driver (bus, sequencer, raster) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixbus-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌──────────────────┐
//!            │ pixbus-hal-rp2040│
//!            └──────────────────┘
//! ```
//!
//! Delays are not redefined here; the driver takes any
//! `embedded_hal::delay::DelayNs`.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

pub use gpio::{Level, OutputPin};
