//! RP2040-specific HAL for the pixbus display driver
//!
//! - [`gpio::RpOutput`]: `pixbus_hal::OutputPin` for embassy-rp outputs
//! - [`pins::PinBank`]: take GPIOs by number, as read from `display.toml`

#![no_std]

pub mod gpio;
pub mod pins;

pub use gpio::RpOutput;
pub use pins::{PinBank, PinError};
