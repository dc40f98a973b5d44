//! Display driver stack for a parallel 8-bit TFT controller
//!
//! Layers, leaf-first:
//!
//! - [`bus`]: owns the thirteen GPIOs, one byte per strobe
//! - [`command`]: command vs data transfers, opcode table
//! - [`controller`]: reset pulse, vendor init script, address windows
//! - [`raster`]: pixels, lines and squares
//!
//! Each layer owns the one below it; nothing holds a reference upward.
//!
//! ```ignore
//! let bus = ParallelBus::new(pins, ControlLevels::from(&assignment), timing, Delay);
//! let mut controller = Controller::new(bus, Delay);
//! controller.init()?;
//! let mut display = Display::new(controller, Quirks::default());
//! display.fill_screen(Rgb565::BLUE);
//! display.draw_line(0, 0, 239, 319, Rgb565::WHITE)?;
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod command;
pub mod controller;
pub mod raster;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod mock;

pub use bus::{BusControl, ControlLevels, ParallelBus, ParallelPins};
pub use command::{Command, CommandError, CommandInterface};
pub use controller::Controller;
pub use raster::Display;
