//! Board bring-up
//!
//! Claims the thirteen bus GPIOs named in `display.toml` and wraps them in
//! the parallel bus driver.

use embassy_rp::Peripherals;
use embassy_time::Delay;
use pixbus_core::config::{DisplayConfig, PinConfig};
use pixbus_driver::{ControlLevels, ParallelBus, ParallelPins};
use pixbus_hal::Level;
use pixbus_hal_rp2040::{PinBank, PinError, RpOutput};

pub type Bus = ParallelBus<RpOutput<'static>, Delay>;

/// Take the bus pins and build the bus
///
/// Control lines start released and data lines low, so claiming the pins
/// does not glitch the panel.
pub fn parallel_bus(p: Peripherals, config: &DisplayConfig) -> Result<Bus, PinError> {
    let mut bank = PinBank::new(p);
    let pins = &config.pins;

    let mut data_pin = |bit: usize| -> Result<RpOutput<'static>, PinError> {
        Ok(RpOutput::new(bank.take(pins.data[bit])?, Level::Low))
    };
    let data = [
        data_pin(0)?,
        data_pin(1)?,
        data_pin(2)?,
        data_pin(3)?,
        data_pin(4)?,
        data_pin(5)?,
        data_pin(6)?,
        data_pin(7)?,
    ];

    let mut control_pin = |cfg: &PinConfig| -> Result<RpOutput<'static>, PinError> {
        Ok(RpOutput::new(bank.take(cfg.pin)?, cfg.inactive_level()))
    };
    let read_enable = control_pin(&pins.read_enable)?;
    let write_enable = control_pin(&pins.write_enable)?;
    let chip_select = control_pin(&pins.chip_select)?;
    let reset = control_pin(&pins.reset)?;

    // RS idles on the data level
    let register_select = RpOutput::new(
        bank.take(pins.register_select.pin)?,
        pins.register_select.active_level(),
    );

    Ok(ParallelBus::new(
        ParallelPins {
            data,
            read_enable,
            write_enable,
            register_select,
            chip_select,
            reset,
        },
        ControlLevels::from(pins),
        config.timing,
        Delay,
    ))
}
