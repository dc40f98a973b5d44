//! GPIO outputs
//!
//! SIO writes on the RP2040 cannot fail, which matches the infallible
//! `pixbus_hal::OutputPin`.

use embassy_rp::gpio::{AnyPin, Level as RpLevel, Output};
use embassy_rp::Peri;
use pixbus_hal::{Level, OutputPin};

/// Push-pull output driven through embassy-rp
pub struct RpOutput<'d> {
    inner: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Claim a pin as an output at the given level
    pub fn new(pin: Peri<'d, AnyPin>, initial: Level) -> Self {
        let level = match initial {
            Level::High => RpLevel::High,
            Level::Low => RpLevel::Low,
        };
        Self {
            inner: Output::new(pin, level),
        }
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.inner.set_high();
    }

    fn set_low(&mut self) {
        self.inner.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.inner.is_set_high()
    }
}
