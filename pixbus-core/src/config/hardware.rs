//! Pin assignment
//!
//! Thirteen GPIOs drive the panel: five control lines and an 8-bit data bus
//! where data pin *i* carries bit *i*.

use heapless::FnvIndexSet;
use pixbus_hal::Level;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of GPIOs on the target chip (RP2040: 0-29)
pub const GPIO_COUNT: u8 = 30;

/// Width of the parallel data bus
pub const DATA_LINES: usize = 8;

/// Total pins claimed by the bus
pub const BUS_PIN_COUNT: usize = DATA_LINES + 5;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create an active-high pin
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }

    /// Level that asserts this signal
    pub const fn active_level(&self) -> Level {
        if self.inverted {
            Level::Low
        } else {
            Level::High
        }
    }

    /// Level that releases this signal
    pub const fn inactive_level(&self) -> Level {
        if self.inverted {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Which GPIO drives each bus signal
///
/// For `register_select` the "active" level selects data; the inactive
/// level selects a command. All other control lines are active-low on the
/// reference wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinAssignment {
    /// D0..D7, index = bit
    pub data: [u8; DATA_LINES],
    /// RDX, unused on the write-only path but held inactive
    pub read_enable: PinConfig,
    /// WRX, strobes each byte
    pub write_enable: PinConfig,
    /// D/CX, command vs data
    pub register_select: PinConfig,
    /// CSX, frames each transfer
    pub chip_select: PinConfig,
    /// RESX, hardware reset
    pub reset: PinConfig,
}

impl Default for PinAssignment {
    /// Reference wiring: D0-D7 on GPIO 0-7, control lines on GPIO 8-12
    fn default() -> Self {
        Self {
            data: [0, 1, 2, 3, 4, 5, 6, 7],
            read_enable: PinConfig::inverted(8),
            write_enable: PinConfig::inverted(9),
            register_select: PinConfig::new(10),
            chip_select: PinConfig::inverted(11),
            reset: PinConfig::inverted(12),
        }
    }
}

impl PinAssignment {
    /// All GPIO numbers, data lines first then RD, WR, RS, CS, RST
    pub fn pins(&self) -> [u8; BUS_PIN_COUNT] {
        let mut out = [0u8; BUS_PIN_COUNT];
        out[..DATA_LINES].copy_from_slice(&self.data);
        out[DATA_LINES] = self.read_enable.pin;
        out[DATA_LINES + 1] = self.write_enable.pin;
        out[DATA_LINES + 2] = self.register_select.pin;
        out[DATA_LINES + 3] = self.chip_select.pin;
        out[DATA_LINES + 4] = self.reset.pin;
        out
    }

    /// Check every pin exists and no GPIO is used twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut allocated: FnvIndexSet<u8, 16> = FnvIndexSet::new();

        for pin in self.pins() {
            if pin >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin(pin));
            }
            match allocated.insert(pin) {
                Ok(true) => {}
                Ok(false) => return Err(ConfigError::DuplicatePin(pin)),
                // Capacity exceeds BUS_PIN_COUNT, so only a logic error lands here
                Err(_) => return Err(ConfigError::InvalidPin(pin)),
            }
        }

        Ok(())
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio11" -> active-high GPIO 11
/// - "!gpio12" -> active-low GPIO 12
pub fn parse_pin_string(s: &str) -> Result<PinConfig, ConfigError> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let num_str = s.strip_prefix("gpio").ok_or(ConfigError::InvalidPinString)?;
    let pin: u8 = num_str.parse().map_err(|_| ConfigError::InvalidPinString)?;

    if pin >= GPIO_COUNT {
        return Err(ConfigError::InvalidPin(pin));
    }

    Ok(PinConfig { pin, inverted })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_assignment_is_valid() {
        let pins = PinAssignment::default();
        assert_eq!(pins.validate(), Ok(()));
        assert_eq!(pins.pins(), [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_default_polarity() {
        let pins = PinAssignment::default();
        assert_eq!(pins.write_enable.active_level(), Level::Low);
        assert_eq!(pins.chip_select.active_level(), Level::Low);
        assert_eq!(pins.reset.active_level(), Level::Low);
        assert_eq!(pins.reset.inactive_level(), Level::High);
        // High selects data
        assert_eq!(pins.register_select.active_level(), Level::High);
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let mut pins = PinAssignment::default();
        pins.chip_select = PinConfig::inverted(3);
        assert_eq!(pins.validate(), Err(ConfigError::DuplicatePin(3)));

        let mut pins = PinAssignment::default();
        pins.data[7] = 0;
        assert_eq!(pins.validate(), Err(ConfigError::DuplicatePin(0)));
    }

    #[test]
    fn test_out_of_range_pin_rejected() {
        let mut pins = PinAssignment::default();
        pins.reset = PinConfig::inverted(30);
        assert_eq!(pins.validate(), Err(ConfigError::InvalidPin(30)));
    }

    #[test]
    fn test_parse_pin_string() {
        assert_eq!(parse_pin_string("gpio11"), Ok(PinConfig::new(11)));
        assert_eq!(parse_pin_string("!gpio12"), Ok(PinConfig::inverted(12)));
        assert_eq!(parse_pin_string(" gpio0 "), Ok(PinConfig::new(0)));
        assert_eq!(parse_pin_string("gpio29"), Ok(PinConfig::new(29)));

        // Invalid
        assert_eq!(parse_pin_string("gpio30"), Err(ConfigError::InvalidPin(30)));
        assert_eq!(parse_pin_string("pin11"), Err(ConfigError::InvalidPinString));
        assert_eq!(parse_pin_string("gpio"), Err(ConfigError::InvalidPinString));
        assert_eq!(parse_pin_string(""), Err(ConfigError::InvalidPinString));
    }
}
