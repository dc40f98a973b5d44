//! Error kinds
//!
//! There is deliberately no "transfer failed" error: the bus is write-only
//! and the controller never acknowledges a byte.

/// Errors reported by the drawing API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawError {
    /// A coordinate lies outside the frame.
    ///
    /// Carries the first offending point. Coordinates that overflowed while
    /// computing a shape's far corner are saturated to `u16::MAX`.
    OutOfBounds { x: u16, y: u16 },
}

/// Errors found while validating a pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// GPIO number does not exist on the chip
    InvalidPin(u8),
    /// GPIO number is assigned to more than one role
    DuplicatePin(u8),
    /// Pin string is not of the form `gpioN` / `!gpioN`
    InvalidPinString,
}
