//! Bus timing and drawing compatibility settings

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::PinAssignment;

/// Minimum WRX low time from the controller datasheet, with margin
pub const DEFAULT_WRITE_STROBE_NS: u32 = 1_000;

/// Bus timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BusTiming {
    /// How long write-enable is held active per byte (ns)
    pub write_strobe_ns: u32,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self {
            write_strobe_ns: DEFAULT_WRITE_STROBE_NS,
        }
    }
}

/// Switches that reproduce the legacy firmware's drawing bugs
///
/// Both default to `false` (corrected behaviour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Quirks {
    /// Send `0xFF` instead of the color's low byte for single pixels
    pub pixel_low_byte_ff: bool,
    /// Draw nothing for lines where `dy >= dx` (other than vertical runs)
    pub skip_steep_lines: bool,
}

impl Quirks {
    /// Byte-for-byte compatible with the legacy firmware
    pub const LEGACY: Quirks = Quirks {
        pixel_low_byte_ff: true,
        skip_steep_lines: true,
    };
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    pub pins: PinAssignment,
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: BusTiming,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quirks: Quirks,
}
