//! Bit-banged 8080-style parallel bus
//!
//! One call to [`ParallelBus::transfer`] is one write cycle:
//!
//! ```text
//!  RS  ====X======================X====   command = inactive, data = active
//!  CS  ‾‾‾‾\______________________/‾‾‾‾
//!  D0-7 ======X=================X======
//!  WR  ‾‾‾‾‾‾‾‾‾‾\_____/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾   held active for `write_strobe_ns`
//! ```
//!
//! The controller latches the data lines on the rising edge of WR. Nothing
//! is read back, so a transfer cannot fail.

use embedded_hal::delay::DelayNs;
use pixbus_core::config::{BusTiming, PinAssignment, DATA_LINES};
use pixbus_hal::{Level, OutputPin};

/// The thirteen pins making up the bus
pub struct ParallelPins<P> {
    /// D0..D7, index = bit
    pub data: [P; DATA_LINES],
    pub read_enable: P,
    pub write_enable: P,
    pub register_select: P,
    pub chip_select: P,
    pub reset: P,
}

/// Active level of each control line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlLevels {
    pub read_enable: Level,
    pub write_enable: Level,
    /// Level that selects data (the other one selects a command)
    pub data_select: Level,
    pub chip_select: Level,
    pub reset: Level,
}

impl From<&PinAssignment> for ControlLevels {
    fn from(pins: &PinAssignment) -> Self {
        Self {
            read_enable: pins.read_enable.active_level(),
            write_enable: pins.write_enable.active_level(),
            data_select: pins.register_select.active_level(),
            chip_select: pins.chip_select.active_level(),
            reset: pins.reset.active_level(),
        }
    }
}

impl Default for ControlLevels {
    fn default() -> Self {
        Self::from(&PinAssignment::default())
    }
}

/// Pin-level control the sequencer needs besides byte transfers
pub trait BusControl {
    /// Drive every line to its idle level
    fn configure(&mut self);

    /// Check if [`BusControl::configure`] has run
    fn is_configured(&self) -> bool;

    /// Assert (`true`) or release the controller reset line
    fn set_reset(&mut self, asserted: bool);
}

/// Exclusive owner of the bus pins
pub struct ParallelBus<P, D> {
    pins: ParallelPins<P>,
    levels: ControlLevels,
    timing: BusTiming,
    delay: D,
    configured: bool,
}

impl<P, D> ParallelBus<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Take ownership of the pins
    ///
    /// The pins are not touched until [`BusControl::configure`].
    pub fn new(pins: ParallelPins<P>, levels: ControlLevels, timing: BusTiming, delay: D) -> Self {
        Self {
            pins,
            levels,
            timing,
            delay,
            configured: false,
        }
    }

    /// Perform one write cycle
    ///
    /// `is_data` selects data (`true`) or command (`false`) on RS.
    pub fn transfer(&mut self, byte: u8, is_data: bool) {
        debug_assert!(self.configured, "bus transfer before configure()");

        let rs = if is_data {
            self.levels.data_select
        } else {
            !self.levels.data_select
        };
        self.pins.register_select.set_level(rs);
        self.pins.chip_select.set_level(self.levels.chip_select);

        for (bit, pin) in self.pins.data.iter_mut().enumerate() {
            pin.set_state((byte >> bit) & 0x01 != 0);
        }

        self.pins.write_enable.set_level(self.levels.write_enable);
        self.delay.delay_ns(self.timing.write_strobe_ns);
        self.pins.write_enable.set_level(!self.levels.write_enable);

        self.pins.chip_select.set_level(!self.levels.chip_select);
    }

    pub fn timing(&self) -> &BusTiming {
        &self.timing
    }

    /// Give the pins and delay back
    pub fn release(self) -> (ParallelPins<P>, D) {
        (self.pins, self.delay)
    }
}

impl<P, D> BusControl for ParallelBus<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn configure(&mut self) {
        let levels = self.levels;
        self.pins.read_enable.set_level(!levels.read_enable);
        self.pins.write_enable.set_level(!levels.write_enable);
        // RS idles on the data level
        self.pins.register_select.set_level(levels.data_select);
        self.pins.chip_select.set_level(!levels.chip_select);
        self.pins.reset.set_level(!levels.reset);

        for pin in self.pins.data.iter_mut() {
            pin.set_low();
        }

        self.configured = true;
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn set_reset(&mut self, asserted: bool) {
        let level = if asserted {
            self.levels.reset
        } else {
            !self.levels.reset
        };
        self.pins.reset.set_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Op, RecordingDelay, TraceLog, TracePin};
    use std::vec::Vec;

    // Pin ids follow the default assignment: data 0-7, RD 8, WR 9, RS 10, CS 11, RST 12
    const RD: u8 = 8;
    const WR: u8 = 9;
    const RS: u8 = 10;
    const CS: u8 = 11;
    const RST: u8 = 12;

    fn make_bus(log: &TraceLog) -> ParallelBus<TracePin, RecordingDelay> {
        let pins = ParallelPins {
            data: core::array::from_fn(|i| TracePin::new(i as u8, log)),
            read_enable: TracePin::new(RD, log),
            write_enable: TracePin::new(WR, log),
            register_select: TracePin::new(RS, log),
            chip_select: TracePin::new(CS, log),
            reset: TracePin::new(RST, log),
        };
        ParallelBus::new(
            pins,
            ControlLevels::default(),
            BusTiming::default(),
            RecordingDelay::new(log),
        )
    }

    fn pin_writes(log: &TraceLog) -> Vec<(u8, bool)> {
        log.borrow()
            .iter()
            .filter_map(|op| match *op {
                Op::Pin(id, high) => Some((id, high)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_configure_idles_every_line() {
        let log = TraceLog::default();
        let mut bus = make_bus(&log);
        assert!(!bus.is_configured());

        bus.configure();
        assert!(bus.is_configured());

        let writes = pin_writes(&log);
        assert_eq!(writes.len(), 13);
        // Control lines high on the reference wiring
        for id in [RD, WR, RS, CS, RST] {
            assert!(writes.contains(&(id, true)), "pin {} not idled high", id);
        }
        for id in 0..8 {
            assert!(writes.contains(&(id, false)), "data pin {} not cleared", id);
        }
    }

    #[test]
    fn test_command_transfer_sequence() {
        let log = TraceLog::default();
        let mut bus = make_bus(&log);
        bus.configure();
        log.borrow_mut().clear();

        bus.transfer(0b1010_0101, false);

        let ops = log.borrow().clone();
        let expected = [
            Op::Pin(RS, false),
            Op::Pin(CS, false),
            Op::Pin(0, true),
            Op::Pin(1, false),
            Op::Pin(2, true),
            Op::Pin(3, false),
            Op::Pin(4, false),
            Op::Pin(5, true),
            Op::Pin(6, false),
            Op::Pin(7, true),
            Op::Pin(WR, false),
            Op::DelayNs(1_000),
            Op::Pin(WR, true),
            Op::Pin(CS, true),
        ];
        assert_eq!(ops.as_slice(), &expected[..]);
    }

    #[test]
    fn test_data_transfer_sets_rs_high() {
        let log = TraceLog::default();
        let mut bus = make_bus(&log);
        bus.configure();
        log.borrow_mut().clear();

        bus.transfer(0xFF, true);

        let writes = pin_writes(&log);
        assert_eq!(writes[0], (RS, true));
        assert!((0..8).all(|id| writes.contains(&(id, true))));
    }

    #[test]
    fn test_strobe_width_is_configurable() {
        let log = TraceLog::default();
        let mut bus = make_bus(&log);
        bus.timing = BusTiming {
            write_strobe_ns: 250,
        };
        bus.configure();
        bus.transfer(0x00, true);

        assert!(log.borrow().contains(&Op::DelayNs(250)));
    }

    #[test]
    fn test_reset_line_is_active_low() {
        let log = TraceLog::default();
        let mut bus = make_bus(&log);
        bus.configure();
        log.borrow_mut().clear();

        bus.set_reset(true);
        bus.set_reset(false);

        assert_eq!(pin_writes(&log), [(RST, false), (RST, true)]);
    }

    #[test]
    fn test_inverted_polarity() {
        let log = TraceLog::default();
        let mut bus = make_bus(&log);
        bus.levels.chip_select = Level::High;
        bus.levels.data_select = Level::Low;
        bus.configure();
        log.borrow_mut().clear();

        bus.transfer(0x00, true);

        let writes = pin_writes(&log);
        assert_eq!(writes[0], (RS, false));
        assert_eq!(writes[1], (CS, true));
        assert_eq!(*writes.last().unwrap(), (CS, false));
    }
}
