//! Recording fakes shared by the unit tests
//!
//! Pins, the bus and the delay provider all append to one log so tests can
//! check the exact interleaving of transfers and waits.

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use pixbus_hal::OutputPin;

use crate::bus::BusControl;
use crate::command::CommandInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Pin id, level written (true = high)
    Pin(u8, bool),
    Configure,
    Command(u8),
    Data(u8),
    /// Reset asserted?
    Reset(bool),
    DelayNs(u32),
    DelayMs(u32),
}

pub type TraceLog = Rc<RefCell<Vec<Op>>>;

/// GPIO that records every write
pub struct TracePin {
    id: u8,
    high: bool,
    log: TraceLog,
}

impl TracePin {
    pub fn new(id: u8, log: &TraceLog) -> Self {
        Self {
            id,
            high: false,
            log: log.clone(),
        }
    }
}

impl OutputPin for TracePin {
    fn set_high(&mut self) {
        self.high = true;
        self.log.borrow_mut().push(Op::Pin(self.id, true));
    }

    fn set_low(&mut self) {
        self.high = false;
        self.log.borrow_mut().push(Op::Pin(self.id, false));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Delay provider that returns immediately and records the request
pub struct RecordingDelay {
    log: TraceLog,
}

impl RecordingDelay {
    pub fn new(log: &TraceLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Op::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Op::DelayMs(ms));
    }
}

/// Command-level fake standing in for the parallel bus
pub struct FakeBus {
    configured: bool,
    log: TraceLog,
}

impl FakeBus {
    pub fn new(log: &TraceLog) -> Self {
        Self {
            configured: false,
            log: log.clone(),
        }
    }
}

impl BusControl for FakeBus {
    fn configure(&mut self) {
        self.configured = true;
        self.log.borrow_mut().push(Op::Configure);
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn set_reset(&mut self, asserted: bool) {
        self.log.borrow_mut().push(Op::Reset(asserted));
    }
}

impl CommandInterface for FakeBus {
    fn send_command(&mut self, opcode: u8) {
        self.log.borrow_mut().push(Op::Command(opcode));
    }

    fn send_data(&mut self, byte: u8) {
        self.log.borrow_mut().push(Op::Data(byte));
    }
}

/// A pixel write decoded from the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWrite {
    pub x: u16,
    pub y: u16,
    pub bytes: [u8; 2],
}

/// A window set followed by its pixel stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowWrite {
    /// (x1, y1, x2, y2)
    pub window: (u16, u16, u16, u16),
    pub data: Vec<u8>,
}

/// Split the command/data log into window writes
///
/// Panics if the log contains anything other than complete window sets
/// followed by data.
pub fn window_writes(log: &TraceLog) -> Vec<WindowWrite> {
    let ops: Vec<Op> = log
        .borrow()
        .iter()
        .copied()
        .filter(|op| matches!(op, Op::Command(_) | Op::Data(_)))
        .collect();

    let mut writes = Vec::new();
    let mut i = 0;
    while i < ops.len() {
        let column = span(&ops[i..], 0x2A);
        let page = span(&ops[i + 5..], 0x2B);
        assert_eq!(ops[i + 10], Op::Command(0x2C));
        i += 11;

        let mut data = Vec::new();
        while let Some(Op::Data(byte)) = ops.get(i) {
            data.push(*byte);
            i += 1;
        }

        writes.push(WindowWrite {
            window: (column.0, page.0, column.1, page.1),
            data,
        });
    }
    writes
}

/// Decode single-pixel writes, checking each is a 1×1 window with two bytes
pub fn pixel_writes(log: &TraceLog) -> Vec<PixelWrite> {
    window_writes(log)
        .into_iter()
        .map(|w| {
            let (x1, y1, x2, y2) = w.window;
            assert_eq!((x1, y1), (x2, y2), "not a single-pixel window");
            assert_eq!(w.data.len(), 2, "pixel must be two bytes");
            PixelWrite {
                x: x1,
                y: y1,
                bytes: [w.data[0], w.data[1]],
            }
        })
        .collect()
}

/// Coordinates only
pub fn touched(log: &TraceLog) -> Vec<(u16, u16)> {
    pixel_writes(log).iter().map(|p| (p.x, p.y)).collect()
}

fn span(ops: &[Op], opcode: u8) -> (u16, u16) {
    assert_eq!(ops[0], Op::Command(opcode));
    let byte = |i: usize| match ops[i] {
        Op::Data(b) => b,
        other => panic!("expected data byte, got {:?}", other),
    };
    (
        u16::from_be_bytes([byte(1), byte(2)]),
        u16::from_be_bytes([byte(3), byte(4)]),
    )
}
