//! Command layer
//!
//! Gives bus transfers their meaning: a command byte goes out with RS on
//! the command level, its parameters follow on the data level.

use embedded_hal::delay::DelayNs;
use pixbus_hal::OutputPin;

use crate::bus::ParallelBus;

/// Controller opcodes used by this driver
///
/// Payload lengths are fixed by the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    SoftwareReset = 0x01,
    SleepOut = 0x11,
    GammaSet = 0x26,
    DisplayOn = 0x29,
    ColumnAddressSet = 0x2A,
    PageAddressSet = 0x2B,
    MemoryWrite = 0x2C,
    MemoryAccessControl = 0x36,
    PixelFormatSet = 0x3A,
    FrameRateControl = 0xB1,
    DisplayFunctionControl = 0xB6,
    PowerControl1 = 0xC0,
    PowerControl2 = 0xC1,
    VcomControl1 = 0xC5,
    VcomControl2 = 0xC7,
    PowerControlA = 0xCB,
    PowerControlB = 0xCF,
    PositiveGammaCorrection = 0xE0,
    NegativeGammaCorrection = 0xE1,
    DriverTimingControlA = 0xE8,
    DriverTimingControlB = 0xEA,
    PowerOnSequence = 0xED,
    Enable3Gamma = 0xF2,
    PumpRatioControl = 0xF7,
}

impl Command {
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    /// Number of parameter bytes that follow the opcode
    ///
    /// `MemoryWrite` takes none; the pixel stream after it is not a payload.
    pub const fn payload_len(self) -> usize {
        use Command::*;

        match self {
            SoftwareReset | SleepOut | DisplayOn | MemoryWrite => 0,
            GammaSet | MemoryAccessControl | PixelFormatSet | PowerControl1 | PowerControl2
            | VcomControl2 | Enable3Gamma | PumpRatioControl => 1,
            FrameRateControl | DisplayFunctionControl | VcomControl1 | DriverTimingControlB => 2,
            PowerControlB | DriverTimingControlA => 3,
            ColumnAddressSet | PageAddressSet | PowerOnSequence => 4,
            PowerControlA => 5,
            PositiveGammaCorrection | NegativeGammaCorrection => 15,
        }
    }
}

/// Errors from the command layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Payload length does not match the datasheet; nothing was sent
    PayloadLength {
        command: Command,
        expected: usize,
        actual: usize,
    },
}

/// Typed access to the bus
pub trait CommandInterface {
    /// Send a raw opcode with RS on the command level
    fn send_command(&mut self, opcode: u8);

    /// Send one byte with RS on the data level
    fn send_data(&mut self, byte: u8);

    /// Send bytes in order with RS on the data level
    fn send_data_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.send_data(byte);
        }
    }

    /// Send a command and its parameters
    ///
    /// The payload length is checked before anything reaches the bus.
    fn send(&mut self, command: Command, payload: &[u8]) -> Result<(), CommandError> {
        let expected = command.payload_len();
        if payload.len() != expected {
            return Err(CommandError::PayloadLength {
                command,
                expected,
                actual: payload.len(),
            });
        }

        self.send_command(command.opcode());
        self.send_data_bytes(payload);
        Ok(())
    }
}

impl<P, D> CommandInterface for ParallelBus<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn send_command(&mut self, opcode: u8) {
        self.transfer(opcode, false);
    }

    fn send_data(&mut self, byte: u8) {
        self.transfer(byte, true);
    }
}
