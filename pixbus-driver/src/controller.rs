//! Controller sequencer
//!
//! Brings the controller from power-up to an addressable state and sets
//! address windows for the rasterizer. Every step is fire-and-forget: the
//! bus has no acknowledgement, so a byte the panel ignored is invisible here.

use embedded_hal::delay::DelayNs;
use pixbus_core::{AddressWindow, Lifecycle, LifecycleEvent, Rgb565};

use crate::bus::BusControl;
use crate::command::{Command, CommandError, CommandInterface};

/// Reset line released before the pulse (ms)
pub const RESET_SETTLE_MS: u32 = 5;

/// Reset line asserted (ms)
pub const RESET_PULSE_MS: u32 = 15;

/// Recovery after releasing reset (ms)
pub const RESET_RECOVERY_MS: u32 = 15;

/// Wait after software reset (ms)
pub const SOFTWARE_RESET_MS: u32 = 5;

/// Wait after sleep-out before further commands (ms)
pub const SLEEP_OUT_MS: u32 = 120;

/// Wait after display-on (ms)
pub const DISPLAY_ON_MS: u32 = 100;

/// Vendor initialization script, issued in order after software reset
///
/// Power rails, gamma curves, 16-bit pixel format, frame rate and
/// memory-access orientation.
pub const INIT_SCRIPT: &[(Command, &[u8])] = &[
    (Command::PowerControlB, &[0x00, 0x81, 0x30]),
    (Command::PowerOnSequence, &[0x64, 0x03, 0x12, 0x81]),
    (Command::DriverTimingControlA, &[0x85, 0x10, 0x78]),
    (Command::PowerControlA, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    (Command::PumpRatioControl, &[0x20]),
    (Command::DriverTimingControlB, &[0x00, 0x00]),
    (Command::PowerControl1, &[0x21]),
    (Command::PowerControl2, &[0x11]),
    (Command::VcomControl1, &[0x3F, 0x3C]),
    (Command::VcomControl2, &[0xB5]),
    (Command::MemoryAccessControl, &[0x48]),
    // 16 bits per pixel
    (Command::PixelFormatSet, &[0x55]),
    (Command::FrameRateControl, &[0x00, 0x18]),
    (Command::DisplayFunctionControl, &[0x0A, 0xA2]),
    (Command::Enable3Gamma, &[0x00]),
    (Command::GammaSet, &[0x01]),
    (
        Command::PositiveGammaCorrection,
        &[
            0x0F, 0x23, 0x1F, 0x0B, 0x0E, 0x08, 0x4B, 0xA8, 0x3B, 0x0A, 0x14, 0x06, 0x10, 0x09,
            0x00,
        ],
    ),
    (
        Command::NegativeGammaCorrection,
        &[
            0x00, 0x1C, 0x20, 0x04, 0x10, 0x08, 0x34, 0x47, 0x44, 0x05, 0x0B, 0x09, 0x2F, 0x36,
            0x0F,
        ],
    ),
];

/// Controller sequencer
///
/// Owns the command interface and the delay provider used for the
/// datasheet waits.
pub struct Controller<I, D> {
    iface: I,
    delay: D,
    state: Lifecycle,
}

impl<I, D> Controller<I, D>
where
    I: CommandInterface + BusControl,
    D: DelayNs,
{
    /// Take the interface, configuring the bus if that has not happened yet
    pub fn new(mut iface: I, delay: D) -> Self {
        if !iface.is_configured() {
            iface.configure();
        }

        Self {
            iface,
            delay,
            state: Lifecycle::Uninitialized,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// Full bring-up: hardware reset, then the init script
    pub fn init(&mut self) -> Result<(), CommandError> {
        self.hard_reset();
        self.run_init_script()
    }

    /// Pulse the reset line: released 5 ms, asserted 15 ms, released 15 ms
    ///
    /// On the active-low RESX line this is high → low → high.
    pub fn hard_reset(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("controller: hardware reset");

        self.advance(LifecycleEvent::ResetStarted);

        self.iface.set_reset(false);
        self.delay.delay_ms(RESET_SETTLE_MS);
        self.iface.set_reset(true);
        self.delay.delay_ms(RESET_PULSE_MS);
        self.iface.set_reset(false);
        self.delay.delay_ms(RESET_RECOVERY_MS);

        self.advance(LifecycleEvent::ResetReleased);
    }

    /// Software reset, vendor script, sleep-out and display-on
    ///
    /// Must follow [`Controller::hard_reset`].
    pub fn run_init_script(&mut self) -> Result<(), CommandError> {
        debug_assert_eq!(
            self.state,
            Lifecycle::RunningInitScript,
            "init script before hardware reset"
        );

        self.iface.send(Command::SoftwareReset, &[])?;
        self.delay.delay_ms(SOFTWARE_RESET_MS);

        for &(command, payload) in INIT_SCRIPT {
            self.iface.send(command, payload)?;
        }

        self.iface.send(Command::SleepOut, &[])?;
        self.delay.delay_ms(SLEEP_OUT_MS);

        self.iface.send(Command::DisplayOn, &[])?;
        self.delay.delay_ms(DISPLAY_ON_MS);

        self.advance(LifecycleEvent::InitScriptDone);

        #[cfg(feature = "defmt")]
        defmt::info!("controller: awake, display on");

        Ok(())
    }

    /// Select the memory region the next pixel stream lands in
    ///
    /// Issues column set, page set, then memory write. The controller then
    /// takes pixels row-major from (x1, y1), wrapping at x2, until y2 is
    /// filled.
    pub fn set_address_window(&mut self, window: &AddressWindow) {
        debug_assert!(self.state.is_ready(), "address window before init");

        // Fixed four-byte payloads, so the length check in `send` is not needed
        self.iface.send_command(Command::ColumnAddressSet.opcode());
        self.iface
            .send_data_bytes(&span_payload(window.x1(), window.x2()));

        self.iface.send_command(Command::PageAddressSet.opcode());
        self.iface
            .send_data_bytes(&span_payload(window.y1(), window.y2()));

        self.iface.send_command(Command::MemoryWrite.opcode());
    }

    /// Stream pixels into the current window, high byte first
    pub fn write_pixels<It>(&mut self, pixels: It)
    where
        It: IntoIterator<Item = Rgb565>,
    {
        for color in pixels {
            self.iface.send_data_bytes(&color.to_be_bytes());
        }
    }

    /// Send one raw byte into the pixel stream
    pub fn write_data(&mut self, byte: u8) {
        self.iface.send_data(byte);
    }

    pub fn interface(&self) -> &I {
        &self.iface
    }

    /// Give the interface and delay back
    pub fn release(self) -> (I, D) {
        (self.iface, self.delay)
    }

    fn advance(&mut self, event: LifecycleEvent) {
        self.state = self.state.transition(event);
    }
}

/// Start and end coordinate, each big-endian
fn span_payload(start: u16, end: u16) -> [u8; 4] {
    let [sh, sl] = start.to_be_bytes();
    let [eh, el] = end.to_be_bytes();
    [sh, sl, eh, el]
}
