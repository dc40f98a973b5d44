//! Rasterization engine
//!
//! Turns drawing requests into address windows and pixel bytes. Pixels and
//! lines check their coordinates through [`FrameGeometry`] before any bus
//! traffic; an out-of-bounds request is reported and draws nothing. Squares
//! are built from lines and clip segment by segment.
//!
//! Lines and squares are drawn one pixel at a time, each pixel getting its
//! own 1×1 window. [`Display::fill_window`] streams a whole region after a
//! single window set and is the fast path for solid fills.

use embedded_hal::delay::DelayNs;
use pixbus_core::config::Quirks;
use pixbus_core::geometry::square_end;
use pixbus_core::{AddressWindow, DrawError, FrameGeometry, Rgb565, FRAME};

use crate::bus::BusControl;
use crate::command::CommandInterface;
use crate::controller::Controller;

/// Byte sent in place of the low byte when `pixel_low_byte_ff` is set
const LEGACY_LOW_BYTE: u8 = 0xFF;

/// Drawing surface on top of an initialized controller
pub struct Display<I, D> {
    controller: Controller<I, D>,
    frame: FrameGeometry,
    quirks: Quirks,
}

impl<I, D> Display<I, D>
where
    I: CommandInterface + BusControl,
    D: DelayNs,
{
    /// Wrap a controller that has completed [`Controller::init`]
    pub fn new(controller: Controller<I, D>, quirks: Quirks) -> Self {
        debug_assert!(controller.state().is_ready(), "display before init");

        Self {
            controller,
            frame: FRAME,
            quirks,
        }
    }

    pub fn frame(&self) -> &FrameGeometry {
        &self.frame
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn controller(&self) -> &Controller<I, D> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<I, D> {
        &mut self.controller
    }

    /// Hand the controller back
    pub fn release(self) -> Controller<I, D> {
        self.controller
    }

    /// Set one pixel
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), DrawError> {
        let window = self.frame.pixel(x, y).map_err(report)?;
        self.controller.set_address_window(&window);

        self.controller.write_data(color.high_byte());
        if self.quirks.pixel_low_byte_ff {
            self.controller.write_data(LEGACY_LOW_BYTE);
        } else {
            self.controller.write_data(color.low_byte());
        }

        Ok(())
    }

    /// Draw a line between two points, both ends included
    ///
    /// All four coordinates are checked first; if any is off-screen nothing
    /// is drawn.
    pub fn draw_line(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Rgb565,
    ) -> Result<(), DrawError> {
        self.frame.check_point(x1, y1).map_err(report)?;
        self.frame.check_point(x2, y2).map_err(report)?;

        if x1 == x2 {
            for y in y1.min(y2)..=y1.max(y2) {
                self.draw_pixel(x1, y, color)?;
            }
            return Ok(());
        }

        if y1 == y2 {
            for x in x1.min(x2)..=x1.max(x2) {
                self.draw_pixel(x, y1, color)?;
            }
            return Ok(());
        }

        self.bresenham(x1, y1, x2, y2, color)
    }

    /// Draw a square with corners (x, y) and (x + size, y + size)
    ///
    /// Corners are inclusive, so each side covers `size + 1` pixels. Each
    /// row (filled) or edge (outline) is a separate [`Self::draw_line`] with
    /// its own bounds check: segments that fit are drawn, the rest are
    /// skipped, and the first rejection is returned.
    pub fn draw_rectangle(
        &mut self,
        x: u16,
        y: u16,
        size: u16,
        color: Rgb565,
        filled: bool,
    ) -> Result<(), DrawError> {
        let (end_x, end_y) = square_end(x, y, size);
        let mut first = None;

        if filled {
            for row in y..=end_y {
                if let Err(e) = self.draw_line(x, row, end_x, row, color) {
                    // Every later row fails the same way
                    first = Some(e);
                    break;
                }
            }
        } else {
            let edges = [
                (x, y, end_x, y),
                (end_x, y, end_x, end_y),
                (x, end_y, end_x, end_y),
                (x, y, x, end_y),
            ];
            for (x1, y1, x2, y2) in edges {
                if let Err(e) = self.draw_line(x1, y1, x2, y2, color) {
                    first.get_or_insert(e);
                }
            }
        }

        first.map_or(Ok(()), Err)
    }

    /// Fill a window with one color using a single window set
    pub fn fill_window(&mut self, window: &AddressWindow, color: Rgb565) {
        self.controller.set_address_window(window);
        self.controller
            .write_pixels(core::iter::repeat(color).take(window.pixel_count() as usize));
    }

    /// Fill the whole frame
    pub fn fill_screen(&mut self, color: Rgb565) {
        let window = self.frame.full();
        self.fill_window(&window, color);
    }

    /// Integer line stepping for the general (non axis-aligned) case
    ///
    /// Endpoints are already known to be on-screen, and every plotted point
    /// lies between them.
    fn bresenham(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Rgb565,
    ) -> Result<(), DrawError> {
        let (x1, y1, x2, y2) = (x1 as i32, y1 as i32, x2 as i32, y2 as i32);
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();

        if dy >= dx && self.quirks.skip_steep_lines {
            return Ok(());
        }

        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = (if dx > dy { dx } else { -dy }) / 2;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.draw_pixel(x as u16, y as u16, color)?;
            if x == x2 && y == y2 {
                break;
            }

            let e2 = err;
            if e2 > -dx {
                err -= dy;
                x += sx;
            }
            if e2 < dy {
                err += dx;
                y += sy;
            }
        }

        Ok(())
    }
}

/// Log an out-of-bounds request and pass the error on
fn report(err: DrawError) -> DrawError {
    #[cfg(feature = "defmt")]
    defmt::warn!("draw rejected: {}", err);
    err
}
