//! Frame geometry and address windows
//!
//! All bounds checking for the drawing API goes through
//! [`FrameGeometry::check_point`]; an [`AddressWindow`] can only be built
//! by the geometry, so holding one means its corners are on-screen.

use crate::error::DrawError;

/// Panel width in pixels (portrait)
pub const WIDTH: u16 = 240;

/// Panel height in pixels (portrait)
pub const HEIGHT: u16 = 320;

/// The panel driven by this crate
pub const FRAME: FrameGeometry = FrameGeometry::new(WIDTH, HEIGHT);

/// Fixed frame dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameGeometry {
    width: u16,
    height: u16,
}

impl FrameGeometry {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn pixel_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if a point lies inside `[0, width) × [0, height)`
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Shared bounds check for every drawing primitive
    pub fn check_point(&self, x: u16, y: u16) -> Result<(), DrawError> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(DrawError::OutOfBounds { x, y })
        }
    }

    /// Window spanning two corners, given in any order
    pub fn window(&self, x1: u16, y1: u16, x2: u16, y2: u16) -> Result<AddressWindow, DrawError> {
        self.check_point(x1, y1)?;
        self.check_point(x2, y2)?;

        Ok(AddressWindow {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        })
    }

    /// Single-cell window at (x, y)
    pub fn pixel(&self, x: u16, y: u16) -> Result<AddressWindow, DrawError> {
        self.window(x, y, x, y)
    }

    /// Window covering the whole frame
    pub const fn full(&self) -> AddressWindow {
        AddressWindow {
            x1: 0,
            y1: 0,
            x2: self.width - 1,
            y2: self.height - 1,
        }
    }
}

/// Far corner of the square from (x, y) with `size + 1` pixels per side
///
/// Not bounds-checked; the sum saturates at `u16::MAX` so it can never land
/// back on-screen by wrapping.
pub const fn square_end(x: u16, y: u16, size: u16) -> (u16, u16) {
    (
        saturate(x as u32 + size as u32),
        saturate(y as u32 + size as u32),
    )
}

const fn saturate(v: u32) -> u16 {
    if v > u16::MAX as u32 {
        u16::MAX
    } else {
        v as u16
    }
}

/// Rectangular region of controller memory, corners inclusive
///
/// Invariant: `x1 <= x2 < width`, `y1 <= y2 < height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressWindow {
    x1: u16,
    y1: u16,
    x2: u16,
    y2: u16,
}

impl AddressWindow {
    pub const fn x1(&self) -> u16 {
        self.x1
    }

    pub const fn y1(&self) -> u16 {
        self.y1
    }

    pub const fn x2(&self) -> u16 {
        self.x2
    }

    pub const fn y2(&self) -> u16 {
        self.y2
    }

    pub const fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    pub const fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }

    /// Number of pixels the controller expects after memory-write
    pub const fn pixel_count(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_window_orders_corners() {
        let w = FRAME.window(15, 30, 5, 10).unwrap();
        assert_eq!((w.x1(), w.y1(), w.x2(), w.y2()), (5, 10, 15, 30));
        assert_eq!(w.width(), 11);
        assert_eq!(w.height(), 21);
    }

    #[test]
    fn test_edges() {
        assert!(FRAME.check_point(239, 319).is_ok());
        assert_eq!(
            FRAME.check_point(240, 0),
            Err(DrawError::OutOfBounds { x: 240, y: 0 })
        );
        assert_eq!(
            FRAME.check_point(0, 320),
            Err(DrawError::OutOfBounds { x: 0, y: 320 })
        );
    }

    #[test]
    fn test_square_end_is_inclusive() {
        assert_eq!(square_end(20, 20, 5), (25, 25));
        assert_eq!(square_end(7, 9, 0), (7, 9));
    }

    #[test]
    fn test_square_end_saturates() {
        assert_eq!(square_end(230, 0, u16::MAX), (u16::MAX, u16::MAX));
        // Off-screen, but not wrapped back into the frame
        assert!(FRAME.check_point(square_end(235, 0, 5).0, 0).is_err());
    }

    #[test]
    fn test_full_frame() {
        let w = FRAME.full();
        assert_eq!((w.x2(), w.y2()), (239, 319));
        assert_eq!(w.pixel_count(), FRAME.pixel_count());
    }

    proptest! {
        #[test]
        fn in_bounds_points_give_single_cell(x in 0u16..WIDTH, y in 0u16..HEIGHT) {
            let w = FRAME.pixel(x, y).unwrap();
            assert_eq!((w.x1(), w.y1(), w.x2(), w.y2()), (x, y, x, y));
            assert_eq!(w.pixel_count(), 1);
        }

        #[test]
        fn wide_points_are_rejected(x in WIDTH..=u16::MAX, y in 0u16..HEIGHT) {
            assert_eq!(FRAME.pixel(x, y), Err(DrawError::OutOfBounds { x, y }));
        }

        #[test]
        fn tall_points_are_rejected(x in 0u16..WIDTH, y in HEIGHT..=u16::MAX) {
            assert_eq!(FRAME.pixel(x, y), Err(DrawError::OutOfBounds { x, y }));
        }
    }
}
