//! RGB565 color values

/// 16-bit packed color: 5 bits red, 6 bits green, 5 bits blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const BLUE: Rgb565 = Rgb565(0x001F);

    /// Wrap an already packed value
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Pack channel values; out-of-range bits are masked off
    ///
    /// - `r`: 0-31
    /// - `g`: 0-63
    /// - `b`: 0-31
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16) & 0x1F;
        let g = (g as u16) & 0x3F;
        let b = (b as u16) & 0x1F;
        Self((r << 11) | (g << 5) | b)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Byte sent first on the bus
    pub const fn high_byte(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn low_byte(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Wire order: high byte first
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}
