//! Single-pixel RGB indicator

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const OFF: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(50, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 50, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 50);
    pub const YELLOW: Self = Self::rgb(50, 50, 0);
    pub const MAGENTA: Self = Self::rgb(50, 0, 50);
    pub const CYAN: Self = Self::rgb(0, 50, 50);
    pub const WHITE: Self = Self::rgb(50, 50, 50);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// True if every channel is zero
    pub const fn is_off(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// Single RGB indicator
///
/// Brightness scaling is up to the implementation.
pub trait IndicatorLight {
    /// Error type for indicator operations
    type Error;

    /// Set the indicator colour
    fn set(&mut self, color: Color) -> Result<(), Self::Error>;
}
