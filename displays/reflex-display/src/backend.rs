//! Display backend trait
//!
//! Defines the interface a character display offers to [`Screen`](crate::Screen).

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Character display backend
///
/// Implementations handle the panel bus and font. Drawing may be buffered
/// until [`flush`](Self::flush).
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at a character cell
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Push buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Display size as (columns, rows) in characters
    fn dimensions(&self) -> (u8, u8);
}
