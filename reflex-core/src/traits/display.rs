//! Text display trait

/// Number of text lines a display shows
pub const LINE_COUNT: usize = 3;

/// Three-line text display
///
/// Every call replaces all previously shown content. Layout, fonts and
/// the panel bus are the implementation's concern.
pub trait TextDisplay {
    /// Error type for display operations
    type Error;

    /// Show up to three short lines; empty lines are left blank
    fn show(&mut self, line1: &str, line2: &str, line3: &str) -> Result<(), Self::Error>;
}
