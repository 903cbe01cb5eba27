//! Screen buffer
//!
//! Three centred lines of text. The buffer only becomes dirty when the
//! content actually changes, so the firmware can call `show` every tick
//! and still redraw the panel only on change.

use core::convert::Infallible;

use heapless::String;
use reflex_core::traits::{TextDisplay, LINE_COUNT};
use reflex_core::view::LINE_LEN;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows
pub const SCREEN_ROWS: usize = LINE_COUNT;

/// Number of character columns
pub const SCREEN_COLS: usize = LINE_LEN;

/// Copy `text` into a line buffer, cut at the last whole character that fits
fn fill(line: &mut String<SCREEN_COLS>, text: &str) {
    line.clear();
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
}

/// Text screen buffer
#[derive(Clone)]
pub struct Screen {
    /// Current content
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create an empty screen that still needs its first draw
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: true,
        }
    }

    /// Set one row; marks the screen dirty only if the text differs
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };
        let mut next = String::new();
        fill(&mut next, text);
        if *line != next {
            *line = next;
            self.dirty = true;
        }
    }

    /// Get the content of a row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// All rows, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Draw the buffer to `backend` if it changed
    ///
    /// Each non-empty row is centred horizontally. Returns whether anything
    /// was drawn. On error the screen stays dirty so the next call retries.
    pub fn render<B: DisplayBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<bool, DisplayError> {
        if !self.dirty {
            return Ok(false);
        }

        let (cols, rows) = backend.dimensions();
        backend.clear()?;

        for (row, line) in self.lines.iter().enumerate().take(usize::from(rows)) {
            if line.is_empty() {
                continue;
            }
            let len = line.chars().count();
            let col = usize::from(cols).saturating_sub(len) / 2;
            backend.draw_text(row as u8, col as u8, line.as_str())?;
        }

        backend.flush()?;
        self.dirty = false;
        Ok(true)
    }
}

impl TextDisplay for Screen {
    type Error = Infallible;

    fn show(&mut self, line1: &str, line2: &str, line3: &str) -> Result<(), Self::Error> {
        self.set_line(0, line1);
        self.set_line(1, line2);
        self.set_line(2, line3);
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, " | ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
