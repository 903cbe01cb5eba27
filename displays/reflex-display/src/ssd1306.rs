//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C. Text is drawn
//! into a page buffer with the 6x10 font from embedded-graphics, three rows
//! of 21 characters centred on y = 16, 32 and 48.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{SCREEN_COLS, SCREEN_ROWS};

/// SSD1306 I2C address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Glyph cell width (px)
const CHAR_WIDTH: i32 = 6;

/// Left margin so 21 cells sit in the middle of 128 columns (px)
const X_OFFSET: i32 = 1;

/// Top edge of each text row (px)
const ROW_TOP: [i32; SCREEN_ROWS] = [11, 27, 43];

/// Control byte before a command
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte before display data
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_ADDRESSING_MODE: u8 = 0x20;
    pub const SET_COLUMN_RANGE: u8 = 0x21;
    pub const SET_PAGE_RANGE: u8 = 0x22;
}

/// Power-up sequence, one byte per command write
const INIT_SEQUENCE: [u8; 25] = [
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::SET_ADDRESSING_MODE,
    0x00,                  // Horizontal
    cmd::SET_SEG_REMAP,    // Flip horizontally
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::RESUME_FROM_RAM,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// Frame buffer, one byte per column per 8-pixel page (LSB on top)
struct PageBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl PageBuffer {
    fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }
}

impl OriginDimensions for PageBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for PageBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Off-panel pixels are clipped
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let bit = 1u8 << (y % 8);
            let byte = &mut self.pages[y / 8][x];
            match color {
                BinaryColor::On => *byte |= bit,
                BinaryColor::Off => *byte &= !bit,
            }
        }
        Ok(())
    }
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    frame: PageBuffer,
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            frame: PageBuffer {
                pages: [[0; WIDTH]; PAGES],
            },
            initialized: false,
        }
    }

    /// Initialize the display
    ///
    /// Until this succeeds, [`flush`](DisplayBackend::flush) reports
    /// [`DisplayError::NotInitialized`].
    pub fn init(&mut self) -> Result<(), DisplayError> {
        for &c in INIT_SEQUENCE.iter() {
            self.command(c)?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Send a command to the display
    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, c])
            .map_err(|_| DisplayError::Communication)
    }
}

impl<I2C: I2c> DisplayBackend for Ssd1306<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.clear();
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        let top = ROW_TOP
            .get(usize::from(row))
            .copied()
            .ok_or(DisplayError::InvalidCoordinates)?;
        let origin = Point::new(X_OFFSET + i32::from(col) * CHAR_WIDTH, top);
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

        match Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut self.frame) {
            Ok(_) => Ok(()),
            Err(never) => match never {},
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        // Horizontal mode wraps page to page across the whole panel
        for c in [
            cmd::SET_COLUMN_RANGE,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_RANGE,
            0,
            (PAGES - 1) as u8,
        ] {
            self.command(c)?;
        }

        for page in 0..PAGES {
            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.frame.pages[page]);
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }

        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}
