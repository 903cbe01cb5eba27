//! View model
//!
//! Turns engine state into a [`Frame`]: three short text lines and an
//! indicator colour. Frames are plain data; [`present`] pushes one to the
//! display and indicator collaborators.

use core::fmt::{self, Write};

use heapless::String;

use crate::game::GameSession;
use crate::state::State;
use crate::traits::{Color, IndicatorLight, TextDisplay, LINE_COUNT};

/// Longest line a frame holds
pub const LINE_LEN: usize = 21;

/// One line of frame text
pub type Line = String<LINE_LEN>;

/// Colours cycled on the win screen
pub const CELEBRATION: [Color; 5] = [
    Color::GREEN,
    Color::CYAN,
    Color::MAGENTA,
    Color::YELLOW,
    Color::WHITE,
];

/// Writer that drops whatever does not fit
struct Truncating<'a>(&'a mut Line);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

fn line(args: fmt::Arguments<'_>) -> Line {
    let mut out = Line::new();
    // Truncating never reports an error
    let _ = Truncating(&mut out).write_fmt(args);
    out
}

/// Three lines of text and an indicator colour
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub lines: [Line; LINE_COUNT],
    pub color: Color,
}

impl Frame {
    /// Build a frame; lines longer than [`LINE_LEN`] are cut
    pub fn new(line1: &str, line2: &str, line3: &str, color: Color) -> Self {
        Self {
            lines: [
                line(format_args!("{}", line1)),
                line(format_args!("{}", line2)),
                line(format_args!("{}", line3)),
            ],
            color,
        }
    }

    /// Shown while the accelerometer baseline is measured
    pub fn calibrating() -> Self {
        Self::new("CALIBRATING", "KEEP STILL", "", Color::YELLOW)
    }

    /// Shown once the baseline is set
    pub fn calibrated() -> Self {
        Self::new("CALIB DONE", "", "", Color::YELLOW)
    }

    /// Shown while the win celebration cycles the indicator
    pub fn celebrating() -> Self {
        Self::new("YOU WIN!", "CONGRATS", "", Color::GREEN)
    }

    /// Frame for the session's current state
    ///
    /// `cursor` indexes the highlighted difficulty on the menu.
    pub fn for_session(session: &GameSession, cursor: u8, now_ms: u32) -> Self {
        match session.state() {
            State::Menu => Self::menu(cursor),
            State::Playing => Self::playing(session, now_ms),
            State::GameOver => Self::new("GAME OVER", "PRESS BTN", "TO RESTART", Color::RED),
            State::Win => Self::new("YOU WIN!", "PRESS BTN", "TO RESTART", Color::GREEN),
        }
    }

    fn menu(cursor: u8) -> Self {
        let name = crate::config::DIFFICULTIES
            .get(usize::from(cursor))
            .map(|profile| profile.name)
            .unwrap_or("");
        Self {
            lines: [
                line(format_args!("SELECT DIFFICULTY")),
                line(format_args!("> {} <", name)),
                line(format_args!("PRESS BTN TO START")),
            ],
            color: Color::BLUE,
        }
    }

    fn playing(session: &GameSession, now_ms: u32) -> Self {
        let level = session.level();

        let Some(challenge) = session.challenge() else {
            // Between levels: nothing is running yet
            return if level <= 1 {
                Self::new("READY?", session.difficulty().name, "GET SET...", Color::BLUE)
            } else {
                Self {
                    lines: [
                        line(format_args!("LEVEL {}", level - 1)),
                        line(format_args!("GOOD!")),
                        Line::new(),
                    ],
                    color: Color::GREEN,
                }
            };
        };

        // Seconds to the nearest tenth
        let tenths = challenge.remaining_ms(now_ms).saturating_add(50) / 100;
        Self {
            lines: [
                line(format_args!("LEVEL {}", challenge.level())),
                line(format_args!("{}", challenge.target().label())),
                line(format_args!("TIME: {}.{}s", tenths / 10, tenths % 10)),
            ],
            color: Color::BLUE,
        }
    }

    pub fn line(&self, index: usize) -> &str {
        self.lines.get(index).map(|l| l.as_str()).unwrap_or("")
    }
}

/// Error from [`present`], tagged by collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PresentError<D, L> {
    Display(D),
    Indicator(L),
}

/// Push a frame to the display, then the indicator
pub fn present<D, L>(
    frame: &Frame,
    display: &mut D,
    light: &mut L,
) -> Result<(), PresentError<D::Error, L::Error>>
where
    D: TextDisplay + ?Sized,
    L: IndicatorLight + ?Sized,
{
    display
        .show(frame.line(0), frame.line(1), frame.line(2))
        .map_err(PresentError::Display)?;
    light.set(frame.color).map_err(PresentError::Indicator)
}
