//! Command bytes, expander bits and the power-on sequence

use crate::config::LcdFont;

use super::outcome::LcdError;

/// P0: register select (0 = instruction, 1 = data)
pub const REGISTER_SELECT: u8 = 0x01;
/// P2: enable strobe
pub const ENABLE: u8 = 0x04;
/// P3: backlight transistor
pub const BACKLIGHT: u8 = 0x08;

pub const CLEAR: u8 = 0x01;
pub const RETURN_HOME: u8 = 0x02;
/// Reset nibble sent three times to force 8-bit mode before switching to 4-bit
pub const WAKE: u8 = 0x03;
/// Cursor moves right, display does not shift
pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
pub const DISPLAY_OFF: u8 = 0x08;
/// Display on, cursor hidden
pub const DISPLAY_ON: u8 = 0x0C;
pub const CURSOR_LEFT: u8 = 0x10;
pub const CURSOR_RIGHT: u8 = 0x14;
pub const SHIFT_LEFT: u8 = 0x18;
pub const SHIFT_RIGHT: u8 = 0x1C;

/// DDRAM base address command per row, rows 1 to 4
pub const ROW_BASES: [u8; 4] = [0x80, 0xC0, 0x94, 0xD4];

/// Widest DDRAM row on any HD44780 layout
pub const MAX_COLUMNS: u8 = 40;

/// One step of the power-on sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitAction {
    /// Raw expander write, bypassing nibble framing
    Expander(u8),
    /// Full command byte
    Command(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitStep {
    pub action: InitAction,
    /// Wait after the action completes
    pub delay_ms: u32,
}

const fn step(action: InitAction, delay_ms: u32) -> InitStep {
    InitStep { action, delay_ms }
}

/// Power-on sequence for 4-bit operation
///
/// Order and delays are fixed by the controller's reset timing. Skipping a
/// step leaves it interpreting nibbles as 8-bit writes until power cycle.
pub const fn init_sequence(font: LcdFont) -> [InitStep; 9] {
    use InitAction::{Command, Expander};

    [
        step(Expander(0x00), 30),
        step(Command(WAKE), 5),
        step(Command(WAKE), 5),
        step(Command(WAKE), 5),
        step(Command(RETURN_HOME), 5),
        step(Command(font.function_set()), 50),
        step(Command(DISPLAY_ON), 50),
        step(Command(CLEAR), 50),
        step(Command(ENTRY_MODE_INCREMENT), 50),
    ]
}

/// Validated 1-based cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorPosition {
    row: u8,
    col: u8,
}

impl CursorPosition {
    /// Row 1 to 4, column 1 to 40
    pub fn new(row: u8, col: u8) -> Result<Self, LcdError> {
        if (1..=ROW_BASES.len() as u8).contains(&row) && (1..=MAX_COLUMNS).contains(&col) {
            Ok(Self { row, col })
        } else {
            Err(LcdError::InvalidPosition { row, col })
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Set-DDRAM-address command for this position
    pub fn command(&self) -> u8 {
        ROW_BASES[usize::from(self.row - 1)] + (self.col - 1)
    }
}

/// Cursor appearance, all with the display on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorStyle {
    #[default]
    Hidden,
    Underline,
    Blinking,
}

impl CursorStyle {
    pub fn command(self) -> u8 {
        match self {
            CursorStyle::Hidden => DISPLAY_ON,
            CursorStyle::Underline => 0x0E,
            CursorStyle::Blinking => 0x0F,
        }
    }
}
