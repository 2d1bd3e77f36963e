//! HD44780 character LCD behind a PCF8574 I2C I/O expander
//!
//! The expander's eight outputs are wired to the LCD as:
//!
//! ```text
//! P7 P6 P5 P4 | P3        | P2 | P1 | P0
//! D7 D6 D5 D4 | backlight | E  | RW | RS
//! ```
//!
//! Each LCD byte goes out as two 4-bit nibbles, and each nibble as two
//! expander writes (enable high, then enable low) so the controller latches
//! on the falling edge. One command or character therefore costs four I2C
//! transactions.

mod command;
mod driver;
mod outcome;

pub use command::{
    init_sequence, CursorPosition, CursorStyle, InitAction, InitStep, BACKLIGHT, CLEAR,
    CURSOR_LEFT, CURSOR_RIGHT, DISPLAY_OFF, DISPLAY_ON, ENABLE, ENTRY_MODE_INCREMENT,
    REGISTER_SELECT, RETURN_HOME, ROW_BASES, SHIFT_LEFT, SHIFT_RIGHT, WAKE,
};
pub use driver::LcdDriver;
pub use outcome::{LcdError, WriteOutcome};
