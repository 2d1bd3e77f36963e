//! LCD driver

use core::fmt;

use rvperiph_hal::I2cRegisters;

use super::command::{
    init_sequence, CursorPosition, CursorStyle, InitAction, BACKLIGHT, CLEAR, CURSOR_LEFT,
    CURSOR_RIGHT, DISPLAY_OFF, ENABLE, REGISTER_SELECT, RETURN_HOME, SHIFT_LEFT, SHIFT_RIGHT,
};
use super::outcome::{LcdError, WriteOutcome};
use crate::config::LcdConfig;
use crate::i2c::{BusState, I2cBus};
use crate::time::Clock;

/// Settle time after clear and display shift commands
const SLOW_COMMAND_MS: u64 = 40;

/// Target register of a nibble
#[derive(Clone, Copy)]
enum Register {
    Instruction,
    Data,
}

impl Register {
    fn select_bit(self) -> u8 {
        match self {
            Register::Instruction => 0,
            Register::Data => REGISTER_SELECT,
        }
    }
}

/// HD44780 driver over an owned I2C bus
///
/// Every method returns the acknowledge summary of the writes it made.
/// `Err` is reserved for bus failures and invalid arguments.
pub struct LcdDriver<R, C> {
    bus: I2cBus<R, C>,
    config: LcdConfig,
    backlight: bool,
}

impl<R: I2cRegisters, C: Clock> LcdDriver<R, C> {
    /// Wrap a bus. Nothing is sent until [`init`](Self::init).
    pub fn new(bus: I2cBus<R, C>, config: LcdConfig) -> Self {
        Self {
            bus,
            backlight: config.backlight,
            config,
        }
    }

    /// Run the power-on sequence
    ///
    /// All steps are sent even if some are not acknowledged.
    pub fn init(&mut self) -> Result<WriteOutcome, LcdError> {
        #[cfg(feature = "defmt")]
        defmt::debug!("lcd: init at {=u8:#x}", self.config.address);

        let mut outcome = WriteOutcome::Success;
        for step in init_sequence(self.config.font) {
            let result = match step.action {
                InitAction::Expander(byte) => self.expander_write(byte)?,
                InitAction::Command(cmd) => self.command(cmd)?,
            };
            outcome = outcome.and(result);
            self.bus.clock().delay_ms(u64::from(step.delay_ms));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("lcd: init done, {}", outcome);
        Ok(outcome)
    }

    /// One expander transaction: address, `data` with the backlight bit, stop
    ///
    /// A bus failure mid-transaction still sends a best-effort STOP.
    pub fn expander_write(&mut self, data: u8) -> Result<WriteOutcome, LcdError> {
        let wire_address = self.config.address << 1;
        let byte = data | self.backlight_bit();

        let acks = self
            .bus
            .start_address(wire_address)
            .and_then(|address| Ok((address, self.bus.write_byte(byte)?)));

        match acks {
            Ok((address, data)) => {
                self.bus.stop()?;
                Ok(WriteOutcome::from_acks(address, data))
            }
            Err(err) => {
                if self.bus.state() != BusState::Idle {
                    let _ = self.bus.stop();
                }
                Err(err.into())
            }
        }
    }

    /// Strobe one nibble (already in the high four bits) into the controller
    fn write_nibble(&mut self, nibble: u8, register: Register) -> Result<WriteOutcome, LcdError> {
        let bits = nibble | register.select_bit();
        let high = self.expander_write(bits | ENABLE)?;
        let low = self.expander_write(bits & !ENABLE)?;
        self.bus
            .clock()
            .delay_us(u64::from(self.config.nibble_settle_us));
        Ok(high.and(low))
    }

    fn send(&mut self, byte: u8, register: Register) -> Result<WriteOutcome, LcdError> {
        let high = self.write_nibble(byte & 0xF0, register)?;
        let low = self.write_nibble((byte << 4) & 0xF0, register)?;
        Ok(high.and(low))
    }

    /// Send an instruction byte
    pub fn command(&mut self, cmd: u8) -> Result<WriteOutcome, LcdError> {
        self.send(cmd, Register::Instruction)
    }

    /// Write one character at the cursor
    pub fn write_char(&mut self, ch: u8) -> Result<WriteOutcome, LcdError> {
        self.send(ch, Register::Data)
    }

    /// Move the cursor to 1-based `row`, `col`
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<WriteOutcome, LcdError> {
        let position = CursorPosition::new(row, col)?;
        self.command(position.command())
    }

    /// Write bytes up to the first NUL
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<WriteOutcome, LcdError> {
        let mut outcome = WriteOutcome::Success;
        for &ch in bytes.iter().take_while(|&&b| b != 0) {
            outcome = outcome.and(self.write_char(ch)?);
        }
        Ok(outcome)
    }

    /// Write a string at the cursor
    pub fn write_string(&mut self, text: &str) -> Result<WriteOutcome, LcdError> {
        self.write_bytes(text.as_bytes())
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Switch the backlight; the state sticks for every later write
    pub fn set_backlight(&mut self, on: bool) -> Result<WriteOutcome, LcdError> {
        self.backlight = on;
        self.expander_write(0)
    }

    pub fn backlight_on(&mut self) -> Result<WriteOutcome, LcdError> {
        self.set_backlight(true)
    }

    pub fn backlight_off(&mut self) -> Result<WriteOutcome, LcdError> {
        self.set_backlight(false)
    }

    fn slow_command(&mut self, cmd: u8) -> Result<WriteOutcome, LcdError> {
        let outcome = self.command(cmd)?;
        self.bus.clock().delay_ms(SLOW_COMMAND_MS);
        Ok(outcome)
    }

    /// Clear the display and home the cursor
    pub fn clear(&mut self) -> Result<WriteOutcome, LcdError> {
        self.slow_command(CLEAR)
    }

    /// Shift the whole display one position left
    pub fn shift_left(&mut self) -> Result<WriteOutcome, LcdError> {
        self.slow_command(SHIFT_LEFT)
    }

    /// Shift the whole display one position right
    pub fn shift_right(&mut self) -> Result<WriteOutcome, LcdError> {
        self.slow_command(SHIFT_RIGHT)
    }

    pub fn return_home(&mut self) -> Result<WriteOutcome, LcdError> {
        self.command(RETURN_HOME)
    }

    pub fn display_on(&mut self) -> Result<WriteOutcome, LcdError> {
        self.set_cursor_style(CursorStyle::Hidden)
    }

    pub fn display_off(&mut self) -> Result<WriteOutcome, LcdError> {
        self.command(DISPLAY_OFF)
    }

    /// Turn the display on with the given cursor
    pub fn set_cursor_style(&mut self, style: CursorStyle) -> Result<WriteOutcome, LcdError> {
        self.command(style.command())
    }

    pub fn move_cursor_left(&mut self) -> Result<WriteOutcome, LcdError> {
        self.command(CURSOR_LEFT)
    }

    pub fn move_cursor_right(&mut self) -> Result<WriteOutcome, LcdError> {
        self.command(CURSOR_RIGHT)
    }

    pub fn config(&self) -> &LcdConfig {
        &self.config
    }

    pub fn bus(&self) -> &I2cBus<R, C> {
        &self.bus
    }

    /// Borrow the bus for other devices between LCD operations
    pub fn bus_mut(&mut self) -> &mut I2cBus<R, C> {
        &mut self.bus
    }

    /// Give back the bus
    pub fn release(self) -> I2cBus<R, C> {
        self.bus
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight {
            BACKLIGHT
        } else {
            0
        }
    }
}

/// Formatted output at the cursor; acknowledge outcomes are dropped
impl<R: I2cRegisters, C: Clock> fmt::Write for LcdDriver<R, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_string(s).map(|_| ()).map_err(|_| fmt::Error)
    }
}
