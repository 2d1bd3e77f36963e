//! Configuration types
//!
//! Defaults reproduce the reference board: 12 MHz timer clock, a PCF8574
//! backpack at 0x27 driving a two-line HD44780 with the backlight on.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timer clock of the reference SoC
pub const DEFAULT_CLOCK_HZ: u32 = 12_000_000;

/// Default bound on busy-flag polls before a wait is declared hung
///
/// One I2C byte at 100 kHz is ~90 µs, a few thousand polls on a 12 MHz
/// core. The bound leaves two orders of magnitude of headroom.
pub const DEFAULT_POLL_LIMIT: u32 = 500_000;

/// Settle delay after a STOP, in timer ticks
pub const DEFAULT_STOP_SETTLE_TICKS: u64 = 100;

/// 7-bit address of the PCF8574 LCD backpack (0x4E on the wire)
pub const DEFAULT_LCD_ADDRESS: u8 = 0x27;

/// Time base configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Frequency of the free-running counter in Hz
    pub clock_hz: u32,
}

impl ClockConfig {
    pub const fn new(clock_hz: u32) -> Self {
        Self { clock_hz }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CLOCK_HZ)
    }
}

/// I2C bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// Maximum polls of a status flag before giving up
    ///
    /// `None` spins forever, like the bare controller contract.
    pub poll_limit: Option<u32>,
    /// Ticks to wait after every STOP
    pub stop_settle_ticks: u64,
}

impl BusConfig {
    /// Spin without bound on every status flag
    pub const UNBOUNDED: Self = Self {
        poll_limit: None,
        stop_settle_ticks: DEFAULT_STOP_SETTLE_TICKS,
    };

    pub const fn with_poll_limit(mut self, limit: u32) -> Self {
        self.poll_limit = Some(limit);
        self
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            poll_limit: Some(DEFAULT_POLL_LIMIT),
            stop_settle_ticks: DEFAULT_STOP_SETTLE_TICKS,
        }
    }
}

/// Display geometry / font selection for the HD44780 function-set command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum LcdFont {
    /// One line, 5x8 dots
    OneLine5x8 = 0,
    /// One line, 5x10 dots
    OneLine5x10 = 1,
    /// Two (or four) lines, 5x8 dots
    TwoLine = 2,
}

impl LcdFont {
    /// Function-set command byte for 4-bit mode with this font
    pub const fn function_set(self) -> u8 {
        0x20 | ((self as u8) << 2)
    }
}

/// Character LCD configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LcdConfig {
    /// 7-bit I2C address of the I/O expander
    pub address: u8,
    /// Font / line configuration
    pub font: LcdFont,
    /// Backlight state before the first write
    pub backlight: bool,
    /// Settle time after every enable pulse, in microseconds
    pub nibble_settle_us: u32,
}

impl LcdConfig {
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            font: LcdFont::TwoLine,
            backlight: true,
            nibble_settle_us: 50_000,
        }
    }

    pub const fn font(mut self, font: LcdFont) -> Self {
        self.font = font;
        self
    }

    pub const fn nibble_settle_us(mut self, us: u32) -> Self {
        self.nibble_settle_us = us;
        self
    }
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LCD_ADDRESS)
    }
}
