//! GPIO register abstraction
//!
//! One 32-bit block: a mode register (bit set = output), a write register
//! holding the driven levels, and a read register sampling the pins.

/// 32-pin GPIO block
pub trait GpioRegisters {
    /// Current mode bits (0 = input, 1 = output)
    fn mode(&self) -> u32;

    /// Write all mode bits
    fn set_mode(&mut self, mode: u32);

    /// Sample all pin levels
    fn read(&self) -> u32;

    /// Read back the currently driven output levels
    fn output(&self) -> u32;

    /// Drive all output levels
    fn set_output(&mut self, value: u32);
}
