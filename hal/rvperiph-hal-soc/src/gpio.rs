//! GPIO block registers

use rvperiph_hal::GpioRegisters;

use crate::map::{GPIO_MODE, GPIO_READ, GPIO_WRITE};
use crate::mmio::Reg;

/// Memory-mapped GPIO block
pub struct Gpio {
    mode: Reg,
    read: Reg,
    write: Reg,
}

impl Gpio {
    /// # Safety
    /// `base` must be the GPIO block base and the handle must be unique.
    pub(crate) unsafe fn new(base: usize) -> Self {
        Self {
            mode: Reg::at(base + GPIO_MODE),
            read: Reg::at(base + GPIO_READ),
            write: Reg::at(base + GPIO_WRITE),
        }
    }
}

impl GpioRegisters for Gpio {
    fn mode(&self) -> u32 {
        self.mode.read()
    }

    fn set_mode(&mut self, mode: u32) {
        self.mode.write(mode);
    }

    fn read(&self) -> u32 {
        self.read.read()
    }

    fn output(&self) -> u32 {
        self.write.read()
    }

    fn set_output(&mut self, value: u32) {
        self.write.write(value);
    }
}
