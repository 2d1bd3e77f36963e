//! I2C master controller registers

use rvperiph_hal::I2cRegisters;

use crate::map::{
    I2C_ACK, I2C_BUSY, I2C_READ, I2C_READ_DATA_READY, I2C_START, I2C_STOP, I2C_WRITE,
};
use crate::mmio::Reg;

/// Memory-mapped I2C controller block
pub struct I2c {
    start: Reg,
    write: Reg,
    read: Reg,
    busy: Reg,
    ack: Reg,
    read_ready: Reg,
    stop: Reg,
}

impl I2c {
    /// # Safety
    /// `base` must be the I2C block base and the handle must be unique.
    pub(crate) unsafe fn new(base: usize) -> Self {
        Self {
            start: Reg::at(base + I2C_START),
            write: Reg::at(base + I2C_WRITE),
            read: Reg::at(base + I2C_READ),
            busy: Reg::at(base + I2C_BUSY),
            ack: Reg::at(base + I2C_ACK),
            read_ready: Reg::at(base + I2C_READ_DATA_READY),
            stop: Reg::at(base + I2C_STOP),
        }
    }
}

impl I2cRegisters for I2c {
    fn busy(&self) -> bool {
        self.busy.read() != 0
    }

    fn ack(&self) -> bool {
        self.ack.read() != 0
    }

    fn read_ready(&self) -> bool {
        self.read_ready.read() != 0
    }

    fn write_start(&mut self, address: u8) {
        self.start.write(address as u32);
    }

    fn write_data(&mut self, data: u8) {
        self.write.write(data as u32);
    }

    fn read_data(&self) -> u8 {
        self.read.read() as u8
    }

    fn write_stop(&mut self, value: u32) {
        self.stop.write(value);
    }
}
