//! I2C controller register abstraction
//!
//! The controller has no state register. Software infers the bus phase
//! from which register it last wrote plus the busy flag.

/// I2C master controller registers
///
/// Every method maps to exactly one register access so that drivers keep
/// full control over ordering. Reads take `&self`; the flags are
/// hardware-owned and reading them has no side effect.
pub trait I2cRegisters {
    /// Busy flag: the controller is mid-operation
    fn busy(&self) -> bool;

    /// Acknowledge flag sampled for the last address or data byte
    fn ack(&self) -> bool;

    /// Read-ready flag: a received byte is waiting in the read register
    fn read_ready(&self) -> bool;

    /// Write the (8-bit, R/W bit included) address to the start register,
    /// which emits a START condition followed by the address byte
    fn write_start(&mut self, address: u8);

    /// Write a data byte to the write register
    fn write_data(&mut self, data: u8);

    /// Read the received data byte
    fn read_data(&self) -> u8;

    /// Write the stop register (1 requests STOP, 0 re-arms the controller)
    fn write_stop(&mut self, value: u32);
}

impl<T: I2cRegisters + ?Sized> I2cRegisters for &mut T {
    fn busy(&self) -> bool {
        (**self).busy()
    }

    fn ack(&self) -> bool {
        (**self).ack()
    }

    fn read_ready(&self) -> bool {
        (**self).read_ready()
    }

    fn write_start(&mut self, address: u8) {
        (**self).write_start(address)
    }

    fn write_data(&mut self, data: u8) {
        (**self).write_data(data)
    }

    fn read_data(&self) -> u8 {
        (**self).read_data()
    }

    fn write_stop(&mut self, value: u32) {
        (**self).write_stop(value)
    }
}
