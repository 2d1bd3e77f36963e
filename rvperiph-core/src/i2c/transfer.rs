//! embedded-hal I2C implementation
//!
//! Lets off-the-shelf sensor drivers run on the bus. The controller has no
//! repeated-start support, so a change of direction inside a transaction is
//! a STOP followed by a fresh START.

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use rvperiph_hal::I2cRegisters;

use super::bus::{BusState, I2cBus};
use super::error::I2cError;
use crate::time::Clock;

impl<R: I2cRegisters, C: Clock> ErrorType for I2cBus<R, C> {
    type Error = I2cError;
}

impl<R: I2cRegisters, C: Clock> I2cBus<R, C> {
    fn run_operations(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), I2cError> {
        let mut direction = None;

        for op in operations.iter_mut() {
            let read = matches!(op, Operation::Read(_));

            if direction != Some(read) {
                if direction.is_some() {
                    self.stop()?;
                }
                if !self.start_address((address << 1) | u8::from(read))?.is_ack() {
                    return Err(I2cError::AddressNack);
                }
                direction = Some(read);
            }

            match op {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        if !self.write_byte(byte)?.is_ack() {
                            return Err(I2cError::DataNack);
                        }
                    }
                }
                Operation::Read(buffer) => {
                    for slot in buffer.iter_mut() {
                        *slot = self.read_byte()?;
                    }
                }
            }
        }

        Ok(())
    }
}

impl<R: I2cRegisters, C: Clock> I2c<SevenBitAddress> for I2cBus<R, C> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let result = self.run_operations(address, operations);

        // Close the transaction on failure too so the bus is left idle
        if self.state() != BusState::Idle {
            let stopped = self.stop();
            return result.and(stopped);
        }
        result
    }
}
