//! Blocking UART behind `embedded-io`

use core::convert::Infallible;
use core::hint::spin_loop;

use embedded_io::{ErrorType, Read, ReadReady, Write, WriteReady};
use rvperiph_hal::UartRegisters;

pub struct UartPort<R> {
    regs: R,
}

impl<R: UartRegisters> UartPort<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Wait for the transmitter, then send one byte
    pub fn write_byte(&mut self, byte: u8) {
        while self.regs.tx_busy() {
            spin_loop();
        }
        self.regs.write_tx(byte);
    }

    /// Wait for a byte to arrive
    pub fn read_byte(&mut self) -> u8 {
        while !self.regs.rx_full() {
            spin_loop();
        }
        self.regs.read_rx()
    }

    /// Take a byte if one is waiting
    pub fn try_read_byte(&mut self) -> Option<u8> {
        self.regs.rx_full().then(|| self.regs.read_rx())
    }

    pub fn release(self) -> R {
        self.regs
    }
}

impl<R> ErrorType for UartPort<R> {
    type Error = Infallible;
}

impl<R: UartRegisters> Write for UartPort<R> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &byte in buf {
            self.write_byte(byte);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        while self.regs.tx_busy() {
            spin_loop();
        }
        Ok(())
    }
}

impl<R: UartRegisters> WriteReady for UartPort<R> {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.regs.tx_busy())
    }
}

impl<R: UartRegisters> Read for UartPort<R> {
    /// Blocks for the first byte, then drains whatever else is waiting
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let Some((first, rest)) = buf.split_first_mut() else {
            return Ok(0);
        };
        *first = self.read_byte();

        let mut count = 1;
        for slot in rest {
            match self.try_read_byte() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }
}

impl<R: UartRegisters> ReadReady for UartPort<R> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.regs.rx_full())
    }
}
