//! UART register abstraction

/// Byte-wide UART with a single receive slot
pub trait UartRegisters {
    /// Transmitter is still shifting out the previous byte
    fn tx_busy(&self) -> bool;

    /// Load the transmit register
    fn write_tx(&mut self, byte: u8);

    /// A received byte is waiting
    fn rx_full(&self) -> bool;

    /// Take the received byte
    fn read_rx(&mut self) -> u8;
}
