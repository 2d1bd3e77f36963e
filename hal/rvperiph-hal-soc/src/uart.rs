//! UART block registers

use rvperiph_hal::UartRegisters;

use crate::map::{UART_RX_DATA, UART_RX_FULL, UART_TX_BUSY, UART_TX_DATA};
use crate::mmio::Reg;

/// Memory-mapped UART block
pub struct Uart {
    tx_data: Reg,
    tx_busy: Reg,
    rx_full: Reg,
    rx_data: Reg,
}

impl Uart {
    /// # Safety
    /// `base` must be the UART block base and the handle must be unique.
    pub(crate) unsafe fn new(base: usize) -> Self {
        Self {
            tx_data: Reg::at(base + UART_TX_DATA),
            tx_busy: Reg::at(base + UART_TX_BUSY),
            rx_full: Reg::at(base + UART_RX_FULL),
            rx_data: Reg::at(base + UART_RX_DATA),
        }
    }
}

impl UartRegisters for Uart {
    fn tx_busy(&self) -> bool {
        self.tx_busy.read() != 0
    }

    fn write_tx(&mut self, byte: u8) {
        self.tx_data.write(byte as u32);
    }

    fn rx_full(&self) -> bool {
        self.rx_full.read() != 0
    }

    fn read_rx(&mut self) -> u8 {
        self.rx_data.read() as u8
    }
}
