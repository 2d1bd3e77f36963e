//! SoC memory map

/// CPU clock feeding the machine timer
pub const CPU_CLK_HZ: u32 = 12_000_000;

/// CLINT block base
pub const CLINT_BASE: usize = 0x8000_0000;
/// `mtime` low/high word offsets
pub const MTIME_LO: usize = 0x00;
pub const MTIME_HI: usize = 0x04;
/// `mtimecmp` low/high word offsets
pub const MTIMECMP_LO: usize = 0x08;
pub const MTIMECMP_HI: usize = 0x0C;
/// Machine software interrupt pending
pub const MSIP: usize = 0x10;

/// UART block base
pub const UART_BASE: usize = 0x8000_0050;
pub const UART_TX_DATA: usize = 0x00;
pub const UART_TX_BUSY: usize = 0x04;
pub const UART_RX_FULL: usize = 0x08;
pub const UART_RX_DATA: usize = 0x0C;

/// I2C block base
pub const I2C_BASE: usize = 0x8000_00A0;
pub const I2C_START: usize = 0x00;
pub const I2C_WRITE: usize = 0x04;
pub const I2C_READ: usize = 0x08;
pub const I2C_BUSY: usize = 0x0C;
pub const I2C_ACK: usize = 0x10;
pub const I2C_READ_DATA_READY: usize = 0x14;
pub const I2C_STOP: usize = 0x18;

/// GPIO block base
pub const GPIO_BASE: usize = 0x8000_00F0;
pub const GPIO_MODE: usize = 0x00;
pub const GPIO_READ: usize = 0x04;
pub const GPIO_WRITE: usize = 0x08;
