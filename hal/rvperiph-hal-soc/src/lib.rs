//! RV32I SoC implementation of the rvperiph HAL
//!
//! This crate binds the `rvperiph-hal` register traits to the SoC's fixed
//! memory map:
//!
//! | Block | Base | Registers |
//! |-------|------|-----------|
//! | CLINT | `0x8000_0000` | `mtime`, `mtimecmp`, `msip` |
//! | UART  | `0x8000_0050` | tx data, tx busy, rx full, rx data |
//! | I2C   | `0x8000_00A0` | start, write, read, busy, ack, read ready, stop |
//! | GPIO  | `0x8000_00F0` | mode, read, write |
//!
//! All register access goes through [`mmio::Reg`], which is the only place
//! volatile pointers are dereferenced.
//!
//! # Usage
//!
//! ```ignore
//! let p = rvperiph_hal_soc::Peripherals::take().unwrap();
//! let time = TimeBase::new(p.clint, ClockConfig::default());
//! ```

#![no_std]

pub mod clint;
pub mod gpio;
pub mod i2c;
pub mod map;
pub mod mmio;
pub mod uart;

use portable_atomic::{AtomicBool, Ordering};

pub use clint::Clint;
pub use gpio::Gpio;
pub use i2c::I2c;
pub use uart::Uart;

static TAKEN: AtomicBool = AtomicBool::new(false);

/// All memory-mapped peripheral blocks of the SoC
pub struct Peripherals {
    pub clint: Clint,
    pub i2c: I2c,
    pub gpio: Gpio,
    pub uart: Uart,
}

impl Peripherals {
    /// Take the peripheral singletons
    ///
    /// Returns `None` on every call after the first.
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            return None;
        }
        // SAFETY: the flag above guarantees this runs at most once, so each
        // register block has exactly one owner.
        Some(unsafe { Self::steal() })
    }

    /// Create the peripheral handles without checking for existing owners
    ///
    /// # Safety
    /// The caller must ensure no other handle to the same blocks is in use.
    pub unsafe fn steal() -> Self {
        Self {
            clint: Clint::new(map::CLINT_BASE),
            i2c: I2c::new(map::I2C_BASE),
            gpio: Gpio::new(map::GPIO_BASE),
            uart: Uart::new(map::UART_BASE),
        }
    }
}
