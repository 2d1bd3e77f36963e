//! Volatile 32-bit register access

use core::ptr::{read_volatile, write_volatile};

/// A single 32-bit memory-mapped register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reg {
    addr: usize,
}

impl Reg {
    /// Wrap a register address
    ///
    /// # Safety
    /// `addr` must be a valid, 4-byte aligned register for the lifetime of
    /// the returned handle.
    pub const unsafe fn at(addr: usize) -> Self {
        Self { addr }
    }

    /// Register address
    pub const fn addr(self) -> usize {
        self.addr
    }

    #[inline(always)]
    pub fn read(self) -> u32 {
        // SAFETY: validity of the address is the contract of `Reg::at`.
        unsafe { read_volatile(self.addr as *const u32) }
    }

    #[inline(always)]
    pub fn write(self, value: u32) {
        // SAFETY: validity of the address is the contract of `Reg::at`.
        unsafe { write_volatile(self.addr as *mut u32, value) }
    }
}
