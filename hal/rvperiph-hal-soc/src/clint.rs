//! Core-local interruptor: machine timer and software interrupt

use rvperiph_hal::CounterRegisters;

use crate::map::{MSIP, MTIMECMP_HI, MTIMECMP_LO, MTIME_HI, MTIME_LO};
use crate::mmio::Reg;

/// Memory-mapped CLINT block
pub struct Clint {
    mtime_lo: Reg,
    mtime_hi: Reg,
    mtimecmp_lo: Reg,
    mtimecmp_hi: Reg,
    msip: Reg,
}

impl Clint {
    /// # Safety
    /// `base` must be the CLINT block base and the handle must be unique.
    pub(crate) unsafe fn new(base: usize) -> Self {
        Self {
            mtime_lo: Reg::at(base + MTIME_LO),
            mtime_hi: Reg::at(base + MTIME_HI),
            mtimecmp_lo: Reg::at(base + MTIMECMP_LO),
            mtimecmp_hi: Reg::at(base + MTIMECMP_HI),
            msip: Reg::at(base + MSIP),
        }
    }
}

impl CounterRegisters for Clint {
    fn time_lo(&self) -> u32 {
        self.mtime_lo.read()
    }

    fn time_hi(&self) -> u32 {
        self.mtime_hi.read()
    }

    fn set_time_lo(&mut self, value: u32) {
        self.mtime_lo.write(value);
    }

    fn set_time_hi(&mut self, value: u32) {
        self.mtime_hi.write(value);
    }

    fn compare_lo(&self) -> u32 {
        self.mtimecmp_lo.read()
    }

    fn compare_hi(&self) -> u32 {
        self.mtimecmp_hi.read()
    }

    fn set_compare_lo(&mut self, value: u32) {
        self.mtimecmp_lo.write(value);
    }

    fn set_compare_hi(&mut self, value: u32) {
        self.mtimecmp_hi.write(value);
    }

    fn set_software_interrupt(&mut self, pending: bool) {
        self.msip.write(pending as u32);
    }
}
