//! Machine timer register abstraction
//!
//! The counter and compare registers are 64 bits wide but are accessed as
//! two 32-bit halves on RV32. Ordering of the half accesses matters and is
//! the responsibility of the time base built on top of this trait.

/// Split 64-bit counter (`mtime`) and compare (`mtimecmp`) registers,
/// plus the machine software interrupt pending bit
pub trait CounterRegisters {
    /// Low 32 bits of the free-running counter
    fn time_lo(&self) -> u32;

    /// High 32 bits of the free-running counter
    fn time_hi(&self) -> u32;

    /// Write the low half of the counter
    fn set_time_lo(&mut self, value: u32);

    /// Write the high half of the counter
    fn set_time_hi(&mut self, value: u32);

    /// Low 32 bits of the compare register
    fn compare_lo(&self) -> u32;

    /// High 32 bits of the compare register
    fn compare_hi(&self) -> u32;

    /// Write the low half of the compare register
    fn set_compare_lo(&mut self, value: u32);

    /// Write the high half of the compare register
    fn set_compare_hi(&mut self, value: u32);

    /// Write the software interrupt pending bit
    fn set_software_interrupt(&mut self, pending: bool);
}
