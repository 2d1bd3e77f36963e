//! Per-pin GPIO access
//!
//! The block is one 32-bit word per register, so every pin operation is a
//! read-modify-write of the whole word. Not interrupt safe: a handler that
//! touches the same block must not preempt these calls.

use rvperiph_core::Clock;
use rvperiph_hal::GpioRegisters;

/// Number of pins in the block
pub const PIN_COUNT: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin number outside 0-31
    InvalidPin(u8),
    /// Pin did not reach or leave the expected level in time
    Timeout,
}

fn mask(pin: u8) -> Result<u32, GpioError> {
    if pin < PIN_COUNT {
        Ok(1 << pin)
    } else {
        Err(GpioError::InvalidPin(pin))
    }
}

/// The GPIO block
pub struct GpioPort<R> {
    regs: R,
}

impl<R: GpioRegisters> GpioPort<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), GpioError> {
        let bit = mask(pin)?;
        let current = self.regs.mode();
        let next = match mode {
            PinMode::Input => current & !bit,
            PinMode::Output => current | bit,
        };
        self.regs.set_mode(next);
        Ok(())
    }

    pub fn mode(&self, pin: u8) -> Result<PinMode, GpioError> {
        let bit = mask(pin)?;
        Ok(if self.regs.mode() & bit != 0 {
            PinMode::Output
        } else {
            PinMode::Input
        })
    }

    /// Drive a pin, switching it to output first
    pub fn write(&mut self, pin: u8, high: bool) -> Result<(), GpioError> {
        let bit = mask(pin)?;
        self.set_mode(pin, PinMode::Output)?;
        let current = self.regs.output();
        self.regs
            .set_output(if high { current | bit } else { current & !bit });
        Ok(())
    }

    pub fn set_high(&mut self, pin: u8) -> Result<(), GpioError> {
        self.write(pin, true)
    }

    pub fn set_low(&mut self, pin: u8) -> Result<(), GpioError> {
        self.write(pin, false)
    }

    /// Invert a pin's driven level, switching it to output first
    pub fn toggle(&mut self, pin: u8) -> Result<(), GpioError> {
        let bit = mask(pin)?;
        self.set_mode(pin, PinMode::Output)?;
        let current = self.regs.output();
        self.regs.set_output(current ^ bit);
        Ok(())
    }

    /// Sample a pin, switching it to input first
    pub fn is_high(&mut self, pin: u8) -> Result<bool, GpioError> {
        let bit = mask(pin)?;
        self.set_mode(pin, PinMode::Input)?;
        Ok(self.regs.read() & bit != 0)
    }

    /// Level last driven on a pin, without touching its mode
    pub fn output_level(&self, pin: u8) -> Result<bool, GpioError> {
        let bit = mask(pin)?;
        Ok(self.regs.output() & bit != 0)
    }

    /// Measure how long `pin` stays at `level`, in ticks
    ///
    /// First waits for the pin to reach `level`, then times until it leaves.
    /// Each of the two waits gives up after `timeout` ticks.
    pub fn pulse_width_ticks<C: Clock>(
        &self,
        pin: u8,
        level: bool,
        clock: &C,
        timeout: u64,
    ) -> Result<u64, GpioError> {
        let bit = mask(pin)?;
        let at_level = || (self.regs.read() & bit != 0) == level;

        let waiting = clock.now();
        while !at_level() {
            if clock.elapsed_since(waiting) > timeout {
                return Err(GpioError::Timeout);
            }
        }

        let start = clock.now();
        while at_level() {
            if clock.elapsed_since(start) > timeout {
                return Err(GpioError::Timeout);
            }
        }
        Ok(clock.elapsed_since(start))
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn release(self) -> R {
        self.regs
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use core::cell::Cell;

    use rvperiph_core::Clock;
    use rvperiph_hal::GpioRegisters;

    /// GPIO block whose input levels follow a script indexed by read count
    pub struct MockGpio {
        pub mode: u32,
        pub output: u32,
        reads: Cell<u32>,
        /// Echo pin is high while the read count is in this range
        high_reads: core::ops::Range<u32>,
        echo_mask: u32,
    }

    impl MockGpio {
        pub fn new() -> Self {
            Self::with_pulse(0, 0..0)
        }

        pub fn with_pulse(pin: u8, high_reads: core::ops::Range<u32>) -> Self {
            Self {
                mode: 0,
                output: 0,
                reads: Cell::new(0),
                high_reads,
                echo_mask: 1 << pin,
            }
        }
    }

    impl GpioRegisters for MockGpio {
        fn mode(&self) -> u32 {
            self.mode
        }

        fn set_mode(&mut self, mode: u32) {
            self.mode = mode;
        }

        fn read(&self) -> u32 {
            let n = self.reads.get();
            self.reads.set(n + 1);
            let echo = if self.high_reads.contains(&n) {
                self.echo_mask
            } else {
                0
            };
            // Outputs read back as driven
            (self.output & self.mode) | echo
        }

        fn output(&self) -> u32 {
            self.output
        }

        fn set_output(&mut self, value: u32) {
            self.output = value;
        }
    }

    /// 12 MHz clock advancing `step` ticks per sample; delays are recorded
    pub struct MockClock {
        now: Cell<u64>,
        step: u64,
        pub delays: core::cell::RefCell<Vec<u64>>,
    }

    impl MockClock {
        pub fn new(step: u64) -> Self {
            Self {
                now: Cell::new(0),
                step,
                delays: core::cell::RefCell::new(Vec::new()),
            }
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> u64 {
            let t = self.now.get();
            self.now.set(t + self.step);
            t
        }

        fn ticks_per_second(&self) -> u32 {
            12_000_000
        }

        fn delay_ticks(&self, ticks: u64) {
            self.delays.borrow_mut().push(ticks);
            self.now.set(self.now.get() + ticks);
        }
    }
}
