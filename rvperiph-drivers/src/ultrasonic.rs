//! Ultrasonic ranging (HC-SR04 style)
//!
//! A 10 µs trigger pulse starts a measurement; the sensor then holds its
//! echo pin high for the round-trip time of the burst. Only the echo time is
//! reported. Converting it to a distance is left to the caller.

use rvperiph_core::Clock;
use rvperiph_hal::GpioRegisters;

use crate::gpio::{GpioError, GpioPort, PinMode};

/// Longest echo the sensor produces (~4 m range) plus margin
pub const DEFAULT_ECHO_TIMEOUT_US: u64 = 30_000;

pub struct EchoTimer<R, C> {
    gpio: GpioPort<R>,
    clock: C,
    trigger: u8,
    echo: u8,
    timeout_us: u64,
}

impl<R: GpioRegisters, C: Clock> EchoTimer<R, C> {
    /// Configure `trigger` as output (driven low) and `echo` as input
    pub fn new(mut gpio: GpioPort<R>, clock: C, trigger: u8, echo: u8) -> Result<Self, GpioError> {
        gpio.set_mode(trigger, PinMode::Output)?;
        gpio.set_low(trigger)?;
        gpio.set_mode(echo, PinMode::Input)?;

        Ok(Self {
            gpio,
            clock,
            trigger,
            echo,
            timeout_us: DEFAULT_ECHO_TIMEOUT_US,
        })
    }

    pub fn with_timeout_us(mut self, timeout_us: u64) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Trigger one measurement and return the echo pulse width in µs
    pub fn measure_us(&mut self) -> Result<u64, GpioError> {
        self.gpio.set_low(self.trigger)?;
        self.clock.delay_us(2);
        self.gpio.set_high(self.trigger)?;
        self.clock.delay_us(10);
        self.gpio.set_low(self.trigger)?;

        let timeout = self.clock.us_to_ticks(self.timeout_us);
        let ticks = self
            .gpio
            .pulse_width_ticks(self.echo, true, &self.clock, timeout)?;
        Ok(self.clock.ticks_to_us(ticks))
    }

    pub fn release(self) -> (GpioPort<R>, C) {
        (self.gpio, self.clock)
    }
}
