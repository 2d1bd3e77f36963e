//! Board-agnostic peripheral protocols for the rvperiph SoC
//!
//! This crate contains the parts of the peripheral layer with real
//! protocol and timing concerns, written against the `rvperiph-hal`
//! register traits so that all of it runs against simulated registers on
//! the host:
//!
//! - [`time`] - 64-bit machine timer, tick conversions, busy-wait delays
//! - [`i2c`] - I2C master transaction state machine
//! - [`lcd`] - HD44780 character LCD behind a PCF8574 I2C I/O expander
//! - [`config`] - Configuration types with reference defaults
//!
//! Every wait in this crate is a spin on a status bit or on the tick
//! counter; nothing yields. Callers sharing the bus between tasks must
//! serialize whole logical operations themselves.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod i2c;
pub mod lcd;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{BusConfig, ClockConfig, LcdConfig, LcdFont};
pub use i2c::{Ack, BusState, I2cBus, I2cError};
pub use lcd::{CursorPosition, CursorStyle, LcdDriver, LcdError, WriteOutcome};
pub use time::{Clock, TimeBase};
