//! Peripheral drivers layered on the rvperiph HAL and core
//!
//! Thin consumers of the register traits and of the core time base:
//!
//! - [`gpio`] - per-pin access to the 32-bit GPIO block, pulse measurement
//! - [`ultrasonic`] - HC-SR04 style trigger/echo ranging (raw echo time)
//! - [`hygro`] - HDC1080 temperature/humidity sensor register access
//! - [`uart`] - blocking byte UART behind `embedded-io`
//! - [`shared`] - mutex-guarded sharing of one bus between devices

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod hygro;
pub mod shared;
pub mod uart;
pub mod ultrasonic;

pub use gpio::{GpioError, GpioPort, PinMode};
pub use hygro::{Hdc1080, HygroError};
pub use shared::{SharedBus, SharedDevice};
pub use uart::UartPort;
pub use ultrasonic::EchoTimer;
