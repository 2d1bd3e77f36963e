//! rvperiph Hardware Abstraction Layer
//!
//! This crate defines the register-level view of the SoC peripherals that
//! the rest of the workspace is written against. A chip crate implements
//! these traits with volatile memory-mapped access; host tests implement
//! them with simulated registers that record every access.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  rvperiph-firmware (LCD demo)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rvperiph-core / rvperiph-drivers       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rvperiph-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rvperiph-hal-soc (MMIO registers)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cRegisters`] - I2C master controller registers
//! - [`timer::CounterRegisters`] - 64-bit free-running counter and compare
//! - [`gpio::GpioRegisters`] - 32-bit GPIO block
//! - [`uart::UartRegisters`] - byte UART

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::GpioRegisters;
pub use i2c::I2cRegisters;
pub use timer::CounterRegisters;
pub use uart::UartRegisters;
