//! I2C master transaction protocol
//!
//! [`I2cBus`] drives the controller's four primitives (start/address,
//! write byte, read byte, stop). Every phase transition is gated on the
//! busy flag; acknowledge outcomes are returned as [`Ack`] values and never
//! turned into errors at this layer.
//!
//! The controller cannot issue a repeated START. Multi-part transfers built
//! on top of it (see the `embedded_hal::i2c::I2c` impl) separate direction
//! changes with STOP + START.

mod bus;
mod error;
mod transfer;

pub use bus::{Ack, BusState, I2cBus, MAX_SCAN_RESULTS};
pub use error::I2cError;
