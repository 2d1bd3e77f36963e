//! I2C error types

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use super::bus::BusState;

/// Errors from I2C bus operations
///
/// The primitive operations only produce `BusHang`, `ReadNeverReady` and
/// `OutOfSequence`; acknowledge outcomes are values there. The NACK
/// variants come from complete transfers through the embedded-hal API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Busy flag did not clear within the poll limit
    BusHang,
    /// Read-ready flag did not set within the poll limit
    ReadNeverReady,
    /// Operation not valid in the current bus phase
    OutOfSequence(BusState),
    /// Address byte not acknowledged
    AddressNack,
    /// Data byte not acknowledged
    DataNack,
}

impl I2cError {
    /// Whether the bus itself is unusable, as opposed to a device refusing
    pub fn is_fatal(&self) -> bool {
        matches!(self, I2cError::BusHang | I2cError::ReadNeverReady)
    }
}

impl embedded_hal::i2c::Error for I2cError {
    fn kind(&self) -> ErrorKind {
        match self {
            I2cError::BusHang => ErrorKind::Bus,
            I2cError::ReadNeverReady | I2cError::OutOfSequence(_) => ErrorKind::Other,
            I2cError::AddressNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            I2cError::DataNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
        }
    }
}
