use crate::i2c::{Ack, I2cError};

/// Acknowledge summary of an LCD operation
///
/// A NACK never stops an operation: later bytes are positional, so the
/// remaining writes are still sent and the first failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteOutcome {
    Success,
    AddressNotAcknowledged,
    DataNotAcknowledged,
}

impl WriteOutcome {
    /// Outcome of one expander write; an address NACK takes precedence
    pub fn from_acks(address: Ack, data: Ack) -> Self {
        match (address, data) {
            (Ack::Nack, _) => WriteOutcome::AddressNotAcknowledged,
            (Ack::Ack, Ack::Nack) => WriteOutcome::DataNotAcknowledged,
            (Ack::Ack, Ack::Ack) => WriteOutcome::Success,
        }
    }

    pub fn is_success(self) -> bool {
        self == WriteOutcome::Success
    }

    /// Merge with the outcome of a later write, keeping the first failure
    pub fn and(self, later: WriteOutcome) -> Self {
        if self.is_success() {
            later
        } else {
            self
        }
    }
}

/// LCD driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// Underlying bus failed
    Bus(I2cError),
    /// Cursor position outside rows 1-4 / columns 1-40
    InvalidPosition { row: u8, col: u8 },
}

impl From<I2cError> for LcdError {
    fn from(err: I2cError) -> Self {
        LcdError::Bus(err)
    }
}
