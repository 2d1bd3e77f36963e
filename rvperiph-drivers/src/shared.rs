//! Sharing one bus between several devices
//!
//! The bus sits behind a blocking mutex. A lock is held for one whole
//! logical operation (an LCD byte, a sensor register read) so transactions
//! from different users never interleave on the wire.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};

pub struct SharedBus<M: RawMutex, T> {
    inner: Mutex<M, RefCell<T>>,
}

impl<M: RawMutex, T> SharedBus<M, T> {
    pub fn new(bus: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(bus)),
        }
    }

    /// Run `f` with exclusive access to the bus
    ///
    /// Must not be re-entered from inside `f`.
    pub fn lock<U>(&self, f: impl FnOnce(&mut T) -> U) -> U {
        self.inner.lock(|bus| f(&mut bus.borrow_mut()))
    }

    /// Handle for a driver that wants its own `I2c` implementation
    pub fn device(&self) -> SharedDevice<'_, M, T> {
        SharedDevice { bus: self }
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}

/// One user of a [`SharedBus`]; each transaction takes the lock
pub struct SharedDevice<'a, M: RawMutex, T> {
    bus: &'a SharedBus<M, T>,
}

impl<M: RawMutex, T: ErrorType> ErrorType for SharedDevice<'_, M, T> {
    type Error = T::Error;
}

impl<M: RawMutex, T: I2c> I2c<SevenBitAddress> for SharedDevice<'_, M, T> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.bus.lock(|bus| bus.transaction(address, operations))
    }
}
