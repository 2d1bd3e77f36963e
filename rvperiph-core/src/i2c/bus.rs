//! I2C master state machine

use core::hint::spin_loop;

use heapless::Vec;
use rvperiph_hal::I2cRegisters;

use super::error::I2cError;
use crate::config::BusConfig;
use crate::time::Clock;

/// Acknowledge bit sampled after an address or data byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ack {
    /// Device acknowledged the byte
    Ack,
    /// No device present, or the device refused the byte
    Nack,
}

impl Ack {
    pub fn is_ack(self) -> bool {
        matches!(self, Ack::Ack)
    }
}

impl From<bool> for Ack {
    fn from(acked: bool) -> Self {
        if acked {
            Ack::Ack
        } else {
            Ack::Nack
        }
    }
}

/// Software view of the controller's transaction phase
///
/// The hardware has no state register; the phase is tracked from the last
/// register written so misuse is rejected before it reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusState {
    /// No transaction open
    Idle,
    /// START and address sent
    AddressPhase { read: bool },
    /// At least one data byte transferred
    DataPhase { read: bool },
}

impl BusState {
    /// Direction of the open transaction, if any
    pub fn direction(self) -> Option<bool> {
        match self {
            BusState::Idle => None,
            BusState::AddressPhase { read } | BusState::DataPhase { read } => Some(read),
        }
    }
}

/// Maximum number of devices a scan can report
pub const MAX_SCAN_RESULTS: usize = 128;

/// Blocking I2C master over the memory-mapped controller
///
/// One transaction is in flight at a time. The bus does not arbitrate
/// between callers; wrap it in a mutex held for a whole logical operation
/// when several tasks share it.
pub struct I2cBus<R, C> {
    regs: R,
    clock: C,
    config: BusConfig,
    state: BusState,
}

impl<R: I2cRegisters, C: Clock> I2cBus<R, C> {
    /// Create a bus over the controller registers
    pub fn new(regs: R, clock: C, config: BusConfig) -> Self {
        Self {
            regs,
            clock,
            config,
            state: BusState::Idle,
        }
    }

    /// Current transaction phase
    pub fn state(&self) -> BusState {
        self.state
    }

    /// Time base used for settle delays
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Access the underlying registers
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Give back the registers and clock
    pub fn release(self) -> (R, C) {
        (self.regs, self.clock)
    }

    /// Spin while `cond` holds, bounded by the configured poll limit
    fn wait_while(&self, cond: impl Fn(&R) -> bool, err: I2cError) -> Result<(), I2cError> {
        match self.config.poll_limit {
            None => {
                while cond(&self.regs) {
                    spin_loop();
                }
                Ok(())
            }
            Some(limit) => {
                for _ in 0..limit.max(1) {
                    if !cond(&self.regs) {
                        return Ok(());
                    }
                    spin_loop();
                }
                #[cfg(feature = "defmt")]
                defmt::warn!("i2c: gave up after {} polls: {}", limit, err);
                Err(err)
            }
        }
    }

    fn wait_idle(&self) -> Result<(), I2cError> {
        self.wait_while(|r| r.busy(), I2cError::BusHang)
    }

    /// Send START and the 8-bit address (R/W in bit 0)
    ///
    /// Returns the acknowledge bit sampled once the address phase completes.
    pub fn start_address(&mut self, address: u8) -> Result<Ack, I2cError> {
        self.wait_idle()?;
        self.regs.write_start(address);
        self.state = BusState::AddressPhase {
            read: address & 0x01 != 0,
        };
        self.wait_idle()?;

        let ack = Ack::from(self.regs.ack());
        if !ack.is_ack() {
            #[cfg(feature = "defmt")]
            defmt::debug!("i2c: address {=u8:#x} not acknowledged", address);
        }
        Ok(ack)
    }

    /// Write one data byte in an open write transaction
    pub fn write_byte(&mut self, data: u8) -> Result<Ack, I2cError> {
        if self.state.direction() != Some(false) {
            return Err(I2cError::OutOfSequence(self.state));
        }

        self.wait_idle()?;
        self.regs.write_data(data);
        self.state = BusState::DataPhase { read: false };
        self.wait_idle()?;

        Ok(Ack::from(self.regs.ack()))
    }

    /// Read one data byte in an open read transaction
    pub fn read_byte(&mut self) -> Result<u8, I2cError> {
        if self.state.direction() != Some(true) {
            return Err(I2cError::OutOfSequence(self.state));
        }

        self.wait_idle()?;
        self.wait_while(|r| !r.read_ready(), I2cError::ReadNeverReady)?;
        let byte = self.regs.read_data();
        self.state = BusState::DataPhase { read: true };

        Ok(byte)
    }

    /// Send STOP and re-arm the controller
    ///
    /// Accepted in every phase since it is also the recovery path. On return
    /// the stop register is back at 0, even when the bus hung mid-STOP, so
    /// the next START is not taken for a halt request.
    pub fn stop(&mut self) -> Result<(), I2cError> {
        self.wait_idle()?;
        self.regs.write_stop(1);
        let stopped = self.wait_idle();
        self.regs.write_stop(0);
        self.state = BusState::Idle;
        self.clock.delay_ticks(self.config.stop_settle_ticks);
        stopped
    }

    /// Check whether a device answers at the 7-bit `address`
    pub fn probe(&mut self, address: u8) -> Result<Ack, I2cError> {
        let ack = self.start_address(address << 1)?;
        self.stop()?;
        Ok(ack)
    }

    /// Probe every 7-bit address and collect the ones that acknowledge
    pub fn scan(&mut self) -> Result<Vec<u8, MAX_SCAN_RESULTS>, I2cError> {
        let mut found = Vec::new();
        for address in 1..0x80u8 {
            if self.probe(address)?.is_ack() && found.push(address).is_err() {
                break;
            }
        }
        Ok(found)
    }
}
