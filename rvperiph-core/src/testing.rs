//! Simulated registers and clock for host tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::vec::Vec;

use rvperiph_hal::{CounterRegisters, I2cRegisters};

use crate::time::Clock;

/// Simulated `mtime`/`mtimecmp` pair
///
/// The counter advances by `step` on every low-half read so busy-wait loops
/// make progress, and carries into the high half like the real counter.
pub struct SimCounter {
    time: Cell<u64>,
    step: u64,
    compare: Cell<u64>,
    msip: Cell<bool>,
    time_writes: RefCell<Vec<(bool, u32)>>,
    compare_writes: RefCell<Vec<(bool, u32)>>,
    compare_history: RefCell<Vec<u64>>,
}

impl SimCounter {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            time: Cell::new(start),
            step,
            compare: Cell::new(u64::MAX),
            msip: Cell::new(false),
            time_writes: RefCell::new(Vec::new()),
            compare_writes: RefCell::new(Vec::new()),
            compare_history: RefCell::new(Vec::new()),
        }
    }

    /// `(high_half, value)` for every counter write
    pub fn time_writes(&self) -> Vec<(bool, u32)> {
        self.time_writes.borrow().clone()
    }

    /// `(high_half, value)` for every compare write
    pub fn compare_writes(&self) -> Vec<(bool, u32)> {
        self.compare_writes.borrow().clone()
    }

    /// Full 64-bit compare value after each compare write
    pub fn compare_history(&self) -> Vec<u64> {
        self.compare_history.borrow().clone()
    }

    pub fn clear_history(&self) {
        self.compare_writes.borrow_mut().clear();
        self.compare_history.borrow_mut().clear();
        self.time_writes.borrow_mut().clear();
    }

    pub fn software_interrupt(&self) -> bool {
        self.msip.get()
    }

    fn record_compare(&self, high: bool, value: u32) {
        let old = self.compare.get();
        let new = if high {
            (old & 0xFFFF_FFFF) | (u64::from(value) << 32)
        } else {
            (old & !0xFFFF_FFFF) | u64::from(value)
        };
        self.compare.set(new);
        self.compare_writes.borrow_mut().push((high, value));
        self.compare_history.borrow_mut().push(new);
    }
}

impl CounterRegisters for SimCounter {
    fn time_lo(&self) -> u32 {
        let t = self.time.get();
        self.time.set(t.wrapping_add(self.step));
        t as u32
    }

    fn time_hi(&self) -> u32 {
        (self.time.get() >> 32) as u32
    }

    fn set_time_lo(&mut self, value: u32) {
        let t = self.time.get();
        self.time.set((t & !0xFFFF_FFFF) | u64::from(value));
        self.time_writes.borrow_mut().push((false, value));
    }

    fn set_time_hi(&mut self, value: u32) {
        let t = self.time.get();
        self.time.set((t & 0xFFFF_FFFF) | (u64::from(value) << 32));
        self.time_writes.borrow_mut().push((true, value));
    }

    fn compare_lo(&self) -> u32 {
        self.compare.get() as u32
    }

    fn compare_hi(&self) -> u32 {
        (self.compare.get() >> 32) as u32
    }

    fn set_compare_lo(&mut self, value: u32) {
        self.record_compare(false, value);
    }

    fn set_compare_hi(&mut self, value: u32) {
        self.record_compare(true, value);
    }

    fn set_software_interrupt(&mut self, pending: bool) {
        self.msip.set(pending);
    }
}

/// Clock whose delays complete instantly and are recorded
pub struct SimClock {
    now: Cell<u64>,
    hz: u32,
    delays: RefCell<Vec<u64>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            hz: 12_000_000,
            delays: RefCell::new(Vec::new()),
        }
    }

    /// Every requested delay, in ticks
    pub fn delays(&self) -> Vec<u64> {
        self.delays.borrow().clone()
    }

    pub fn total_delay(&self) -> u64 {
        self.delays.borrow().iter().sum()
    }
}

impl Clock for SimClock {
    fn now(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(1));
        t
    }

    fn ticks_per_second(&self) -> u32 {
        self.hz
    }

    fn delay_ticks(&self, ticks: u64) {
        self.delays.borrow_mut().push(ticks);
        self.now.set(self.now.get().wrapping_add(ticks));
    }
}

/// One register-level event on the simulated I2C controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cEvent {
    Start(u8),
    Write(u8),
    Read(u8),
    Stop(u32),
}

/// Simulated I2C controller
///
/// Stays busy for `busy_polls` polls after every register write. Writing a
/// register while busy panics, so tests catch any missing busy-wait.
pub struct SimI2c {
    busy_polls: u32,
    busy_left: Cell<u32>,
    stuck: Cell<bool>,
    ready_polls: u32,
    ready_left: Cell<u32>,
    never_ready: bool,
    hang_on_stop: bool,
    slow_once: Cell<Option<(u8, u32)>>,
    ack: Cell<bool>,
    nack_addresses: Vec<u8>,
    nack_data: Vec<u8>,
    read_queue: RefCell<VecDeque<u8>>,
    stop_reg: Cell<u32>,
    events: RefCell<Vec<I2cEvent>>,
}

impl SimI2c {
    pub fn new() -> Self {
        Self {
            busy_polls: 3,
            busy_left: Cell::new(0),
            stuck: Cell::new(false),
            ready_polls: 2,
            ready_left: Cell::new(0),
            never_ready: false,
            hang_on_stop: false,
            slow_once: Cell::new(None),
            ack: Cell::new(false),
            nack_addresses: Vec::new(),
            nack_data: Vec::new(),
            read_queue: RefCell::new(VecDeque::new()),
            stop_reg: Cell::new(0),
            events: RefCell::new(Vec::new()),
        }
    }

    /// Busy flag never clears
    pub fn stuck(self) -> Self {
        self.stuck.set(true);
        self
    }

    /// Read-ready flag never sets
    pub fn never_ready(mut self) -> Self {
        self.never_ready = true;
        self
    }

    /// Busy flag sticks once a STOP is requested
    pub fn hang_on_stop(mut self) -> Self {
        self.hang_on_stop = true;
        self
    }

    /// Stay busy for `polls` polls after the first write of `data`
    pub fn slow_once_on(self, data: u8, polls: u32) -> Self {
        self.slow_once.set(Some((data, polls)));
        self
    }

    /// NACK this 8-bit (R/W included) address
    pub fn nack_address(mut self, address: u8) -> Self {
        self.nack_addresses.push(address);
        self
    }

    /// NACK every write of this data byte
    pub fn nack_data(mut self, data: u8) -> Self {
        self.nack_data.push(data);
        self
    }

    /// Queue bytes returned by the read register
    pub fn with_read_data(self, bytes: &[u8]) -> Self {
        self.read_queue.borrow_mut().extend(bytes.iter().copied());
        self
    }

    pub fn events(&self) -> Vec<I2cEvent> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    /// All data bytes written, in order
    pub fn written_bytes(&self) -> Vec<u8> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                I2cEvent::Write(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&I2cEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(*e)).count()
    }

    pub fn stop_register(&self) -> u32 {
        self.stop_reg.get()
    }

    /// Force the stop register, as left behind by an interrupted transaction
    pub fn set_stop_register(&self, value: u32) {
        self.stop_reg.set(value);
    }

    fn assert_idle(&self, what: &str) {
        assert_eq!(
            self.busy_left.get(),
            0,
            "{} written while controller busy",
            what
        );
        assert!(!self.stuck.get(), "{} written while controller hung", what);
    }

    fn kick(&self) {
        self.busy_left.set(self.busy_polls);
    }
}

impl I2cRegisters for SimI2c {
    fn busy(&self) -> bool {
        if self.stuck.get() {
            return true;
        }
        let left = self.busy_left.get();
        if left > 0 {
            self.busy_left.set(left - 1);
            true
        } else {
            false
        }
    }

    fn ack(&self) -> bool {
        self.ack.get()
    }

    fn read_ready(&self) -> bool {
        if self.never_ready {
            return false;
        }
        let left = self.ready_left.get();
        if left > 0 {
            self.ready_left.set(left - 1);
            false
        } else {
            true
        }
    }

    fn write_start(&mut self, address: u8) {
        self.assert_idle("start");
        self.ack.set(!self.nack_addresses.contains(&address));
        self.ready_left.set(self.ready_polls);
        self.events.borrow_mut().push(I2cEvent::Start(address));
        self.kick();
    }

    fn write_data(&mut self, data: u8) {
        self.assert_idle("data");
        self.ack.set(!self.nack_data.contains(&data));
        self.events.borrow_mut().push(I2cEvent::Write(data));
        self.kick();
        if let Some((slow, polls)) = self.slow_once.get() {
            if slow == data {
                self.slow_once.set(None);
                self.busy_left.set(polls);
            }
        }
    }

    fn read_data(&self) -> u8 {
        let byte = self.read_queue.borrow_mut().pop_front().unwrap_or(0xFF);
        self.ready_left.set(self.ready_polls);
        self.events.borrow_mut().push(I2cEvent::Read(byte));
        self.kick();
        byte
    }

    fn write_stop(&mut self, value: u32) {
        // Re-arming (writing 0) is allowed even on a hung bus
        if value != 0 {
            self.assert_idle("stop");
        }
        self.stop_reg.set(value);
        self.events.borrow_mut().push(I2cEvent::Stop(value));
        if value != 0 {
            self.kick();
            if self.hang_on_stop {
                self.stuck.set(true);
            }
        }
    }
}
