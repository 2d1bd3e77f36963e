//! rvperiph - LCD counter demo
//!
//! Brings up the time base, the I2C controller and the character LCD, prints
//! a banner on row 1 and then counts seconds on row 2. Log output goes out
//! over the UART as defmt frames.

#![no_std]
#![no_main]

use core::fmt::Write as _;

use defmt::{error, info, warn};
use riscv_rt::entry;
use {panic_halt as _, riscv as _};

use rvperiph_core::{
    BusConfig, Clock, ClockConfig, I2cBus, LcdConfig, LcdDriver, LcdError, TimeBase, WriteOutcome,
};
use rvperiph_drivers::UartPort;
use rvperiph_hal_soc::{map, Peripherals};

mod logger;

const BANNER: &str = " rvperiph demo";
const COUNTER_ROW: u8 = 2;
const COUNTER_COL: u8 = 7;
const TICK_MS: u64 = 1_000;

#[entry]
fn main() -> ! {
    let Some(p) = Peripherals::take() else {
        halt();
    };

    logger::init(UartPort::new(p.uart));
    info!("rvperiph firmware starting");

    let time = TimeBase::new(p.clint, ClockConfig::new(map::CPU_CLK_HZ));
    let bus = I2cBus::new(p.i2c, &time, BusConfig::default());
    let mut lcd = LcdDriver::new(bus, LcdConfig::default());

    report("init", lcd.init());
    report("banner", lcd.set_cursor(1, 1));
    report("banner", lcd.write_string(BANNER));
    info!("lcd ready");

    let mut counter: u32 = 0;
    loop {
        report("counter", lcd.set_cursor(COUNTER_ROW, COUNTER_COL));
        if write!(lcd, "{}", counter).is_err() {
            warn!("counter write failed");
        }

        time.delay_ms(TICK_MS);
        counter = counter.wrapping_add(1);
    }
}

fn report(what: &str, result: Result<WriteOutcome, LcdError>) {
    match result {
        Ok(WriteOutcome::Success) => {}
        Ok(outcome) => warn!("lcd {}: {}", what, outcome),
        Err(e) => error!("lcd {}: {}", what, e),
    }
}

fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
