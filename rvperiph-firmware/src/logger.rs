//! defmt global logger framing log output over the UART
//!
//! There is no debug probe on the board, so frames go out the serial port
//! and are decoded on the host with `defmt-print`.

use core::ptr::addr_of_mut;

use critical_section::RestoreState;
use embedded_io::Write;
use portable_atomic::{AtomicBool, Ordering};
use rvperiph_drivers::UartPort;
use rvperiph_hal_soc::Uart;

#[defmt::global_logger]
struct UartLogger;

static TAKEN: AtomicBool = AtomicBool::new(false);
static mut RESTORE: RestoreState = RestoreState::invalid();
static mut ENCODER: defmt::Encoder = defmt::Encoder::new();
static mut PORT: Option<UartPort<Uart>> = None;

/// Hand the UART to the logger. Frames logged before this are dropped.
pub fn init(port: UartPort<Uart>) {
    critical_section::with(|_| {
        // SAFETY: PORT is only touched inside a critical section
        unsafe { *addr_of_mut!(PORT) = Some(port) };
    });
}

fn emit(bytes: &[u8]) {
    // SAFETY: called only between acquire and release, inside the critical section
    if let Some(port) = unsafe { (*addr_of_mut!(PORT)).as_mut() } {
        let _ = port.write_all(bytes);
    }
}

unsafe impl defmt::Logger for UartLogger {
    fn acquire() {
        // SAFETY: paired with the release in `release`
        let restore = unsafe { critical_section::acquire() };

        if TAKEN.load(Ordering::Relaxed) {
            panic!("defmt logger taken reentrantly");
        }
        TAKEN.store(true, Ordering::Relaxed);

        // SAFETY: inside the critical section just acquired
        unsafe {
            RESTORE = restore;
            (*addr_of_mut!(ENCODER)).start_frame(emit);
        }
    }

    unsafe fn flush() {
        if let Some(port) = (*addr_of_mut!(PORT)).as_mut() {
            let _ = port.flush();
        }
    }

    unsafe fn release() {
        (*addr_of_mut!(ENCODER)).end_frame(emit);
        TAKEN.store(false, Ordering::Relaxed);

        let restore = RESTORE;
        critical_section::release(restore);
    }

    unsafe fn write(bytes: &[u8]) {
        (*addr_of_mut!(ENCODER)).write(bytes, emit);
    }
}
