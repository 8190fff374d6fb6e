//! Teralarm - Alarm Clock Firmware
//!
//! Main firmware binary for RP2040-based bedside clocks. The alarm can only
//! be disarmed by answering a short button challenge.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use teralarm_core::{App, AppContext};

mod board;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Teralarm firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let parts = board::Parts::new(p);
    info!("Peripherals initialized");

    // Load settings from flash (defaults for anything missing)
    let app = App::new(parts.store);
    let mode = app.settings().brightness_mode();
    info!("Settings loaded, backlight {:?}", mode);

    let ctx = AppContext::new(parts.board, parts.lcd, mode);

    spawner.spawn(tasks::ui_task(app, ctx)).unwrap();
}
