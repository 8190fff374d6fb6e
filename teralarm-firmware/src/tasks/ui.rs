//! User interface task
//!
//! Owns the interaction engine and steps it forever. Each tick is one
//! cooperative step of the active screen; yielding between ticks lets the
//! executor service the time driver.

use defmt::*;
use embassy_futures::yield_now;

use teralarm_core::{App, AppContext};

use crate::board::{Board, Lcd, Store};

#[embassy_executor::task]
pub async fn ui_task(mut app: App<Store>, mut ctx: AppContext<Board, Lcd>) {
    info!("UI task started in {:?} mode", app.mode());

    loop {
        app.tick(&mut ctx);
        yield_now().await;
    }
}
