//! pixbus demo firmware
//!
//! Brings up a 240x320 ILI9341-class panel on a bit-banged 8080 bus, paints
//! the screen blue and draws a few test shapes. Wiring comes from
//! `display.toml`, validated at build time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use pixbus_core::config::{BusTiming, DisplayConfig, PinAssignment, PinConfig, Quirks};
use pixbus_core::{DrawError, Rgb565};
use pixbus_driver::{Controller, Display};

mod board;

// Generated by build.rs from display.toml
include!(concat!(env!("OUT_DIR"), "/display_config.rs"));

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("pixbus starting...");

    let p = embassy_rp::init(Default::default());

    let bus = match board::parallel_bus(p, &DISPLAY_CONFIG) {
        Ok(bus) => bus,
        Err(e) => {
            error!("Failed to claim display pins: {:?}", e);
            halt().await
        }
    };

    let mut controller = Controller::new(bus, Delay);
    if let Err(e) = controller.init() {
        error!("Display init failed: {:?}", e);
        halt().await
    }
    info!("Display ready");

    let mut display = Display::new(controller, DISPLAY_CONFIG.quirks);
    display.fill_screen(Rgb565::BLUE);

    if let Err(e) = draw_demo(&mut display) {
        warn!("Demo drawing stopped: {:?}", e);
    }

    halt().await
}

fn draw_demo<I, D>(display: &mut Display<I, D>) -> Result<(), DrawError>
where
    I: pixbus_driver::CommandInterface + pixbus_driver::BusControl,
    D: embedded_hal::delay::DelayNs,
{
    display.draw_pixel(120, 160, Rgb565::WHITE)?;

    display.draw_line(0, 0, 239, 319, Rgb565::WHITE)?;
    display.draw_line(239, 0, 0, 319, Rgb565::WHITE)?;
    display.draw_line(20, 300, 220, 300, Rgb565::GREEN)?;
    display.draw_line(20, 20, 20, 120, Rgb565::GREEN)?;

    display.draw_rectangle(40, 40, 60, Rgb565::RED, true)?;
    display.draw_rectangle(140, 40, 60, Rgb565::WHITE, false)?;
    display.draw_rectangle(90, 200, 60, Rgb565::from_rgb(255, 255, 0), false)?;

    Ok(())
}

/// Park the executor; the panel keeps its contents without refresh
async fn halt() -> ! {
    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}
