//! Tick loop
//!
//! Samples the hardware and runs the watch graph once per tick. A sync
//! from the phone is written back to flash so the clock survives a reset.

use cadence_hal::{Characteristic, Clock, DisplayBackend, FlashStorage, InputPin, OutputPin};
use cadence_watch::{Peripherals, WatchGraph, WatchStorage};
use defmt::*;
use embassy_time::{Duration, Ticker};

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u32 = 10;

/// Run the graph forever
pub async fn run<S, C, B, L, K, D>(
    graph: WatchGraph,
    mut hw: Peripherals<C, B, L, K, D>,
    mut storage: WatchStorage<S>,
) -> !
where
    S: FlashStorage,
    C: Clock,
    B: InputPin,
    L: OutputPin,
    K: Characteristic,
    D: DisplayBackend,
{
    info!("Tick loop started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;

        let report = graph.tick(&mut hw);

        if let Some(total) = report.press {
            info!("Button press #{} at {} ms", total, report.now_ms);
        }
        if let Some(e) = report.link_error {
            warn!("Rejected characteristic write: {:?}", e);
        }
        if let Some(e) = report.display_error {
            warn!("Display error: {:?}", e);
        }
        if let Some((date_time, weekday)) = report.synced {
            info!("Time synced: {:?} {:?}", date_time, weekday);
            if let Err(e) = storage.store_time(&date_time, weekday).await {
                warn!("Failed to persist synced time: {:?}", e);
            }
        }
    }
}
