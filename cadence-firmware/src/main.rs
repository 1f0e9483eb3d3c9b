//! Cadence - Watch Firmware
//!
//! Main firmware binary for RP2040-based watch boards. Boots the
//! peripherals, loads settings from flash, wires the watch graph once and
//! then runs it every tick.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embedded_alloc::LlffHeap as Heap;
use {defmt_rtt as _, panic_probe as _};

use cadence_hal::Clock;
use cadence_hal_rp2040::{EmbassyClock, Rp2040FlashStorage, RpInput, RpOutput};
use cadence_watch::{Peripherals, WatchConfig, WatchGraph, WatchStorage};

use crate::board::{IdleCharacteristic, LogDisplay};

mod board;
mod tasks;

// Heap for the graph's shared state cells
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 8KB
const HEAP_SIZE: usize = 8 * 1024;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Cadence firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let mut storage = WatchStorage::new(Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0));
    let config = load_config(&mut storage).await;

    let clock = EmbassyClock::new();
    let graph = WatchGraph::new(&config);

    match storage.load_time().await {
        Ok(Some((date_time, weekday))) => {
            info!("Restoring last synced time {:?}", date_time);
            graph.restore(date_time, weekday, clock.now_ms());
        }
        Ok(None) => info!("No synced time stored, waiting for phone"),
        Err(e) => warn!("Stored time unreadable: {:?}", e),
    }

    // Button to ground on GPIO 14, heartbeat on the Pico LED
    let hw = Peripherals {
        clock,
        button: RpInput::new(Input::new(p.PIN_14, Pull::Up), true),
        led: RpOutput::new(Output::new(p.PIN_25, Level::Low)),
        date_time: IdleCharacteristic::new(),
        weekday: IdleCharacteristic::new(),
        display: LogDisplay::new(),
    };

    info!("Watch graph wired, advertising as {=str}", config.device_name.as_str());
    tasks::run(graph, hw, storage).await
}

/// Load settings, falling back to the defaults if flash is unusable
async fn load_config<S: cadence_hal::FlashStorage>(storage: &mut WatchStorage<S>) -> WatchConfig {
    info!("Loading configuration from flash...");
    match storage.load_config().await {
        Ok(config) => {
            debug!(
                "debounce {} ms, blink {} ms, history {}",
                config.debounce_ms, config.blink_interval_ms, config.history_depth
            );
            config
        }
        Err(e) => {
            warn!("Failed to load config: {:?}, using defaults", e);
            WatchConfig::default()
        }
    }
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    unsafe { HEAP.init(core::ptr::addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE) }
}
