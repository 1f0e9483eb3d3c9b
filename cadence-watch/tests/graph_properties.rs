//! Property tests driving the whole watch graph with simulated hardware

use core::cell::Cell;

use cadence_hal::{
    BleError, Characteristic, Clock, DisplayBackend, DisplayError, InputPin, OutputPin, Rgb565,
};
use cadence_watch::config::HISTORY_CAPACITY;
use cadence_watch::{Peripherals, WatchConfig, WatchGraph};
use proptest::prelude::*;

struct SimClock(Cell<u32>);

impl Clock for SimClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

struct SimButton(Cell<bool>);

impl InputPin for SimButton {
    fn is_high(&self) -> bool {
        self.0.get()
    }
}

#[derive(Default)]
struct SimLed(bool);

impl OutputPin for SimLed {
    fn set_high(&mut self) {
        self.0 = true;
    }

    fn set_low(&mut self) {
        self.0 = false;
    }

    fn is_set_high(&self) -> bool {
        self.0
    }
}

/// Characteristic nobody ever writes
struct Idle;

impl Characteristic for Idle {
    fn take_written(&mut self) -> bool {
        false
    }

    fn read(&self, _buffer: &mut [u8]) -> Result<usize, BleError> {
        Err(BleError::NotConnected)
    }

    fn write(&mut self, _data: &[u8]) -> Result<(), BleError> {
        Err(BleError::NotConnected)
    }
}

#[derive(Default)]
struct CountingDisplay {
    frames: u32,
}

impl DisplayBackend for CountingDisplay {
    fn clear(&mut self, _color: Rgb565) -> Result<(), DisplayError> {
        Ok(())
    }

    fn fill_rect(&mut self, _: u16, _: u16, _: u16, _: u16, _: Rgb565) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_text(&mut self, _: u16, _: u16, _: &str, _: Rgb565, _: u8) -> Result<(), DisplayError> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.frames += 1;
        Ok(())
    }

    fn dimensions(&self) -> (u16, u16) {
        (128, 128)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

type SimHw = Peripherals<SimClock, SimButton, SimLed, Idle, CountingDisplay>;

fn hardware() -> SimHw {
    Peripherals {
        clock: SimClock(Cell::new(0)),
        button: SimButton(Cell::new(false)),
        led: SimLed::default(),
        date_time: Idle,
        weekday: Idle,
        display: CountingDisplay::default(),
    }
}

proptest! {
    /// History is bounded, newest first, and agrees with the press count
    #[test]
    fn press_history_is_bounded_and_ordered(
        steps in prop::collection::vec((any::<bool>(), 1u32..120), 1..200),
    ) {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();
        let mut now = 0u32;
        let mut presses = 0u32;

        for (high, gap) in steps {
            now += gap;
            hw.clock.0.set(now);
            hw.button.0.set(high);
            if let Some(total) = graph.tick(&mut hw).press {
                presses += 1;
                prop_assert_eq!(total, presses);
            }
        }

        let history = graph.press_history();
        prop_assert!(history.len() <= HISTORY_CAPACITY);
        prop_assert_eq!(history.len(), (presses as usize).min(HISTORY_CAPACITY));
        prop_assert!(history.as_slice().windows(2).all(|w| w[0] > w[1]));
    }

    /// The display only redraws when what it shows changes
    #[test]
    fn redraws_at_most_once_per_change(
        gaps in prop::collection::vec(1u32..50, 1..100),
    ) {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();
        let mut now = 0u32;
        let mut redraws = 0u32;

        for gap in gaps {
            now += gap;
            hw.clock.0.set(now);
            if graph.tick(&mut hw).redrawn {
                redraws += 1;
            }
        }

        // Unsynced and idle: the face never changes after the first frame
        prop_assert_eq!(redraws, 1);
        prop_assert_eq!(hw.display.frames, 1);
    }
}
