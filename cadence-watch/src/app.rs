//! Watch tick graph
//!
//! ```text
//! clock ─┬─▶ every ──▶ toggle ──────────────────────────▶ dig_write(led)
//!        │
//! button ┴─▶ debounce ─▶ rising_edge ─┬─▶ record ─┐
//!                                     └─▶ count   │
//! date_time ─▶ received ─┐                        ▼
//!                        ├─▶ map2 ─▶ latch ─▶ face ─▶ drop_repeats ─▶ present
//! weekday ───▶ received ─┘
//! ```
//!
//! The graph owns one [`Shared`] cell per stateful combinator. Cells are
//! created by [`WatchGraph::new`] and live as long as the graph.

use cadence_core::signal::{count, drop_repeats, latch, map2, merge, record, toggle, unmeta};
use cadence_core::{Seq, Shared};
use cadence_hal::{Characteristic, Clock, DisplayBackend, DisplayError, InputPin, OutputPin, PinState};
use cadence_io::ble::{received, LinkError};
use cadence_io::{debounce_delay, draw, pin, time, Debounce};
use cadence_protocol::{DayDateTime, DayOfWeek, DAY_DATE_TIME_LEN, DAY_OF_WEEK_LEN};

use crate::config::{WatchConfig, HISTORY_CAPACITY};
use crate::face::{Face, SyncPoint, REBASE_AFTER_MS};

/// Presses older than this do not count on the face
const RECENT_WINDOW_MS: u32 = 60_000;

/// Hardware the graph samples and drives
pub struct Peripherals<C, B, L, K, D> {
    pub clock: C,
    pub button: B,
    pub led: L,
    /// Day Date Time characteristic
    pub date_time: K,
    /// Day of Week characteristic
    pub weekday: K,
    pub display: D,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub now_ms: u32,
    /// Level written to the heartbeat LED
    pub led: Option<PinState>,
    /// Total presses so far, on ticks where a press was accepted
    pub press: Option<u32>,
    /// Calendar after a write from the phone this tick
    pub synced: Option<(DayDateTime, DayOfWeek)>,
    /// Whether the display was redrawn
    pub redrawn: bool,
    /// A characteristic write that could not be decoded
    pub link_error: Option<LinkError>,
    pub display_error: Option<DisplayError>,
}

/// State of the watch application between ticks
pub struct WatchGraph {
    debounce_ms: u32,
    blink_interval_ms: u32,
    history_depth: usize,

    blink_window: Shared<u32>,
    led_level: Shared<PinState>,
    button: Shared<Debounce>,
    button_last: Shared<Option<PinState>>,
    presses: Shared<Seq<u32, HISTORY_CAPACITY>>,
    press_total: Shared<u32>,
    /// Last date/time with the clock reading it arrived at, last weekday
    calendar: Shared<(Option<(DayDateTime, u32)>, DayOfWeek)>,
    sync: Shared<Option<SyncPoint>>,
    shown: Shared<Option<Face>>,
}

impl WatchGraph {
    /// Allocate the state cells for `config`
    pub fn new(config: &WatchConfig) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            blink_interval_ms: config.blink_interval_ms,
            history_depth: usize::from(config.history_depth).min(HISTORY_CAPACITY),

            blink_window: Shared::new(0),
            led_level: Shared::new(PinState::Low),
            button: Shared::new(Debounce::new(PinState::Low)),
            button_last: Shared::new(Some(PinState::Low)),
            presses: Shared::new(Seq::new()),
            press_total: Shared::new(0),
            calendar: Shared::new((None, DayOfWeek::default())),
            sync: Shared::new(None),
            shown: Shared::new(None),
        }
    }

    /// Start from a time restored at boot instead of an unsynced face
    ///
    /// The clock resumes from `date_time` as of `now_ms`; the first sync
    /// from the phone replaces it.
    pub fn restore(&self, date_time: DayDateTime, weekday: DayOfWeek, now_ms: u32) {
        self.calendar.set((Some((date_time, now_ms)), weekday));
        self.sync.set(Some(SyncPoint {
            date_time,
            weekday,
            at_ms: now_ms,
        }));
    }

    /// Button press times, newest first
    pub fn press_history(&self) -> Seq<u32, HISTORY_CAPACITY> {
        self.presses.get()
    }

    /// Run one tick: sample every input once and drive the sinks
    pub fn tick<C, B, L, K, D>(&self, hw: &mut Peripherals<C, B, L, K, D>) -> TickReport
    where
        C: Clock,
        B: InputPin,
        L: OutputPin,
        K: Characteristic,
        D: DisplayBackend,
    {
        let now = time::now(&hw.clock);
        let now_ms = now.into_option().unwrap_or_default();
        let mut report = TickReport {
            now_ms,
            ..TickReport::default()
        };

        // Heartbeat
        let beat = time::every(self.blink_interval_ms, &self.blink_window, now);
        let led = toggle(PinState::High, PinState::Low, &self.led_level, beat);
        report.led = led.into_option();
        pin::dig_write(&mut hw.led, led);

        // Button
        let level = pin::dig_read(&hw.button);
        let accepted = debounce_delay(self.debounce_ms, &self.button, level, now);
        let press = pin::rising_edge(&self.button_last, accepted);
        record(&self.presses, press.map(|()| now_ms));
        report.press = count(&self.press_total, press).into_option();

        // Time sync
        let date_time = received::<DayDateTime, _, DAY_DATE_TIME_LEN>(&mut hw.date_time);
        let weekday = received::<DayOfWeek, _, DAY_OF_WEEK_LEN>(&mut hw.weekday);
        report.link_error = merge(
            unmeta(date_time.map(Result::err)),
            unmeta(weekday.map(Result::err)),
        )
        .into_option();

        // A weekday written on a later tick keeps the date/time anchor
        let stamped = unmeta(date_time.map(Result::ok)).map(|d| Some((d, now_ms)));
        let calendar = map2(
            |stamped: Option<(DayDateTime, u32)>, weekday| {
                stamped.map(|(date_time, at_ms)| SyncPoint {
                    date_time,
                    weekday,
                    at_ms,
                })
            },
            &self.calendar,
            stamped,
            unmeta(weekday.map(Result::ok)),
        );
        // Nothing to latch before the first date/time
        let synced = unmeta(calendar);
        report.synced = synced.map(|p| (p.date_time, p.weekday)).into_option();
        let sync = latch(&self.sync, synced.map(Some))
            .map(|sync| sync.map(|point| self.rebase_if_stale(point, now_ms)));

        // Display
        let recent = self.recent_presses(now_ms);
        let face = sync.map(|sync| Face::at(sync, now_ms, recent));
        let changed = drop_repeats(&self.shown, face);
        report.redrawn = changed.is_active();
        if let Err(e) = draw::present(&mut hw.display, changed, |display, face| {
            face.render(display)
        }) {
            report.redrawn = false;
            report.display_error = Some(e);
            // Draw again next tick
            self.shown.set(None);
        }

        report
    }

    fn rebase_if_stale(&self, point: SyncPoint, now_ms: u32) -> SyncPoint {
        if now_ms.wrapping_sub(point.at_ms) < REBASE_AFTER_MS {
            return point;
        }
        let point = point.rebased(now_ms);
        self.sync.set(Some(point));
        point
    }

    fn recent_presses(&self, now_ms: u32) -> u8 {
        let recent = self.presses.with(|presses| {
            presses
                .iter()
                .take(self.history_depth)
                .filter(|&&at| now_ms.wrapping_sub(at) < RECENT_WINDOW_MS)
                .count()
        });
        u8::try_from(recent).unwrap_or(u8::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_hal::{BleError, Rgb565};
    use cadence_protocol::Payload;
    use core::cell::Cell;

    struct TestClock(Cell<u32>);

    impl Clock for TestClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    struct TestButton(Cell<bool>);

    impl InputPin for TestButton {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct TestLed {
        high: bool,
        toggles: u32,
    }

    impl OutputPin for TestLed {
        fn set_high(&mut self) {
            self.high = true;
            self.toggles += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.toggles += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[derive(Default)]
    struct TestCharacteristic {
        value: [u8; 20],
        len: usize,
        written: bool,
    }

    impl TestCharacteristic {
        fn remote_write(&mut self, data: &[u8]) {
            self.value[..data.len()].copy_from_slice(data);
            self.len = data.len();
            self.written = true;
        }
    }

    impl Characteristic for TestCharacteristic {
        fn take_written(&mut self) -> bool {
            core::mem::take(&mut self.written)
        }

        fn read(&self, buffer: &mut [u8]) -> Result<usize, BleError> {
            let out = buffer.get_mut(..self.len).ok_or(BleError::BufferTooSmall)?;
            out.copy_from_slice(&self.value[..self.len]);
            Ok(self.len)
        }

        fn write(&mut self, data: &[u8]) -> Result<(), BleError> {
            self.value[..data.len()].copy_from_slice(data);
            self.len = data.len();
            Ok(())
        }
    }

    #[derive(Default)]
    struct TestDisplay {
        frames: u32,
        last_clock: heapless::String<8>,
    }

    impl DisplayBackend for TestDisplay {
        fn clear(&mut self, _color: Rgb565) -> Result<(), DisplayError> {
            Ok(())
        }

        fn fill_rect(&mut self, _: u16, _: u16, _: u16, _: u16, _: Rgb565) -> Result<(), DisplayError> {
            Ok(())
        }

        fn draw_text(&mut self, _x: u16, y: u16, text: &str, _: Rgb565, _: u8) -> Result<(), DisplayError> {
            if y == 48 {
                self.last_clock.clear();
                let _ = self.last_clock.push_str(text);
            }
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

    type TestHw = Peripherals<TestClock, TestButton, TestLed, TestCharacteristic, TestDisplay>;

    fn hardware() -> TestHw {
        Peripherals {
            clock: TestClock(Cell::new(0)),
            button: TestButton(Cell::new(false)),
            led: TestLed::default(),
            date_time: TestCharacteristic::default(),
            weekday: TestCharacteristic::default(),
            display: TestDisplay::default(),
        }
    }

    fn run(graph: &WatchGraph, hw: &mut TestHw, from: u32, to: u32, step: u32) {
        let mut t = from;
        while t <= to {
            hw.clock.0.set(t);
            graph.tick(hw);
            t += step;
        }
    }

    #[test]
    fn test_heartbeat_toggles_each_interval() {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();

        run(&graph, &mut hw, 0, 2_000, 10);
        // Windows start at 500, 1000, 1500 and 2000
        assert_eq!(hw.led.toggles, 4);
        assert!(!hw.led.is_set_high());
    }

    #[test]
    fn test_debounced_press_recorded() {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();

        run(&graph, &mut hw, 0, 100, 10);
        hw.button.0.set(true);
        hw.clock.0.set(110);
        let report = graph.tick(&mut hw);
        assert_eq!(report.press, Some(1));

        // Bounce on release and again while still inside the delay
        for (t, high) in [(120, false), (130, true), (140, false)] {
            hw.button.0.set(high);
            hw.clock.0.set(t);
            assert_eq!(graph.tick(&mut hw).press, None);
        }

        assert_eq!(graph.press_history().as_slice(), &[110]);
    }

    #[test]
    fn test_time_sync_draws_clock() {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();

        hw.clock.0.set(5);
        graph.tick(&mut hw);
        assert_eq!(hw.display.frames, 1);
        assert_eq!(hw.display.last_clock.as_str(), "--:--:--");

        let time = DayDateTime {
            month: 3,
            day: 2,
            year: 2024,
            hour: 8,
            minute: 30,
            second: 0,
        };
        let mut bytes = [0u8; DAY_DATE_TIME_LEN];
        time.encode(&mut bytes).unwrap();
        hw.date_time.remote_write(&bytes);
        hw.weekday.remote_write(&[DayOfWeek::Tuesday as u8]);

        hw.clock.0.set(1_000);
        let report = graph.tick(&mut hw);
        assert_eq!(report.synced, Some((time, DayOfWeek::Tuesday)));
        assert!(report.redrawn);
        assert_eq!(hw.display.last_clock.as_str(), "08:30:00");

        // Nothing changes within the same second
        hw.clock.0.set(1_400);
        assert!(!graph.tick(&mut hw).redrawn);

        hw.clock.0.set(3_000);
        graph.tick(&mut hw);
        assert_eq!(hw.display.last_clock.as_str(), "08:30:02");
        assert_eq!(hw.display.frames, 3);
    }

    const HALF_PAST_EIGHT: DayDateTime = DayDateTime {
        month: 3,
        day: 2,
        year: 2024,
        hour: 8,
        minute: 30,
        second: 0,
    };

    fn write_date_time(hw: &mut TestHw, time: &DayDateTime) {
        let mut bytes = [0u8; DAY_DATE_TIME_LEN];
        time.encode(&mut bytes).unwrap();
        hw.date_time.remote_write(&bytes);
    }

    #[test]
    fn test_late_weekday_keeps_time_anchor() {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();

        write_date_time(&mut hw, &HALF_PAST_EIGHT);
        hw.clock.0.set(1_000);
        let report = graph.tick(&mut hw);
        assert_eq!(report.synced, Some((HALF_PAST_EIGHT, DayOfWeek::Sunday)));

        // The phone writes the weekday only after the date/time was acked
        hw.weekday.remote_write(&[DayOfWeek::Tuesday as u8]);
        hw.clock.0.set(1_600);
        let report = graph.tick(&mut hw);
        assert_eq!(report.synced, Some((HALF_PAST_EIGHT, DayOfWeek::Tuesday)));

        hw.clock.0.set(2_200);
        graph.tick(&mut hw);
        assert_eq!(hw.display.last_clock.as_str(), "08:30:01");
    }

    #[test]
    fn test_weekday_alone_does_not_sync() {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();

        hw.weekday.remote_write(&[DayOfWeek::Tuesday as u8]);
        hw.clock.0.set(1_000);
        let report = graph.tick(&mut hw);
        assert_eq!(report.synced, None);
        assert_eq!(report.link_error, None);
        assert_eq!(hw.display.last_clock.as_str(), "--:--:--");

        // The remembered weekday pairs with the first date/time
        write_date_time(&mut hw, &HALF_PAST_EIGHT);
        hw.clock.0.set(2_000);
        let report = graph.tick(&mut hw);
        assert_eq!(report.synced, Some((HALF_PAST_EIGHT, DayOfWeek::Tuesday)));
        assert_eq!(hw.display.last_clock.as_str(), "08:30:00");
    }

    #[test]
    fn test_clock_survives_timer_wrap() {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();
        graph.restore(HALF_PAST_EIGHT, DayOfWeek::Saturday, 0);

        // Sixty days in twelve hour ticks, wrapping the millisecond clock once
        let mut t: u32 = 0;
        for _ in 0..120 {
            t = t.wrapping_add(43_200_000);
            hw.clock.0.set(t);
            graph.tick(&mut hw);
        }
        assert_eq!(hw.display.last_clock.as_str(), "08:30:00");
        let sync = graph.sync.get().unwrap();
        assert_eq!(sync.weekday, DayOfWeek::Wednesday);
        assert_eq!(sync.at_ms, t);
    }

    #[test]
    fn test_recent_presses_limited_to_history_depth() {
        let graph = WatchGraph::new(&WatchConfig {
            history_depth: 3,
            ..WatchConfig::default()
        });
        graph
            .presses
            .set(Seq::from_slice(&[90_000, 80_000, 70_000, 60_000, 50_000]));

        assert_eq!(graph.recent_presses(100_000), 3);
        // 70_000 has left the one minute window
        assert_eq!(graph.recent_presses(135_000), 2);
    }

    #[test]
    fn test_bad_payload_reported() {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();

        hw.weekday.remote_write(&[9]);
        let report = graph.tick(&mut hw);
        assert!(matches!(report.link_error, Some(LinkError::Payload(_))));
        assert_eq!(report.synced, None);
    }

    #[test]
    fn test_restore_resumes_clock() {
        let graph = WatchGraph::new(&WatchConfig::default());
        let mut hw = hardware();
        let time = DayDateTime {
            month: 0,
            day: 1,
            year: 2025,
            hour: 0,
            minute: 0,
            second: 59,
        };
        graph.restore(time, DayOfWeek::Wednesday, 0);

        hw.clock.0.set(1_000);
        graph.tick(&mut hw);
        assert_eq!(hw.display.last_clock.as_str(), "00:01:00");
    }
}
