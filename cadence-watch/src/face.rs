//! Watch face contents and rendering

use core::fmt::Write;

use cadence_hal::{DisplayBackend, DisplayError, Rgb565};
use cadence_protocol::{DayDateTime, DayOfWeek};
use heapless::String;

const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Age after which the graph moves a [`SyncPoint`] anchor forward
///
/// Clock readings wrap after about 49.7 days; rebasing once a day keeps the
/// elapsed time far below that.
pub const REBASE_AFTER_MS: u32 = SECONDS_PER_DAY * 1000;

/// Time base set by the last sync with the phone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncPoint {
    pub date_time: DayDateTime,
    pub weekday: DayOfWeek,
    /// Clock reading when the sync arrived
    pub at_ms: u32,
}

impl SyncPoint {
    /// Wall-clock time and weekday at clock reading `now_ms`
    pub fn wall_time(&self, now_ms: u32) -> (u32, DayOfWeek) {
        let elapsed_s = now_ms.wrapping_sub(self.at_ms) / 1000;
        let total = self.date_time.seconds_of_day() + elapsed_s;
        let days = total / SECONDS_PER_DAY;
        let weekday = (self.weekday as u32 + days) % 7;
        (
            total % SECONDS_PER_DAY,
            DayOfWeek::from_u8(weekday as u8).unwrap_or_default(),
        )
    }

    /// Equivalent sync point anchored at the last whole second before `now_ms`
    ///
    /// Time of day and weekday carry over. The calendar date is left as
    /// synced; the next write from the phone replaces it.
    pub fn rebased(&self, now_ms: u32) -> Self {
        let elapsed_s = now_ms.wrapping_sub(self.at_ms) / 1000;
        let (seconds, weekday) = self.wall_time(now_ms);
        Self {
            date_time: DayDateTime {
                hour: (seconds / 3600) as u8,
                minute: (seconds / 60 % 60) as u8,
                second: (seconds % 60) as u8,
                ..self.date_time
            },
            weekday,
            at_ms: self.at_ms.wrapping_add(elapsed_s * 1000),
        }
    }
}

/// Everything shown on the display
///
/// Two equal faces draw identical pixels, so the graph redraws only when
/// this value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Face {
    /// Seconds since midnight, `None` until the first sync
    pub seconds: Option<u32>,
    pub weekday: DayOfWeek,
    /// Presses within the last minute among the remembered ones
    pub recent_presses: u8,
}

impl Face {
    /// Build the face for clock reading `now_ms`
    pub fn at(sync: Option<SyncPoint>, now_ms: u32, recent_presses: u8) -> Self {
        match sync {
            Some(sync) => {
                let (seconds, weekday) = sync.wall_time(now_ms);
                Self {
                    seconds: Some(seconds),
                    weekday,
                    recent_presses,
                }
            }
            None => Self {
                recent_presses,
                ..Self::default()
            },
        }
    }

    /// `HH:MM:SS`, or dashes before the first sync
    pub fn clock_text(&self) -> String<8> {
        let mut text = String::new();
        // Eight characters always fit
        let _ = match self.seconds {
            Some(s) => write!(text, "{:02}:{:02}:{:02}", s / 3600, s / 60 % 60, s % 60),
            None => text.push_str("--:--:--").map_err(|_| core::fmt::Error),
        };
        text
    }

    /// Paint the face
    pub fn render<D: DisplayBackend>(&self, display: &mut D) -> Result<(), DisplayError> {
        let (width, _) = display.dimensions();
        display.clear(Rgb565::BLACK)?;

        let weekday = if self.seconds.is_some() {
            self.weekday.short_name()
        } else {
            "SYNC"
        };
        display.draw_text(8, 12, weekday, Rgb565::GREEN, 1)?;

        // Scale 2 font is 12 px wide per glyph
        let x = width.saturating_sub(8 * 12) / 2;
        display.draw_text(x, 48, &self.clock_text(), Rgb565::WHITE, 2)?;

        let mut presses: String<16> = String::new();
        let _ = write!(presses, "presses {}", self.recent_presses);
        display.draw_text(8, 100, &presses, Rgb565::BLUE, 1)
    }
}
