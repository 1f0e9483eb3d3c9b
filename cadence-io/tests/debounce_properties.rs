//! Property tests for the debouncer and edge detection

use cadence_core::{Shared, Signal};
use cadence_hal::PinState;
use cadence_io::pin::edge;
use cadence_io::{debounce_delay, Debounce};
use proptest::prelude::*;

fn level(high: bool) -> PinState {
    PinState::from_high(high)
}

proptest! {
    /// Chatter faster than the delay never reaches the output
    #[test]
    fn alternating_chatter_is_rejected(
        delay in 2u32..200,
        gaps in prop::collection::vec(1u32..1000, 1..64),
    ) {
        let state = Shared::new(Debounce::default());
        let mut now = 0u32;
        let mut high = true;

        for gap in gaps {
            let out = debounce_delay(delay, &state, Signal::of(level(high)), Signal::of(now));
            prop_assert_eq!(out.into_option(), Some(PinState::Low));
            now += gap % delay;
            if gap % delay == 0 {
                now += 1;
            }
            high = !high;
        }
    }

    /// Whatever came before, a level held for the delay is accepted
    #[test]
    fn held_level_wins(
        delay in 1u32..200,
        noise in prop::collection::vec((any::<bool>(), 1u32..100), 0..32),
        last in any::<bool>(),
    ) {
        let state = Shared::new(Debounce::default());
        let mut now = 0u32;

        for (high, gap) in noise {
            debounce_delay(delay, &state, Signal::of(level(high)), Signal::of(now));
            now += gap;
        }

        let start = now;
        let mut out = None;
        while now <= start + delay {
            out = debounce_delay(delay, &state, Signal::of(level(last)), Signal::of(now))
                .into_option();
            now += 1;
        }
        prop_assert_eq!(out, Some(level(last)));
    }

    /// Edges alternate direction and match level changes one to one
    #[test]
    fn edges_track_level_changes(levels in prop::collection::vec(any::<bool>(), 1..64)) {
        let last = Shared::new(Some(PinState::Low));
        let mut current = PinState::Low;
        let mut changes = 0;
        let mut edges = 0;

        for high in levels {
            let next = level(high);
            if next != current {
                changes += 1;
                current = next;
            }
            if let Some(e) = edge(&last, Signal::of(next)).into_option() {
                edges += 1;
                prop_assert_eq!(e, cadence_io::Edge::from_level(next));
            }
        }
        prop_assert_eq!(edges, changes);
    }
}
