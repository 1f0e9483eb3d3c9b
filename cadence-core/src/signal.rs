//! Signals and combinators
//!
//! A [`Signal<T>`] is the sample a wire of the graph carries during one tick:
//! either a fresh value or nothing. It is not a queue. Every tick produces a
//! new sample for every wire and the previous one is gone unless a stateful
//! combinator kept it in a [`Shared`] cell.
//!
//! Stateless combinators look only at the samples passed in. Stateful ones
//! also take a cell owned by whoever wired the graph; [`fold_p`] is the
//! primitive the others are built from.
//!
//! ```text
//! tick n:   pin ──▶ debounce ──▶ rising_edge ──▶ toggle ──▶ dig_write
//!                      │                           │
//!                  Shared<..>                  Shared<..>
//! ```

use crate::cell::Shared;
use crate::seq::Seq;
use crate::variant::Either;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sample carried by a wire during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signal<T>(Option<T>);

impl<T> Signal<T> {
    /// Signal with a value this tick
    pub const fn of(value: T) -> Self {
        Self(Some(value))
    }

    /// Signal with nothing this tick
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Check if the signal carries a value this tick
    pub const fn is_active(&self) -> bool {
        self.0.is_some()
    }

    /// Check if the signal carries nothing this tick
    pub const fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow this tick's value
    pub fn value(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Unwrap into the underlying option
    pub fn into_option(self) -> Option<T> {
        self.0
    }

    /// Borrow the sample
    pub fn as_ref(&self) -> Signal<&T> {
        Signal(self.0.as_ref())
    }

    /// Method form of [`map`]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Signal<U> {
        map(f, self)
    }

    /// Method form of [`filter`]
    pub fn filter(self, pred: impl FnOnce(&T) -> bool) -> Signal<T> {
        filter(pred, self)
    }

    /// Method form of [`merge`]
    pub fn merge(self, other: Signal<T>) -> Signal<T> {
        merge(self, other)
    }

    /// Method form of [`sink`]
    pub fn sink(self, f: impl FnOnce(T)) {
        sink(f, self)
    }
}

impl<T: Clone> Signal<&T> {
    /// Clone the borrowed sample
    pub fn cloned(self) -> Signal<T> {
        Signal(self.0.cloned())
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Option<T>> for Signal<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> From<Signal<T>> for Option<T> {
    fn from(value: Signal<T>) -> Self {
        value.0
    }
}

// Stateless combinators

/// Signal that is active every tick with `value`
pub fn constant<T>(value: T) -> Signal<T> {
    Signal::of(value)
}

/// Apply `f` to the sample, if any
pub fn map<T, U>(f: impl FnOnce(T) -> U, incoming: Signal<T>) -> Signal<U> {
    Signal(incoming.0.map(f))
}

/// Drop samples that do not satisfy `pred`
pub fn filter<T>(pred: impl FnOnce(&T) -> bool, incoming: Signal<T>) -> Signal<T> {
    Signal(incoming.0.filter(pred))
}

/// Left-biased merge: `a` whenever `a` is active, otherwise `b`
pub fn merge<T>(a: Signal<T>, b: Signal<T>) -> Signal<T> {
    match a.0 {
        Some(value) => Signal::of(value),
        None => b,
    }
}

/// First active signal in list order
pub fn merge_many<T: Clone>(signals: &[Signal<T>]) -> Signal<T> {
    signals
        .iter()
        .find(|s| s.is_active())
        .cloned()
        .unwrap_or_default()
}

/// Tag each side of a left-biased merge
pub fn join<A, B>(a: Signal<A>, b: Signal<B>) -> Signal<Either<A, B>> {
    match (a.0, b.0) {
        (Some(left), _) => Signal::of(Either::Left(left)),
        (None, Some(right)) => Signal::of(Either::Right(right)),
        (None, None) => Signal::empty(),
    }
}

/// Forget the value, keep the timing
pub fn to_unit<T>(incoming: Signal<T>) -> Signal<()> {
    map(|_| (), incoming)
}

/// Always-active signal describing whether `incoming` fired
pub fn meta<T>(incoming: Signal<T>) -> Signal<Option<T>> {
    Signal::of(incoming.0)
}

/// Inverse of [`meta`]: active when the inner option holds a value
pub fn unmeta<T>(incoming: Signal<Option<T>>) -> Signal<T> {
    Signal(incoming.0.flatten())
}

/// Active only on ticks where both sides are active
pub fn zip<A, B>(a: Signal<A>, b: Signal<B>) -> Signal<(A, B)> {
    Signal(a.0.zip(b.0))
}

/// Run a side effect with the sample, only on ticks where there is one
pub fn sink<T>(f: impl FnOnce(T), incoming: Signal<T>) {
    if let Some(value) = incoming.0 {
        f(value);
    }
}

// Stateful combinators

/// Fold over time
///
/// On a tick with value `v` the new state `f(v, state)` is stored in `state`
/// and emitted. On an empty tick nothing is emitted and the state is left
/// alone.
pub fn fold_p<T, S: Clone>(
    f: impl FnOnce(T, S) -> S,
    state: &Shared<S>,
    incoming: Signal<T>,
) -> Signal<S> {
    match incoming.0 {
        Some(value) => {
            let next = f(value, state.get());
            state.set(next.clone());
            Signal::of(next)
        }
        None => Signal::empty(),
    }
}

/// Emit only values that differ from the last emitted one
///
/// `last` starts as `None`, so the first value always passes.
pub fn drop_repeats<T: Clone + PartialEq>(
    last: &Shared<Option<T>>,
    incoming: Signal<T>,
) -> Signal<T> {
    let fresh = filter(
        |value| last.with(|prev| prev.as_ref() != Some(value)),
        incoming,
    );
    if let Some(value) = fresh.value() {
        last.set(Some(value.clone()));
    }
    fresh
}

/// Hold the most recent value
///
/// Stores and emits fresh values; on empty ticks re-emits the stored one, so
/// the output is active every tick.
pub fn latch<T: Clone>(held: &Shared<T>, incoming: Signal<T>) -> Signal<T> {
    if let Some(value) = incoming.0 {
        held.set(value);
    }
    Signal::of(held.get())
}

/// Combine the latest sample of two signals
///
/// Empty only when both inputs are empty this tick. Otherwise the side that
/// is empty contributes the value remembered in `last` from an earlier tick,
/// the pair is stored, and `f` is applied to it.
pub fn map2<A: Clone, B: Clone, R>(
    f: impl FnOnce(A, B) -> R,
    last: &Shared<(A, B)>,
    a: Signal<A>,
    b: Signal<B>,
) -> Signal<R> {
    if a.is_empty() && b.is_empty() {
        return Signal::empty();
    }
    let (held_a, held_b) = last.get();
    let pair = (a.0.unwrap_or(held_a), b.0.unwrap_or(held_b));
    last.set(pair.clone());
    Signal::of(f(pair.0, pair.1))
}

/// Rolling history of the last `N` values, newest first
pub fn record<T: Clone + Default, const N: usize>(
    history: &Shared<Seq<T, N>>,
    incoming: Signal<T>,
) -> Signal<Seq<T, N>> {
    fold_p(
        |value, mut past: Seq<T, N>| {
            past.push_off_front(value);
            past
        },
        history,
        incoming,
    )
}

/// Flip between `a` and `b` every time `incoming` fires
///
/// Emits `b` if the last emitted value (kept in `last`) was `a`, otherwise `a`.
pub fn toggle<T: Clone + PartialEq, U>(
    a: T,
    b: T,
    last: &Shared<T>,
    incoming: Signal<U>,
) -> Signal<T> {
    fold_p(
        move |_, prev| if prev == a { b } else { a },
        last,
        incoming,
    )
}

/// Number of samples seen so far
pub fn count<T>(seen: &Shared<u32>, incoming: Signal<T>) -> Signal<u32> {
    fold_p(|_, n: u32| n.saturating_add(1), seen, incoming)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks<T: Copy, const N: usize>(values: [Option<T>; N]) -> [Signal<T>; N] {
        values.map(Signal::from)
    }

    #[test]
    fn test_fold_p_sum() {
        let state = Shared::new(0);
        let inputs = ticks([Some(1), None, Some(2), Some(3)]);
        let outputs = inputs.map(|s| fold_p(|v, acc| v + acc, &state, s));
        assert_eq!(
            outputs,
            ticks([Some(1), None, Some(3), Some(6)])
        );
        assert_eq!(state.get(), 6);
    }

    #[test]
    fn test_record_evicts_oldest() {
        let history: Shared<Seq<char, 3>> = Shared::default();
        let outputs = ['a', 'b', 'c', 'd'].map(|c| record(&history, Signal::of(c)));
        let seq = outputs[3].into_option().unwrap();
        assert_eq!(seq.as_slice(), &['d', 'c', 'b']);
        assert_eq!(history.get(), seq);
    }

    #[test]
    fn test_record_ignores_empty_ticks() {
        let history: Shared<Seq<u8, 2>> = Shared::default();
        record(&history, Signal::of(1));
        assert!(record(&history, Signal::empty()).is_empty());
        assert_eq!(history.get().as_slice(), &[1]);
    }

    #[test]
    fn test_merge_is_left_biased() {
        assert_eq!(merge(Signal::of(1), Signal::of(2)), Signal::of(1));
        assert_eq!(merge(Signal::empty(), Signal::of(2)), Signal::of(2));
        assert_eq!(merge::<u8>(Signal::empty(), Signal::empty()), Signal::empty());
    }

    #[test]
    fn test_merge_many_takes_first_active() {
        let sigs = [Signal::empty(), Signal::of(5), Signal::of(6)];
        assert_eq!(merge_many(&sigs), Signal::of(5));
        let none: [Signal<u8>; 2] = [Signal::empty(), Signal::empty()];
        assert_eq!(merge_many(&none), Signal::empty());
        assert_eq!(merge_many::<u8>(&[]), Signal::empty());
    }

    #[test]
    fn test_join_tags_sides() {
        assert_eq!(
            join(Signal::of(1u8), Signal::of('x')),
            Signal::of(Either::Left(1))
        );
        assert_eq!(
            join(Signal::<u8>::empty(), Signal::of('x')),
            Signal::of(Either::Right('x'))
        );
        assert!(join(Signal::<u8>::empty(), Signal::<char>::empty()).is_empty());
    }

    #[test]
    fn test_meta_unmeta() {
        assert_eq!(meta(Signal::<u8>::empty()), Signal::of(None));
        assert_eq!(meta(Signal::of(3)), Signal::of(Some(3)));
        assert_eq!(unmeta(meta(Signal::of(3))), Signal::of(3));
        assert_eq!(unmeta(Signal::<Option<u8>>::of(None)), Signal::empty());
    }

    #[test]
    fn test_filter_and_to_unit() {
        assert_eq!(filter(|v: &u8| *v > 2, Signal::of(3)), Signal::of(3));
        assert!(filter(|v: &u8| *v > 2, Signal::of(1)).is_empty());
        assert_eq!(to_unit(Signal::of('q')), Signal::of(()));
    }

    #[test]
    fn test_zip_needs_both() {
        assert_eq!(zip(Signal::of(1), Signal::of('a')), Signal::of((1, 'a')));
        assert!(zip(Signal::of(1), Signal::<char>::empty()).is_empty());
    }

    #[test]
    fn test_sink_runs_only_when_active() {
        let mut seen = 0;
        sink(|v: u32| seen += v, Signal::of(4));
        sink(|v: u32| seen += v, Signal::empty());
        Signal::of(1).sink(|v: u32| seen += v);
        assert_eq!(seen, 5);
    }

    #[test]
    fn test_drop_repeats() {
        let last = Shared::new(None);
        let inputs = ticks([Some(1), Some(1), None, Some(2), Some(2), Some(1)]);
        let outputs = inputs.map(|s| drop_repeats(&last, s));
        assert_eq!(
            outputs,
            ticks([Some(1), None, None, Some(2), None, Some(1)])
        );
    }

    #[test]
    fn test_latch_holds_value() {
        let held = Shared::new(0);
        assert_eq!(latch(&held, Signal::empty()), Signal::of(0));
        assert_eq!(latch(&held, Signal::of(7)), Signal::of(7));
        assert_eq!(latch(&held, Signal::empty()), Signal::of(7));
    }

    #[test]
    fn test_map2_tie_break() {
        let last = Shared::new((10, 100));
        let add = |a: i32, b: i32| a + b;

        // Both empty: nothing, state untouched
        assert!(map2(add, &last, Signal::empty(), Signal::empty()).is_empty());
        assert_eq!(last.get(), (10, 100));

        // Only `a` fresh: combines with the remembered `b`
        assert_eq!(map2(add, &last, Signal::of(1), Signal::empty()), Signal::of(101));

        // Only `b` fresh: combines with the `a` stored on the previous tick
        assert_eq!(map2(add, &last, Signal::empty(), Signal::of(5)), Signal::of(6));

        // Both fresh
        assert_eq!(map2(add, &last, Signal::of(2), Signal::of(3)), Signal::of(5));
        assert_eq!(last.get(), (2, 3));
    }

    #[test]
    fn test_toggle_flips_on_each_event() {
        let last = Shared::new(false);
        let outputs = ticks([Some(()), None, Some(()), Some(())])
            .map(|s| toggle(false, true, &last, s));
        assert_eq!(
            outputs,
            ticks([Some(true), None, Some(false), Some(true)])
        );
    }

    #[test]
    fn test_toggle_from_unrelated_state() {
        // Neither value: the first event emits `a`
        let last = Shared::new(0u8);
        assert_eq!(toggle(1, 2, &last, Signal::of(())), Signal::of(1));
        assert_eq!(toggle(1, 2, &last, Signal::of(())), Signal::of(2));
    }

    #[test]
    fn test_count() {
        let seen = Shared::new(0);
        count(&seen, Signal::of('a'));
        count(&seen, Signal::<char>::empty());
        assert_eq!(count(&seen, Signal::of('b')), Signal::of(2));
    }

    #[test]
    fn test_method_forms() {
        let s = Signal::of(2u8).map(|v| v * 3).filter(|v| *v == 6);
        assert_eq!(s, Signal::of(6));
        assert_eq!(Signal::empty().merge(s), Signal::of(6));
        assert_eq!(s.as_ref().cloned(), s);
    }
}
