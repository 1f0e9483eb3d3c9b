//! Bounded sequences
//!
//! [`Seq<T, N>`] is a fixed-capacity array plus a running length. Nothing in
//! this module ever grows storage: operations that would exceed the capacity
//! saturate (leave the sequence unchanged) or, for [`Seq::push_off_front`],
//! drop the oldest element.
//!
//! Slots at or beyond `len()` hold stale values; only [`Seq::backing_array`]
//! shows them. Indexing past the length with `seq[i]` is a contract violation
//! and panics.
//!
//! A full `Seq<u8, N>` doubles as the wire image of a fixed-length BLE
//! characteristic payload, see [`Seq::as_array`].

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Add, Div, Index, IndexMut};

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Compile-time capacity checks between source and result sequences
struct CapacityCheck<const N: usize, const M: usize, const R: usize>;

impl<const N: usize, const M: usize, const R: usize> CapacityCheck<N, M, R> {
    const APPEND: () = assert!(R >= N + M, "append: result capacity is smaller than N + M");
    const FLATTEN: () = assert!(R >= N * M, "flatten: result capacity is smaller than N * M");
    const TAKE: () = assert!(M <= N, "take: prefix capacity is larger than the source");
}

/// Fixed-capacity sequence with saturating mutation
#[derive(Clone, Copy)]
pub struct Seq<T, const N: usize> {
    data: [T; N],
    length: usize,
}

impl<T: Default, const N: usize> Seq<T, N> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self {
            data: core::array::from_fn(|_| T::default()),
            length: 0,
        }
    }

    /// Create a sequence from the front of `items`, truncating to the capacity
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        let mut seq = Self::new();
        for item in items.iter().take(N) {
            seq.data[seq.length] = item.clone();
            seq.length += 1;
        }
        seq
    }

    /// Sequence holding `count` copies of `value` (saturating at the capacity)
    pub fn replicate(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut seq = Self::new();
        let count = count.min(N);
        for slot in seq.data.iter_mut().take(count) {
            *slot = value.clone();
        }
        seq.length = count;
        seq
    }

    /// Take ownership of a heapless vector's elements
    pub fn from_vec(vec: Vec<T, N>) -> Self {
        let mut seq = Self::new();
        for item in vec {
            seq.data[seq.length] = item;
            seq.length += 1;
        }
        seq
    }

    /// Remove and return the last element
    pub fn pop_back(&mut self) -> Option<T> {
        if self.length == 0 {
            return None;
        }
        self.length -= 1;
        Some(core::mem::take(&mut self.data[self.length]))
    }

    /// Remove the first element equal to `value`
    ///
    /// Later elements move down one slot and the vacated trailing slot is
    /// reset to the default value. Returns `false` (and leaves the sequence
    /// unchanged) if no element matches.
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.find_index(|item| item == value) {
            Some(index) => {
                self.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Remove and return the element at `index`, compacting the rest
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.length {
            return None;
        }
        self.data[index..self.length].rotate_left(1);
        self.length -= 1;
        Some(core::mem::take(&mut self.data[self.length]))
    }

    /// Shorten the sequence to `len` elements, resetting the dropped slots
    pub fn truncate(&mut self, len: usize) {
        while self.length > len {
            self.length -= 1;
            self.data[self.length] = T::default();
        }
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Keep the elements matching `pred`, in order
    pub fn filter(&self, mut pred: impl FnMut(&T) -> bool) -> Self
    where
        T: Clone,
    {
        let mut out = Self::new();
        for item in self.iter() {
            if pred(item) {
                out.data[out.length] = item.clone();
                out.length += 1;
            }
        }
        out
    }

    /// Concatenate `self` and `other`
    ///
    /// The result capacity `R` must be at least `N + M`; a smaller `R` fails
    /// to compile.
    pub fn append<const M: usize, const R: usize>(&self, other: &Seq<T, M>) -> Seq<T, R>
    where
        T: Clone,
    {
        #[allow(clippy::let_unit_value)]
        let () = CapacityCheck::<N, M, R>::APPEND;

        let mut out = Seq::new();
        for item in self.iter().chain(other.iter()) {
            out.data[out.length] = item.clone();
            out.length += 1;
        }
        out
    }

    /// Copy into a sequence of a different capacity, truncating if needed
    pub fn resize<const M: usize>(&self) -> Seq<T, M>
    where
        T: Clone,
    {
        Seq::from_slice(self.as_slice())
    }

    /// Leading elements that fit in capacity `M`
    ///
    /// `M` larger than `N` fails to compile; use [`Seq::resize`] to widen.
    pub fn take<const M: usize>(&self) -> Seq<T, M>
    where
        T: Clone,
    {
        #[allow(clippy::let_unit_value)]
        let () = CapacityCheck::<N, M, 0>::TAKE;

        Seq::from_slice(self.as_slice())
    }

    /// Pair up elements of `self` and `other` until either runs out
    pub fn zip<U: Clone + Default>(&self, other: &Seq<U, N>) -> Seq<(T, U), N>
    where
        T: Clone,
    {
        let mut out = Seq::new();
        for (a, b) in self.iter().zip(other.iter()) {
            out.data[out.length] = (a.clone(), b.clone());
            out.length += 1;
        }
        out
    }

    /// Copy the live elements into a heapless vector
    pub fn to_vec(&self) -> Vec<T, N>
    where
        T: Clone,
    {
        let mut vec = Vec::new();
        for item in self.iter() {
            // Cannot fail: both have capacity N
            let _ = vec.push(item.clone());
        }
        vec
    }
}

impl<T, const N: usize> Seq<T, N> {
    /// Create a full sequence from an array
    pub const fn from_array(data: [T; N]) -> Self {
        Self { data, length: N }
    }

    /// Number of live elements
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Maximum number of elements
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Check if there are no live elements
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check if the sequence is at capacity
    pub const fn is_full(&self) -> bool {
        self.length == N
    }

    /// Live elements as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.length]
    }

    /// Live elements as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..self.length]
    }

    /// Backing array, only when every slot is live
    ///
    /// This is the wire image used for fixed-length payloads; a partially
    /// filled sequence has stale slots and therefore no wire image.
    pub fn as_array(&self) -> Option<&[T; N]> {
        if self.is_full() {
            Some(&self.data)
        } else {
            None
        }
    }

    /// Raw backing array, stale slots included
    ///
    /// Slots past `len()` keep whatever was last stored there, which is
    /// `T::default()` for a fresh sequence or one shortened with
    /// [`Seq::truncate`].
    pub fn backing_array(&self) -> &[T; N] {
        &self.data
    }

    /// Consume a full sequence into its backing array
    pub fn into_array(self) -> Result<[T; N], Self> {
        if self.is_full() {
            Ok(self.data)
        } else {
            Err(self)
        }
    }

    /// Iterate over the live elements
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutably iterate over the live elements
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Borrow the element at `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Copy of the element at `index`, `None` past the length
    pub fn nth(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.get(index).cloned()
    }

    /// First element
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Last element
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Overwrite the element at `index`
    ///
    /// Leaves the sequence unchanged and returns `false` if `index` is past
    /// the length.
    pub fn set_nth(&mut self, index: usize, value: T) -> bool {
        match self.as_mut_slice().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Append `value` at the back
    ///
    /// A full sequence is left unchanged and `false` is returned.
    pub fn push_back(&mut self, value: T) -> bool {
        if self.length >= N {
            return false;
        }
        self.data[self.length] = value;
        self.length += 1;
        true
    }

    /// Insert `value` at the front, shifting the rest back one slot
    ///
    /// When the sequence is full the last (oldest) element falls off the
    /// back. Used to keep bounded histories, newest first.
    pub fn push_off_front(&mut self, value: T) {
        if N == 0 {
            return;
        }
        let end = if self.length < N { self.length + 1 } else { N };
        self.data[..end].rotate_right(1);
        self.data[0] = value;
        self.length = end;
    }

    /// Apply `f` to every element, preserving order and length
    pub fn map<U: Default>(&self, mut f: impl FnMut(&T) -> U) -> Seq<U, N> {
        let mut out = Seq::new();
        for (slot, item) in out.data.iter_mut().zip(self.as_slice()) {
            *slot = f(item);
        }
        out.length = self.length;
        out
    }

    /// Like [`Seq::map`], also passing the index of each element
    pub fn mapi<U: Default>(&self, mut f: impl FnMut(usize, &T) -> U) -> Seq<U, N> {
        let mut out = Seq::new();
        for (index, (slot, item)) in out.data.iter_mut().zip(self.as_slice()).enumerate() {
            *slot = f(index, item);
        }
        out.length = self.length;
        out
    }

    /// Reverse the live elements in place
    pub fn reverse(&mut self) {
        self.as_mut_slice().reverse();
    }

    /// Left fold: `f(...f(f(init, x0), x1)..., xn)`
    pub fn foldl<S>(&self, init: S, f: impl FnMut(S, &T) -> S) -> S {
        self.iter().fold(init, f)
    }

    /// Right fold, visiting the last element first
    ///
    /// Returns `init` unchanged for an empty sequence.
    pub fn foldr<S>(&self, init: S, f: impl FnMut(S, &T) -> S) -> S {
        self.iter().rev().fold(init, f)
    }

    /// Fold using the first element as the initial state
    pub fn reduce(&self, mut f: impl FnMut(T, &T) -> T) -> Option<T>
    where
        T: Clone,
    {
        let (first, rest) = self.as_slice().split_first()?;
        Some(rest.iter().fold(first.clone(), |acc, item| f(acc, item)))
    }

    /// Run `f` on every element
    pub fn for_each(&self, f: impl FnMut(&T)) {
        self.iter().for_each(f);
    }

    /// Check if every element matches `pred`, stopping at the first miss
    pub fn all(&self, pred: impl FnMut(&T) -> bool) -> bool {
        self.iter().all(pred)
    }

    /// Check if any element matches `pred`, stopping at the first hit
    pub fn any(&self, pred: impl FnMut(&T) -> bool) -> bool {
        self.iter().any(pred)
    }

    /// Check if some element equals `value`
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    /// First element matching `pred`
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.iter().find(|item| pred(item))
    }

    /// Index of the first element matching `pred`
    pub fn find_index(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.iter().position(pred)
    }

    /// Sum of the elements, `T::default()` when empty
    pub fn sum(&self) -> T
    where
        T: Copy + Add<Output = T> + Default,
    {
        self.foldl(T::default(), |acc, item| acc + *item)
    }

    /// Arithmetic mean of the elements
    ///
    /// `None` for an empty sequence. Integer element types round toward zero.
    pub fn average(&self) -> Option<T>
    where
        T: Copy + Add<Output = T> + Div<Output = T> + Default + From<u16>,
    {
        if self.is_empty() {
            return None;
        }
        let count = u16::try_from(self.length).ok()?;
        Some(self.sum() / T::from(count))
    }

    /// Largest element; the first one wins ties
    pub fn max(&self) -> Option<&T>
    where
        T: PartialOrd,
    {
        self.iter()
            .fold(None, |best: Option<&T>, item| match best {
                Some(b) if !(item > b) => Some(b),
                _ => Some(item),
            })
    }

    /// Smallest element; the first one wins ties
    pub fn min(&self) -> Option<&T>
    where
        T: PartialOrd,
    {
        self.iter()
            .fold(None, |best: Option<&T>, item| match best {
                Some(b) if !(item < b) => Some(b),
                _ => Some(item),
            })
    }

    /// Sort in place by `key`, ascending
    ///
    /// Quicksort with a Lomuto partition. Not stable: elements with equal
    /// keys may be reordered.
    pub fn sort_by_key<K: PartialOrd>(&mut self, key: impl Fn(&T) -> K) {
        quicksort(self.as_mut_slice(), &|a: &T, b: &T| key(a) < key(b));
    }

    /// Sort in place, ascending
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        quicksort(self.as_mut_slice(), &|a: &T, b: &T| a < b);
    }
}

impl<T: Default, const N: usize, const M: usize> Seq<Seq<T, M>, N> {
    /// Concatenate the inner sequences in order
    ///
    /// The result capacity `R` must be at least `N * M`.
    pub fn flatten<const R: usize>(&self) -> Seq<T, R>
    where
        T: Clone,
    {
        #[allow(clippy::let_unit_value)]
        let () = CapacityCheck::<N, M, R>::FLATTEN;

        let mut out = Seq::new();
        for inner in self.iter() {
            for item in inner.iter() {
                out.data[out.length] = item.clone();
                out.length += 1;
            }
        }
        out
    }
}

impl<A: Clone + Default, B: Clone + Default, const N: usize> Seq<(A, B), N> {
    /// Split a sequence of pairs into two sequences
    pub fn unzip(&self) -> (Seq<A, N>, Seq<B, N>) {
        (self.map(|(a, _)| a.clone()), self.map(|(_, b)| b.clone()))
    }
}

/// Lomuto quicksort; recurses into the smaller side to bound stack depth
fn quicksort<T>(mut items: &mut [T], less: &impl Fn(&T, &T) -> bool) {
    while items.len() > 1 {
        let pivot = partition(items, less);
        let (left, right) = core::mem::take(&mut items).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            quicksort(left, less);
            items = right;
        } else {
            quicksort(right, less);
            items = left;
        }
    }
}

fn partition<T>(items: &mut [T], less: &impl Fn(&T, &T) -> bool) -> usize {
    let hi = items.len() - 1;
    let mut store = 0;
    for j in 0..hi {
        // items[j] <= pivot
        if !less(&items[hi], &items[j]) {
            items.swap(store, j);
            store += 1;
        }
    }
    items.swap(store, hi);
    store
}

impl<T: Default, const N: usize> Default for Seq<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for Seq<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for Seq<T, N> {}

impl<T: PartialOrd, const N: usize> PartialOrd for Seq<T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Hash, const N: usize> Hash for Seq<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Seq<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(feature = "defmt")]
impl<T: defmt::Format, const N: usize> defmt::Format for Seq<T, N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.as_slice());
    }
}

impl<T, const N: usize> Index<usize> for Seq<T, N> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Seq<T, N> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Seq<T, N> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects up to `N` items; the rest of the iterator is ignored
impl<T: Default, const N: usize> FromIterator<T> for Seq<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

/// Pushes items until the sequence is full
impl<T, const N: usize> Extend<T> for Seq<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if !self.push_back(item) {
                break;
            }
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Seq<T, N> {
    fn from(data: [T; N]) -> Self {
        Self::from_array(data)
    }
}

#[cfg(feature = "serde")]
impl<T: Serialize, const N: usize> Serialize for Seq<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Deserialize<'de> + Default, const N: usize> Deserialize<'de> for Seq<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T, N>::deserialize(deserializer).map(Self::from_vec)
    }
}
