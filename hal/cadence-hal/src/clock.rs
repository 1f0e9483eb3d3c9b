//! Monotonic clock abstraction

/// Millisecond clock sampled once per tick
///
/// Must be monotonic. The counter wraps after about 49 days; consumers
/// compare times with wrapping subtraction.
pub trait Clock {
    /// Milliseconds since boot
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
