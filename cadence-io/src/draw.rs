//! Display sink

use cadence_core::Signal;
use cadence_hal::{DisplayBackend, DisplayError};

/// Draw `frame` with `render` on ticks where it is active, then flush
///
/// Nothing touches the panel on empty ticks, so wiring a change detector in
/// front of this sink keeps the panel idle while the picture is unchanged.
pub fn present<D, T>(
    display: &mut D,
    frame: Signal<T>,
    render: impl FnOnce(&mut D, T) -> Result<(), DisplayError>,
) -> Result<(), DisplayError>
where
    D: DisplayBackend,
{
    let Some(value) = frame.into_option() else {
        return Ok(());
    };
    if !display.is_ready() {
        return Err(DisplayError::NotInitialized);
    }
    render(display, value)?;
    display.flush()
}
