//! BLE characteristic adapters
//!
//! Characteristic values are fixed-length payloads. The bytes pass through a
//! `Seq<u8, N>` whose capacity is the payload length, so a full sequence is
//! exactly what the radio sends or received.

use cadence_core::{Seq, Signal};
use cadence_hal::{BleError, Characteristic};
use cadence_protocol::{decode_seq, encode_seq, Payload, PayloadError};

/// Errors from moving a payload through a characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The characteristic could not be accessed
    Ble(BleError),
    /// The bytes do not form a valid payload
    Payload(PayloadError),
}

impl From<BleError> for LinkError {
    fn from(e: BleError) -> Self {
        LinkError::Ble(e)
    }
}

impl From<PayloadError> for LinkError {
    fn from(e: PayloadError) -> Self {
        LinkError::Payload(e)
    }
}

/// Unit pulse on ticks where a central wrote the characteristic
///
/// Takes the write flag, so each write is seen on exactly one tick.
pub fn written<C: Characteristic>(characteristic: &mut C) -> Signal<()> {
    if characteristic.take_written() {
        Signal::of(())
    } else {
        Signal::empty()
    }
}

/// Read and decode the current value
///
/// `N` must equal `P::LEN`; a short value leaves the sequence partially
/// filled and fails to decode.
pub fn read_payload<P: Payload, C: Characteristic, const N: usize>(
    characteristic: &C,
) -> Result<P, LinkError> {
    let mut bytes = Seq::from_array([0u8; N]);
    let len = characteristic.read(bytes.as_mut_slice())?;
    bytes.truncate(len);
    Ok(decode_seq(&bytes)?)
}

/// Encode `payload` and store it as the characteristic value
pub fn write_payload<P: Payload, C: Characteristic, const N: usize>(
    characteristic: &mut C,
    payload: &P,
) -> Result<(), LinkError> {
    let bytes: Seq<u8, N> = encode_seq(payload)?;
    characteristic.write(bytes.as_slice())?;
    Ok(())
}

/// Decoded value on ticks where the characteristic was written
pub fn received<P: Payload, C: Characteristic, const N: usize>(
    characteristic: &mut C,
) -> Signal<Result<P, LinkError>> {
    written(characteristic).map(|()| read_payload::<P, C, N>(characteristic))
}

/// Write `payload` to the characteristic on ticks where it is active
///
/// Empty ticks leave the value untouched and succeed.
pub fn publish<P: Payload, C: Characteristic, const N: usize>(
    characteristic: &mut C,
    payload: Signal<P>,
) -> Result<(), LinkError> {
    match payload.into_option() {
        Some(value) => write_payload::<P, C, N>(characteristic, &value),
        None => Ok(()),
    }
}
