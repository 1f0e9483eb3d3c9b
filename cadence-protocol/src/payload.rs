//! Fixed-length payload encoding
//!
//! A payload is a record whose fields are packed back to back in declaration
//! order. The byte image lives in a `Seq<u8, N>` whose capacity equals the
//! payload length, so the sequence's backing array is what goes over the air.

use cadence_core::Seq;
use heapless::Vec;

/// Largest payload this firmware marshals (default ATT MTU minus header)
pub const MAX_PAYLOAD_LEN: usize = 20;

/// Errors that can occur while encoding or decoding payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Byte count does not match the payload length
    InvalidLength,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// A field holds a value outside its declared range
    OutOfRange,
}

/// Record with a fixed wire layout
pub trait Payload: Sized {
    /// Exact encoded length in bytes
    const LEN: usize;

    /// Write the wire image into the front of `buffer`
    ///
    /// Returns the number of bytes written, always `LEN`.
    fn encode(&self, buffer: &mut [u8]) -> Result<usize, PayloadError>;

    /// Parse a wire image of exactly `LEN` bytes
    fn decode(bytes: &[u8]) -> Result<Self, PayloadError>;

    /// Encode into a heapless Vec
    fn encode_to_vec(&self) -> Result<Vec<u8, MAX_PAYLOAD_LEN>, PayloadError> {
        let mut buffer = [0u8; MAX_PAYLOAD_LEN];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| PayloadError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Encode `payload` into a full sequence of capacity `N`
///
/// `N` must equal `P::LEN`.
pub fn encode_seq<P: Payload, const N: usize>(payload: &P) -> Result<Seq<u8, N>, PayloadError> {
    if N != P::LEN {
        return Err(PayloadError::InvalidLength);
    }
    let mut seq = Seq::from_array([0u8; N]);
    payload.encode(seq.as_mut_slice())?;
    Ok(seq)
}

/// Decode a payload from the live bytes of `seq`
pub fn decode_seq<P: Payload, const N: usize>(seq: &Seq<u8, N>) -> Result<P, PayloadError> {
    P::decode(seq.as_slice())
}
