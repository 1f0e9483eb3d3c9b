//! Time synchronization payloads
//!
//! Written by the companion app right after it connects. The watch keeps the
//! last value of each and derives the displayed time from them.

use crate::payload::{Payload, PayloadError};

/// Encoded length of [`DayDateTime`]
pub const DAY_DATE_TIME_LEN: usize = 9;

/// Encoded length of [`DayOfWeek`]
pub const DAY_OF_WEEK_LEN: usize = 1;

/// Calendar date and wall-clock time
///
/// Field order and widths follow the wire layout exactly. `month` is
/// zero-based (0 = January), as sent by the phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DayDateTime {
    /// Month, 0-11
    pub month: u8,
    /// Day of the month, 1-31
    pub day: u8,
    /// Full year, e.g. 2024
    pub year: i32,
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// Second, 0-59
    pub second: u8,
}

impl DayDateTime {
    /// Check that every field is inside its range
    pub fn is_valid(&self) -> bool {
        self.month < 12
            && (1..=31).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Seconds since midnight
    pub fn seconds_of_day(&self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }
}

impl Payload for DayDateTime {
    const LEN: usize = DAY_DATE_TIME_LEN;

    fn encode(&self, buffer: &mut [u8]) -> Result<usize, PayloadError> {
        let out = buffer
            .get_mut(..DAY_DATE_TIME_LEN)
            .ok_or(PayloadError::BufferTooSmall)?;

        out[0] = self.month;
        out[1] = self.day;
        out[2..6].copy_from_slice(&self.year.to_be_bytes());
        out[6] = self.hour;
        out[7] = self.minute;
        out[8] = self.second;

        Ok(DAY_DATE_TIME_LEN)
    }

    fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let bytes: &[u8; DAY_DATE_TIME_LEN] =
            bytes.try_into().map_err(|_| PayloadError::InvalidLength)?;

        let value = DayDateTime {
            month: bytes[0],
            day: bytes[1],
            year: i32::from_be_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]),
            hour: bytes[6],
            minute: bytes[7],
            second: bytes[8],
        };

        if !value.is_valid() {
            return Err(PayloadError::OutOfRange);
        }
        Ok(value)
    }
}

/// Day of the week, numbered from Sunday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DayOfWeek {
    #[default]
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    /// Create from the wire value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DayOfWeek::Sunday),
            1 => Some(DayOfWeek::Monday),
            2 => Some(DayOfWeek::Tuesday),
            3 => Some(DayOfWeek::Wednesday),
            4 => Some(DayOfWeek::Thursday),
            5 => Some(DayOfWeek::Friday),
            6 => Some(DayOfWeek::Saturday),
            _ => None,
        }
    }

    /// Three-letter label for the watch face
    pub fn short_name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "SUN",
            DayOfWeek::Monday => "MON",
            DayOfWeek::Tuesday => "TUE",
            DayOfWeek::Wednesday => "WED",
            DayOfWeek::Thursday => "THU",
            DayOfWeek::Friday => "FRI",
            DayOfWeek::Saturday => "SAT",
        }
    }
}

impl Payload for DayOfWeek {
    const LEN: usize = DAY_OF_WEEK_LEN;

    fn encode(&self, buffer: &mut [u8]) -> Result<usize, PayloadError> {
        let out = buffer.first_mut().ok_or(PayloadError::BufferTooSmall)?;
        *out = *self as u8;
        Ok(DAY_OF_WEEK_LEN)
    }

    fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        match bytes {
            [value] => DayOfWeek::from_u8(*value).ok_or(PayloadError::OutOfRange),
            _ => Err(PayloadError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{decode_seq, encode_seq};
    use cadence_core::Seq;

    fn sample() -> DayDateTime {
        DayDateTime {
            month: 2,
            day: 14,
            year: 2024,
            hour: 13,
            minute: 5,
            second: 59,
        }
    }

    #[test]
    fn test_day_date_time_wire_layout() {
        let mut buffer = [0u8; 12];
        let len = sample().encode(&mut buffer).unwrap();

        assert_eq!(len, 9);
        assert_eq!(buffer[0], 2); // month
        assert_eq!(buffer[1], 14); // day
        assert_eq!(&buffer[2..6], &[0x00, 0x00, 0x07, 0xE8]); // 2024 big-endian
        assert_eq!(&buffer[6..9], &[13, 5, 59]);
    }

    #[test]
    fn test_day_date_time_through_seq() {
        let seq: Seq<u8, DAY_DATE_TIME_LEN> = encode_seq(&sample()).unwrap();
        assert!(seq.is_full());
        assert_eq!(decode_seq::<DayDateTime, DAY_DATE_TIME_LEN>(&seq), Ok(sample()));
    }

    #[test]
    fn test_day_date_time_rejects_bad_length() {
        assert_eq!(
            DayDateTime::decode(&[0u8; 8]),
            Err(PayloadError::InvalidLength)
        );
        let mut small = [0u8; 4];
        assert_eq!(sample().encode(&mut small), Err(PayloadError::BufferTooSmall));
    }

    #[test]
    fn test_day_date_time_rejects_out_of_range() {
        let mut bytes = [0u8; 9];
        sample().encode(&mut bytes).unwrap();
        bytes[6] = 24; // hour
        assert_eq!(DayDateTime::decode(&bytes), Err(PayloadError::OutOfRange));
    }

    #[test]
    fn test_seconds_of_day() {
        assert_eq!(sample().seconds_of_day(), 13 * 3600 + 5 * 60 + 59);
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(DayOfWeek::decode(&[3]), Ok(DayOfWeek::Wednesday));
        assert_eq!(DayOfWeek::decode(&[7]), Err(PayloadError::OutOfRange));
        assert_eq!(DayOfWeek::decode(&[]), Err(PayloadError::InvalidLength));

        let mut buffer = [0u8; 1];
        DayOfWeek::Saturday.encode(&mut buffer).unwrap();
        assert_eq!(buffer, [6]);
        assert_eq!(DayOfWeek::Friday.short_name(), "FRI");
    }
}
