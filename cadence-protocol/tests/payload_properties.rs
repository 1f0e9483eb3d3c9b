//! Property tests for the time sync payloads

use cadence_core::Seq;
use cadence_protocol::{
    decode_seq, encode_seq, DayDateTime, DayOfWeek, Payload, PayloadError, DAY_DATE_TIME_LEN,
};
use proptest::prelude::*;

fn valid_date_time() -> impl Strategy<Value = DayDateTime> {
    (0u8..12, 1u8..=31, any::<i32>(), 0u8..24, 0u8..60, 0u8..60).prop_map(
        |(month, day, year, hour, minute, second)| DayDateTime {
            month,
            day,
            year,
            hour,
            minute,
            second,
        },
    )
}

proptest! {
    #[test]
    fn valid_date_time_survives_the_wire(value in valid_date_time()) {
        let seq: Seq<u8, DAY_DATE_TIME_LEN> = encode_seq(&value).unwrap();
        prop_assert_eq!(decode_seq::<DayDateTime, DAY_DATE_TIME_LEN>(&seq), Ok(value));
    }

    #[test]
    fn year_is_big_endian(value in valid_date_time()) {
        let mut bytes = [0u8; DAY_DATE_TIME_LEN];
        value.encode(&mut bytes).unwrap();
        prop_assert_eq!(&bytes[2..6], &value.year.to_be_bytes()[..]);
    }

    #[test]
    fn decode_never_accepts_out_of_range(bytes in prop::array::uniform9(any::<u8>())) {
        match DayDateTime::decode(&bytes) {
            Ok(value) => prop_assert!(value.is_valid()),
            Err(e) => prop_assert_eq!(e, PayloadError::OutOfRange),
        }
    }

    #[test]
    fn day_of_week_accepts_exactly_seven_values(byte in any::<u8>()) {
        prop_assert_eq!(DayOfWeek::decode(&[byte]).is_ok(), byte < 7);
    }

    #[test]
    fn wrong_length_is_rejected(len in 0usize..20) {
        prop_assume!(len != DAY_DATE_TIME_LEN);
        let bytes = [1u8; 20];
        prop_assert_eq!(
            DayDateTime::decode(&bytes[..len]),
            Err(PayloadError::InvalidLength)
        );
    }
}
