#![no_main]

use abp_wire::{PrimitiveKind, Value, WireError};
use libfuzzer_sys::fuzz_target;

// Fuzz target: Value::decode over every kind.
//
// Catches bugs in:
// - ShortBuffer bounds (len < width must fail, len >= width must succeed)
// - Trailing bytes leaking into the decoded value
// - Kind/value tag mismatches
fuzz_target!(|data: &[u8]| {
    for kind in PrimitiveKind::ALL {
        match Value::decode(kind, data) {
            Ok(value) => {
                assert!(data.len() >= kind.width());
                assert_eq!(value.kind(), kind);
                let again = Value::decode(kind, &data[..kind.width()]).unwrap();
                assert_eq!(format!("{value:?}"), format!("{again:?}"));
            }
            Err(WireError::ShortBuffer { expected, found }) => {
                assert_eq!(expected, kind.width());
                assert_eq!(found, data.len());
                assert!(found < expected);
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
});
