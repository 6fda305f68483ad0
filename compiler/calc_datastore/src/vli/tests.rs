#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn encode(value: u32) -> Vec<u8> {
    let mut out = Vec::new();
    write_vli(&mut out, value).unwrap();
    out
}

fn decode(bytes: &[u8]) -> DataStoreResult<u32> {
    let mut input = bytes;
    read_vli(&mut input)
}

#[test]
fn known_encodings() {
    assert_eq!(encode(0), vec![0x00]);
    assert_eq!(encode(127), vec![0x7f]);
    assert_eq!(encode(128), vec![0x80, 0x01]);
    assert_eq!(encode(300), vec![0xac, 0x02]);
    assert_eq!(encode(u32::MAX), vec![0xff, 0xff, 0xff, 0xff, 0x0f]);
}

#[test]
fn reads_only_its_own_bytes() {
    let mut input: &[u8] = &[0xac, 0x02, 0x99];
    assert_eq!(read_vli(&mut input).unwrap(), 300);
    assert_eq!(input, &[0x99]);
}

#[test]
fn rejects_truncated_input() {
    assert!(matches!(decode(&[]), Err(DataStoreError::Truncated)));
    assert!(matches!(decode(&[0x80, 0x80]), Err(DataStoreError::Truncated)));
}

#[test]
fn rejects_overlong_encoding() {
    assert!(matches!(decode(&[0x80, 0x00]), Err(DataStoreError::VliOverlong)));
    assert!(matches!(decode(&[0x81, 0x80, 0x00]), Err(DataStoreError::VliOverlong)));
}

#[test]
fn rejects_values_past_32_bits() {
    assert!(matches!(
        decode(&[0xff, 0xff, 0xff, 0xff, 0x1f]),
        Err(DataStoreError::VliOverflow)
    ));
    assert!(matches!(
        decode(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]),
        Err(DataStoreError::VliOverflow)
    ));
}

proptest! {
    #[test]
    fn any_value_survives_encoding(value in any::<u32>()) {
        let bytes = encode(value);
        prop_assert!(bytes.len() <= MAX_VLI_BYTES);
        prop_assert_eq!(decode(&bytes).unwrap(), value);
    }
}
