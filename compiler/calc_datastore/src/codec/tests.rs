#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;

use super::*;

fn write<T, C: StreamWritable<T>>(codec: &C, value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    codec.write_to_stream(value, &mut out).unwrap();
    out
}

fn read<T, C: StreamReadable<T>>(codec: &C, bytes: &[u8]) -> DataStoreResult<T> {
    let mut input = bytes;
    codec.read_from_stream(&mut input)
}

#[test]
fn string_layout() {
    assert_eq!(write(&StringCodec, &"hé".to_string()), vec![3, b'h', 0xc3, 0xa9]);
    assert_eq!(read(&StringCodec, &[2, b'o', b'k']).unwrap(), "ok");
    assert_eq!(read(&StringCodec, &[0]).unwrap(), "");
}

#[test]
fn string_errors() {
    assert!(matches!(
        read(&StringCodec, &[5, b'a']),
        Err(DataStoreError::Truncated)
    ));
    assert!(matches!(
        read(&StringCodec, &[1, 0xff]),
        Err(DataStoreError::InvalidUtf8)
    ));
    // A huge declared length must not allocate up front.
    assert!(matches!(
        read(&StringCodec, &[0xff, 0xff, 0xff, 0xff, 0x0f]),
        Err(DataStoreError::Truncated)
    ));
}

#[test]
fn i32_is_big_endian() {
    assert_eq!(write(&I32Codec, &0x0102_0304), vec![1, 2, 3, 4]);
    assert_eq!(read(&I32Codec, &[0xff, 0xff, 0xff, 0xfe]).unwrap(), -2);
    assert!(matches!(read(&I32Codec, &[1, 2]), Err(DataStoreError::Truncated)));
}

#[test]
fn bool_is_one_strict_byte() {
    assert_eq!(write(&BoolCodec, &true), vec![1]);
    assert!(!read(&BoolCodec, &[0]).unwrap());
    assert!(matches!(read(&BoolCodec, &[2]), Err(DataStoreError::InvalidBool(2))));
}

#[test]
fn vli_codec_for_ids() {
    assert_eq!(write(&VliCodec, &300), vec![0xac, 0x02]);
    assert_eq!(read(&VliCodec, &[0x05]).unwrap(), 5);
}
