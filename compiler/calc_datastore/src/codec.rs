//! Per-type stream codecs.
//!
//! Codecs are values rather than impls on the encoded type so a store can
//! pick an encoding per key and value position.

use std::io::{Read, Write};

use crate::error::{DataStoreError, DataStoreResult};
use crate::vli::{read_vli, write_len, write_vli};

pub trait StreamReadable<T> {
    fn read_from_stream(&self, input: &mut dyn Read) -> DataStoreResult<T>;
}

pub trait StreamWritable<T> {
    fn write_to_stream(&self, value: &T, output: &mut dyn Write) -> DataStoreResult<()>;
}

/// VLI byte length followed by UTF-8.
#[derive(Copy, Clone, Debug, Default)]
pub struct StringCodec;

impl StreamReadable<String> for StringCodec {
    fn read_from_stream(&self, input: &mut dyn Read) -> DataStoreResult<String> {
        let len = u64::from(read_vli(input)?);
        let mut bytes = Vec::new();
        // Bounded by what the input actually holds, not by the declared length.
        let read = input.take(len).read_to_end(&mut bytes)?;
        if u64::try_from(read).ok() != Some(len) {
            return Err(DataStoreError::Truncated);
        }
        String::from_utf8(bytes).map_err(|_| DataStoreError::InvalidUtf8)
    }
}

impl StreamWritable<String> for StringCodec {
    fn write_to_stream(&self, value: &String, output: &mut dyn Write) -> DataStoreResult<()> {
        write_len(output, value.len())?;
        output.write_all(value.as_bytes())?;
        Ok(())
    }
}

/// Four bytes, big-endian.
#[derive(Copy, Clone, Debug, Default)]
pub struct I32Codec;

impl StreamReadable<i32> for I32Codec {
    fn read_from_stream(&self, input: &mut dyn Read) -> DataStoreResult<i32> {
        let mut bytes = [0_u8; 4];
        input.read_exact(&mut bytes)?;
        Ok(i32::from_be_bytes(bytes))
    }
}

impl StreamWritable<i32> for I32Codec {
    fn write_to_stream(&self, value: &i32, output: &mut dyn Write) -> DataStoreResult<()> {
        output.write_all(&value.to_be_bytes())?;
        Ok(())
    }
}

/// Unsigned id as a VLI. Tag tables use it for their ids.
#[derive(Copy, Clone, Debug, Default)]
pub struct VliCodec;

impl StreamReadable<u32> for VliCodec {
    fn read_from_stream(&self, input: &mut dyn Read) -> DataStoreResult<u32> {
        read_vli(input)
    }
}

impl StreamWritable<u32> for VliCodec {
    fn write_to_stream(&self, value: &u32, output: &mut dyn Write) -> DataStoreResult<()> {
        write_vli(output, *value)
    }
}

/// One byte: `0` or `1`.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoolCodec;

impl StreamReadable<bool> for BoolCodec {
    fn read_from_stream(&self, input: &mut dyn Read) -> DataStoreResult<bool> {
        let mut byte = [0_u8; 1];
        input.read_exact(&mut byte)?;
        match byte[0] {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DataStoreError::InvalidBool(other)),
        }
    }
}

impl StreamWritable<bool> for BoolCodec {
    fn write_to_stream(&self, value: &bool, output: &mut dyn Write) -> DataStoreResult<()> {
        output.write_all(&[u8::from(*value)])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
