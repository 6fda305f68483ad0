//! Unsigned LEB128 framing for counts and lengths.
//!
//! Seven payload bits per byte, low group first; the high bit marks a
//! continuation. Values are 32-bit, so an encoding is at most five bytes and
//! the fifth byte may only carry the top four bits. A final byte of zero
//! after at least one other byte is a redundant (overlong) encoding.

use std::io::{Read, Write};

use crate::error::{DataStoreError, DataStoreResult};

pub const MAX_VLI_BYTES: usize = 5;

pub fn read_vli<R: Read + ?Sized>(input: &mut R) -> DataStoreResult<u32> {
    let mut value: u32 = 0;
    for i in 0..MAX_VLI_BYTES {
        let mut byte = [0_u8; 1];
        input.read_exact(&mut byte)?;
        let b = byte[0];

        let payload = b & 0x7f;
        if i == MAX_VLI_BYTES - 1 && payload > 0x0f {
            return Err(DataStoreError::VliOverflow);
        }
        value |= u32::from(payload) << (7 * i);
        if b & 0x80 == 0 {
            if i > 0 && payload == 0 {
                return Err(DataStoreError::VliOverlong);
            }
            return Ok(value);
        }
    }
    Err(DataStoreError::VliOverflow)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "each group is masked to seven bits"
)]
pub fn write_vli<W: Write + ?Sized>(output: &mut W, mut value: u32) -> DataStoreResult<()> {
    let mut buf = [0_u8; MAX_VLI_BYTES];
    let mut len = 0;
    loop {
        let mut b = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            b |= 0x80;
        }
        buf[len] = b;
        len += 1;
        if value == 0 {
            break;
        }
    }
    output.write_all(&buf[..len])?;
    Ok(())
}

/// Length as a VLI, rejecting lengths beyond `u32`.
pub(crate) fn write_len<W: Write + ?Sized>(output: &mut W, len: usize) -> DataStoreResult<()> {
    let len32 = u32::try_from(len).map_err(|_| DataStoreError::LengthTooLarge(len))?;
    write_vli(output, len32)
}

#[cfg(test)]
mod tests;
