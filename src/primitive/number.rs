// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Fixed-width integer codecs with SML's width-widening and sign-extension.

use crate::buffer::Buffer;
use crate::constant::{SML_TYPE_INTEGER, SML_TYPE_UNSIGNED};
use crate::error::Error;
use byteorder::{BigEndian, ByteOrder};

/// Smallest power of two >= `payload_len`, the wire width a meter is allowed
/// to widen a shorter encoding up to.
pub fn widened_size(payload_len: usize) -> usize {
    let mut max_size = 1usize;
    while max_size < payload_len {
        max_size <<= 1;
    }
    max_size
}

fn read_raw(buf: &mut Buffer, payload_len: usize) -> Result<Vec<u8>, Error> {
    Ok(buf.read_bytes(payload_len)?.to_vec())
}

/// Zero-extend `raw` (big-endian, `raw.len() <= width`) up to `width` bytes.
fn zero_extend(raw: &[u8], width: usize) -> Vec<u8> {
    let mut out = vec![0u8; width - raw.len()];
    out.extend_from_slice(raw);
    out
}

/// Sign-extend `raw` (big-endian, `raw.len() <= width`) up to `width` bytes
/// using the sign bit of its most significant byte.
fn sign_extend(raw: &[u8], width: usize) -> Vec<u8> {
    let fill = if raw.first().map(|b| b & 0x80 != 0).unwrap_or(false) { 0xFF } else { 0x00 };
    let mut out = vec![fill; width - raw.len()];
    out.extend_from_slice(raw);
    out
}

pub fn read_u64(buf: &mut Buffer, payload_len: usize) -> Result<u64, Error> {
    let raw = read_raw(buf, payload_len)?;
    let widened = zero_extend(&raw, 8);
    Ok(BigEndian::read_u64(&widened))
}

pub fn read_i64(buf: &mut Buffer, payload_len: usize) -> Result<i64, Error> {
    let raw = read_raw(buf, payload_len)?;
    let widened = sign_extend(&raw, 8);
    Ok(BigEndian::read_i64(&widened))
}

pub fn write_unsigned(buf: &mut Buffer, width: usize, value: u64) {
    let mut bytes = [0u8; 8];
    BigEndian::write_u64(&mut bytes, value);
    buf.write_bytes(&bytes[8 - width..]);
}

pub fn write_signed(buf: &mut Buffer, width: usize, value: i64) {
    let mut bytes = [0u8; 8];
    BigEndian::write_i64(&mut bytes, value);
    buf.write_bytes(&bytes[8 - width..]);
}

/// Parses a fixed-width optional unsigned field (`max_size` caps the
/// declared length; the reference rejects longer encodings rather than
/// widening past the accessor's own width).
pub fn parse_opt_unsigned(buf: &mut Buffer, max_size: usize) -> Result<Option<u64>, Error> {
    if buf.probe_optional_skipped()? {
        return Ok(None);
    }
    let (ty, len) = buf.read_type_length()?;
    if ty != SML_TYPE_UNSIGNED {
        return Err(Error::TypeMismatch { expected: "unsigned", found: ty });
    }
    if len > max_size {
        return Err(Error::LengthMismatch { expected: max_size, found: len });
    }
    Ok(Some(read_u64(buf, len)?))
}

/// Parses a fixed-width optional signed field; see [`parse_opt_unsigned`].
pub fn parse_opt_signed(buf: &mut Buffer, max_size: usize) -> Result<Option<i64>, Error> {
    if buf.probe_optional_skipped()? {
        return Ok(None);
    }
    let (ty, len) = buf.read_type_length()?;
    if ty != SML_TYPE_INTEGER {
        return Err(Error::TypeMismatch { expected: "integer", found: ty });
    }
    if len > max_size {
        return Err(Error::LengthMismatch { expected: max_size, found: len });
    }
    Ok(Some(read_i64(buf, len)?))
}

pub fn write_opt_unsigned(buf: &mut Buffer, width: usize, value: Option<u64>) {
    match value {
        None => buf.write_optional_skipped(),
        Some(v) => {
            buf.write_type_length(SML_TYPE_UNSIGNED, width);
            write_unsigned(buf, width, v);
        }
    }
}

pub fn write_opt_signed(buf: &mut Buffer, width: usize, value: Option<i64>) {
    match value {
        None => buf.write_optional_skipped(),
        Some(v) => {
            buf.write_type_length(SML_TYPE_INTEGER, width);
            write_signed(buf, width, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widens_to_next_power_of_two() {
        assert_eq!(widened_size(1), 1);
        assert_eq!(widened_size(2), 2);
        assert_eq!(widened_size(3), 4);
        assert_eq!(widened_size(4), 4);
        assert_eq!(widened_size(5), 8);
    }

    #[test]
    fn sign_extends_negative_three_byte_value() {
        let mut buf = Buffer::new(vec![0xFF, 0xFE, 0xFD]);
        let v = read_i64(&mut buf, 3).unwrap();
        assert_eq!(v, -66_051);
    }

    #[test]
    fn zero_extends_unsigned_three_byte_value() {
        let mut buf = Buffer::new(vec![0xFF, 0xFE, 0xFD]);
        let v = read_u64(&mut buf, 3).unwrap();
        assert_eq!(v, 16_776_957);
    }

    #[test]
    fn unsigned_widened_u16_example() {
        let mut buf = Buffer::new(vec![0x01, 0x2C]);
        let v = read_u64(&mut buf, 2).unwrap();
        assert_eq!(v, 300);
    }
}
