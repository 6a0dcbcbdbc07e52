// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! SML time: a {tag, seconds} pair, with two vendor-firmware tolerances.

use crate::buffer::Buffer;
use crate::constant::{
    HOLLEY_BARE_TIME_TYPE, SML_TIME_TAG_SEC_INDEX, SML_TIME_TAG_TIMESTAMP, SML_TYPE_INTEGER,
    SML_TYPE_LIST, SML_TYPE_UNSIGNED,
};
use crate::error::Error;
use crate::primitive::number;

/// A point in time as SML meters report it: either an uptime-style counter
/// or a Unix timestamp. Both carry raw seconds, never calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Time {
    SecIndex(u32),
    Timestamp(u32),
}

fn parse_unsigned_field(buf: &mut Buffer) -> Result<u64, Error> {
    let (ty, len) = buf.read_type_length()?;
    if ty != SML_TYPE_UNSIGNED {
        return Err(Error::TypeMismatch { expected: "unsigned", found: ty });
    }
    number::read_u64(buf, len)
}

fn parse_signed_field(buf: &mut Buffer) -> Result<i64, Error> {
    let (ty, len) = buf.read_type_length()?;
    if ty != SML_TYPE_INTEGER {
        return Err(Error::TypeMismatch { expected: "integer", found: ty });
    }
    number::read_i64(buf, len)
}

/// Parses an optional Time. `Ok(None)` covers both the ordinary
/// optional-skip case and the FROETEC tolerance, where the normal
/// `{tag, value}` 2-tuple's value slot is itself a 3-element list; that
/// list is read (so the cursor lands correctly) and then discarded.
pub fn parse(buf: &mut Buffer) -> Result<Option<Time>, Error> {
    if buf.probe_optional_skipped()? {
        return Ok(None);
    }

    // Holley DTZ541 bug: the {tag, data} tuple is elided and a bare 5-byte
    // unsigned integer stands in for a sec-index value directly.
    if buf.peek_byte()? == HOLLEY_BARE_TIME_TYPE {
        let (ty, len) = buf.read_type_length()?;
        debug_assert_eq!(ty, SML_TYPE_UNSIGNED);
        let value = number::read_u64(buf, len)?;
        log::debug!("holley DTZ541 bare time value encountered, treating as sec-index");
        return Ok(Some(Time::SecIndex(value as u32)));
    }

    let (ty, count) = buf.read_type_length()?;
    if ty != SML_TYPE_LIST {
        return Err(Error::TypeMismatch { expected: "time list", found: ty });
    }
    if count != 2 {
        return Err(Error::LengthMismatch { expected: 2, found: count });
    }

    let tag = parse_unsigned_field(buf)? as u8;

    if buf.peek_type()? == SML_TYPE_LIST {
        // FROETEC bug: the value slot is a (u32, i16, i16) 3-element list
        // instead of a single unsigned field. Parse it to keep the cursor
        // correct, then drop the values.
        let (_, elems) = buf.read_type_length()?;
        if elems != 3 {
            return Err(Error::LengthMismatch { expected: 3, found: elems });
        }
        let _ = parse_unsigned_field(buf)?;
        let _ = parse_signed_field(buf)?;
        let _ = parse_signed_field(buf)?;
        log::warn!("froetec 3-element time value dropped");
        return Ok(None);
    }

    let value = parse_unsigned_field(buf)? as u32;
    match tag {
        SML_TIME_TAG_SEC_INDEX => Ok(Some(Time::SecIndex(value))),
        SML_TIME_TAG_TIMESTAMP => Ok(Some(Time::Timestamp(value))),
        other => Err(Error::UnknownTag(other as u32)),
    }
}

pub fn write(buf: &mut Buffer, value: Option<Time>) {
    match value {
        None => buf.write_optional_skipped(),
        Some(time) => {
            buf.write_type_length(SML_TYPE_LIST, 2);
            let (tag, seconds) = match time {
                Time::SecIndex(s) => (SML_TIME_TAG_SEC_INDEX as u64, s),
                Time::Timestamp(s) => (SML_TIME_TAG_TIMESTAMP as u64, s),
            };
            buf.write_type_length(SML_TYPE_UNSIGNED, 1);
            number::write_unsigned(buf, 1, tag);
            buf.write_type_length(SML_TYPE_UNSIGNED, 4);
            number::write_unsigned(buf, 4, seconds as u64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sec_index() {
        let mut buf = Buffer::new(vec![0x72, 0x62, 0x01, 0x65, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(parse(&mut buf).unwrap(), Some(Time::SecIndex(256)));
    }

    #[test]
    fn write_then_parse_roundtrips() {
        let mut w = Buffer::with_capacity(16);
        write(&mut w, Some(Time::Timestamp(1_700_000_000)));
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(parse(&mut r).unwrap(), Some(Time::Timestamp(1_700_000_000)));
    }

    #[test]
    fn holley_bare_value_becomes_sec_index() {
        let mut buf = Buffer::new(vec![0x65, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(parse(&mut buf).unwrap(), Some(Time::SecIndex(256)));
    }

    #[test]
    fn froetec_three_element_value_is_dropped() {
        let mut buf = Buffer::new(vec![
            0x72, // outer list of 2: {tag, value}
            0x62, 0x01, // tag = sec-index
            0x73, // value slot: list of 3, not a plain unsigned field
            0x65, 0x00, 0x00, 0x00, 0x01, // u32 = 1
            0x52, 0x02, // i16 = 2
            0x52, 0x03, // i16 = 3
        ]);
        assert_eq!(parse(&mut buf).unwrap(), None);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn optional_skip_returns_none() {
        let mut buf = Buffer::new(vec![0x01]);
        assert_eq!(parse(&mut buf).unwrap(), None);
    }
}
