// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! `Status`: the meter/device status word carried by a list entry, an
//! unsigned integer of width 1, 2, 4, or 8 bytes.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_UNSIGNED;
use crate::error::Error;
use crate::primitive::number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl Status {
    pub fn parse(buf: &mut Buffer) -> Result<Option<Status>, Error> {
        if buf.probe_optional_skipped()? {
            return Ok(None);
        }
        let (ty, len) = buf.read_type_length()?;
        if ty != SML_TYPE_UNSIGNED {
            return Err(Error::TypeMismatch { expected: "status", found: ty });
        }
        let widened = number::widened_size(len);
        let raw = number::read_u64(buf, len)?;
        let status = match widened {
            1 => Status::U8(raw as u8),
            2 => Status::U16(raw as u16),
            4 => Status::U32(raw as u32),
            _ => Status::U64(raw),
        };
        Ok(Some(status))
    }

    pub fn write(buf: &mut Buffer, value: Option<Status>) {
        match value {
            None => buf.write_optional_skipped(),
            Some(Status::U8(v)) => {
                buf.write_type_length(SML_TYPE_UNSIGNED, 1);
                number::write_unsigned(buf, 1, v as u64);
            }
            Some(Status::U16(v)) => {
                buf.write_type_length(SML_TYPE_UNSIGNED, 2);
                number::write_unsigned(buf, 2, v as u64);
            }
            Some(Status::U32(v)) => {
                buf.write_type_length(SML_TYPE_UNSIGNED, 4);
                number::write_unsigned(buf, 4, v as u64);
            }
            Some(Status::U64(v)) => {
                buf.write_type_length(SML_TYPE_UNSIGNED, 8);
                number::write_unsigned(buf, 8, v);
            }
        }
    }

    pub fn as_u64(&self) -> u64 {
        match *self {
            Status::U8(v) => v as u64,
            Status::U16(v) => v as u64,
            Status::U32(v) => v as u64,
            Status::U64(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_widened_status() {
        let mut buf = Buffer::new(vec![0x62, 0x01, 0x2C]);
        assert_eq!(Status::parse(&mut buf).unwrap(), Some(Status::U16(300)));
    }

    #[test]
    fn write_then_parse_roundtrips() {
        let mut w = Buffer::with_capacity(8);
        Status::write(&mut w, Some(Status::U32(70_000)));
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(Status::parse(&mut r).unwrap(), Some(Status::U32(70_000)));
    }

    #[test]
    fn as_u64_widens_all_variants() {
        assert_eq!(Status::U8(1).as_u64(), 1);
        assert_eq!(Status::U64(u64::MAX).as_u64(), u64::MAX);
    }
}
