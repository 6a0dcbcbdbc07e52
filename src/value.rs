// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! `Value`: the tagged union carried by every SML list entry and many
//! procedure parameters.

use crate::buffer::Buffer;
use crate::constant::{SML_TYPE_BOOLEAN, SML_TYPE_INTEGER, SML_TYPE_OCTET_STRING, SML_TYPE_UNSIGNED};
use crate::error::Error;
use crate::primitive::number;

/// A single SML value. The variant itself remembers the wire width that
/// was widened up to, so writing it back chooses the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    OctetString(Vec<u8>),
    Boolean(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
}

impl Value {
    pub fn parse(buf: &mut Buffer) -> Result<Option<Value>, Error> {
        if buf.probe_optional_skipped()? {
            return Ok(None);
        }
        let (ty, len) = buf.read_type_length()?;
        let value = match ty {
            SML_TYPE_OCTET_STRING => Value::OctetString(buf.read_bytes(len)?.to_vec()),
            SML_TYPE_BOOLEAN => {
                if len != 1 {
                    return Err(Error::LengthMismatch { expected: 1, found: len });
                }
                Value::Boolean(buf.read_byte()? != 0)
            }
            SML_TYPE_UNSIGNED => {
                let widened = number::widened_size(len);
                let raw = number::read_u64(buf, len)?;
                match widened {
                    1 => Value::U8(raw as u8),
                    2 => Value::U16(raw as u16),
                    4 => Value::U32(raw as u32),
                    _ => Value::U64(raw),
                }
            }
            SML_TYPE_INTEGER => {
                let widened = number::widened_size(len);
                let raw = number::read_i64(buf, len)?;
                match widened {
                    1 => Value::I8(raw as i8),
                    2 => Value::I16(raw as i16),
                    4 => Value::I32(raw as i32),
                    _ => Value::I64(raw),
                }
            }
            other => return Err(Error::TypeMismatch { expected: "value", found: other }),
        };
        Ok(Some(value))
    }

    pub fn write(buf: &mut Buffer, value: Option<&Value>) {
        match value {
            None => buf.write_optional_skipped(),
            Some(Value::OctetString(bytes)) => {
                buf.write_type_length(SML_TYPE_OCTET_STRING, bytes.len());
                buf.write_bytes(bytes);
            }
            Some(Value::Boolean(b)) => {
                buf.write_type_length(SML_TYPE_BOOLEAN, 1);
                buf.write_byte(if *b { 0xFF } else { 0x00 });
            }
            Some(Value::U8(v)) => {
                buf.write_type_length(SML_TYPE_UNSIGNED, 1);
                number::write_unsigned(buf, 1, *v as u64);
            }
            Some(Value::U16(v)) => {
                buf.write_type_length(SML_TYPE_UNSIGNED, 2);
                number::write_unsigned(buf, 2, *v as u64);
            }
            Some(Value::U32(v)) => {
                buf.write_type_length(SML_TYPE_UNSIGNED, 4);
                number::write_unsigned(buf, 4, *v as u64);
            }
            Some(Value::U64(v)) => {
                buf.write_type_length(SML_TYPE_UNSIGNED, 8);
                number::write_unsigned(buf, 8, *v);
            }
            Some(Value::I8(v)) => {
                buf.write_type_length(SML_TYPE_INTEGER, 1);
                number::write_signed(buf, 1, *v as i64);
            }
            Some(Value::I16(v)) => {
                buf.write_type_length(SML_TYPE_INTEGER, 2);
                number::write_signed(buf, 2, *v as i64);
            }
            Some(Value::I32(v)) => {
                buf.write_type_length(SML_TYPE_INTEGER, 4);
                number::write_signed(buf, 4, *v as i64);
            }
            Some(Value::I64(v)) => {
                buf.write_type_length(SML_TYPE_INTEGER, 8);
                number::write_signed(buf, 8, *v);
            }
        }
    }

    /// Reads any numeric variant as an `f64`; non-numeric variants return `None`.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::U8(v) => Some(*v as f64),
            Value::U16(v) => Some(*v as f64),
            Value::U32(v) => Some(*v as f64),
            Value::U64(v) => Some(*v as f64),
            Value::I8(v) => Some(*v as f64),
            Value::I16(v) => Some(*v as f64),
            Value::I32(v) => Some(*v as f64),
            Value::I64(v) => Some(*v as f64),
            Value::OctetString(_) | Value::Boolean(_) => None,
        }
    }
}
