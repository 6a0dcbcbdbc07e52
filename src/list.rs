// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! SML list: a contiguous vector of 7-field entries reporting one OBIS
//! quantity each, plus the DZG old-firmware repair.

use crate::buffer::Buffer;
use crate::constant::{
    DZG_POWER_TYPE_OBJ_NAME, DZG_SERIAL_OBJ_NAME, DZG_SERIAL_SENTINEL, SML_ANOTHER_TL,
    SML_LENGTH_FIELD, SML_TYPE_FIELD, SML_TYPE_INTEGER, SML_TYPE_LIST,
};
use crate::error::Error;
use crate::primitive::{number, octet_string, time::Time};
use crate::status::Status;
use crate::value::Value;

/// One OBIS measurement record: name, optional status/timestamp/unit/scale,
/// the value itself, and an optional signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub obj_name: Vec<u8>,
    pub status: Option<Status>,
    pub val_time: Option<Time>,
    pub unit: Option<u8>,
    pub scaler: Option<i8>,
    pub value: Value,
    pub value_signature: Option<Vec<u8>>,
}

fn parse_opt_unit(buf: &mut Buffer) -> Result<Option<u8>, Error> {
    Ok(number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8))
}

fn parse_opt_scaler(buf: &mut Buffer) -> Result<Option<i8>, Error> {
    Ok(number::parse_opt_signed(buf, 1)?.map(|v| v as i8))
}

/// Coerces a signed value to unsigned for the DZG power-type quirk: the
/// obj-name is tagged signed but the meter actually emits an unsigned value
/// 1-3 bytes wide. Falls through to ordinary `Value::parse` otherwise.
fn parse_value_with_dzg_fix(buf: &mut Buffer, apply_fix: bool) -> Result<Value, Error> {
    if apply_fix {
        let first = buf.peek_byte()?;
        if first & SML_TYPE_FIELD == SML_TYPE_INTEGER && first & SML_ANOTHER_TL == 0 {
            let declared = (first & SML_LENGTH_FIELD) as usize;
            if let Some(payload_len) = declared.checked_sub(1) {
                if (1..=3).contains(&payload_len) {
                    buf.read_byte()?;
                    let widened = number::widened_size(payload_len);
                    let raw = number::read_u64(buf, payload_len)?;
                    log::debug!("dzg old-firmware power-type signed->unsigned coercion applied");
                    return Ok(match widened {
                        1 => Value::U8(raw as u8),
                        2 => Value::U16(raw as u16),
                        _ => Value::U32(raw as u32),
                    });
                }
            }
        }
    }
    Value::parse(buf)?.ok_or(Error::TypeMismatch { expected: "value", found: 0 })
}

fn is_old_dzg_serial(obj_name: &[u8], value: &Value) -> bool {
    const PREFIX: [u8; 6] = [0x0A, 0x01, b'D', b'Z', b'G', 0x00];
    if obj_name != DZG_SERIAL_OBJ_NAME {
        return false;
    }
    match value {
        Value::OctetString(bytes) => {
            bytes.len() >= PREFIX.len()
                && bytes[..PREFIX.len()] == PREFIX
                && bytes.as_slice() < &DZG_SERIAL_SENTINEL[..]
        }
        _ => false,
    }
}

impl ListEntry {
    fn parse(buf: &mut Buffer, old_dzg: &mut bool) -> Result<ListEntry, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "list entry", found: ty });
        }
        if count != 7 {
            return Err(Error::LengthMismatch { expected: 7, found: count });
        }

        let obj_name = octet_string::parse(buf)?
            .ok_or(Error::TypeMismatch { expected: "obj name", found: 0 })?;
        let status = Status::parse(buf)?;
        let val_time = crate::primitive::time::parse(buf)?;
        let unit = parse_opt_unit(buf)?;
        let scaler = parse_opt_scaler(buf)?;

        let apply_fix = *old_dzg && obj_name == DZG_POWER_TYPE_OBJ_NAME;
        let value = parse_value_with_dzg_fix(buf, apply_fix)?;

        if is_old_dzg_serial(&obj_name, &value) {
            log::debug!("old-firmware DZG serial detected, enabling power-type coercion");
            *old_dzg = true;
        }

        let value_signature = octet_string::parse(buf)?;

        Ok(ListEntry { obj_name, status, val_time, unit, scaler, value, value_signature })
    }

    fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 7);
        octet_string::write(buf, Some(&self.obj_name));
        Status::write(buf, self.status);
        Time::write(buf, self.val_time);
        number::write_opt_unsigned(buf, 1, self.unit.map(|u| u as u64));
        number::write_opt_signed(buf, 1, self.scaler.map(|s| s as i64));
        Value::write(buf, Some(&self.value));
        octet_string::write(buf, self.value_signature.as_deref());
    }
}

/// Parses an optional whole list (as carried by e.g. `GetListResponse`).
/// `Ok(None)` means the field carried the optional-skip marker.
pub fn parse(buf: &mut Buffer) -> Result<Option<Vec<ListEntry>>, Error> {
    if buf.probe_optional_skipped()? {
        return Ok(None);
    }
    let (ty, count) = buf.read_type_length()?;
    if ty != SML_TYPE_LIST {
        return Err(Error::TypeMismatch { expected: "list", found: ty });
    }
    let mut entries = Vec::with_capacity(count);
    let mut old_dzg = false;
    for _ in 0..count {
        entries.push(ListEntry::parse(buf, &mut old_dzg)?);
    }
    Ok(Some(entries))
}

pub fn write(buf: &mut Buffer, entries: Option<&[ListEntry]>) {
    let entries = match entries {
        None | Some([]) => {
            buf.write_optional_skipped();
            return;
        }
        Some(entries) => entries,
    };
    buf.write_type_length(SML_TYPE_LIST, entries.len());
    for entry in entries {
        entry.write(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_entry(obj_name: &[u8], value: Value) -> ListEntry {
        ListEntry {
            obj_name: obj_name.to_vec(),
            status: None,
            val_time: None,
            unit: None,
            scaler: None,
            value,
            value_signature: None,
        }
    }

    #[test]
    fn single_entry_roundtrips() {
        let entries = vec![minimal_entry(&[0x01, 0x00, 0x01, 0x08, 0x00, 0xFF], Value::U32(42))];
        let mut w = Buffer::with_capacity(32);
        write(&mut w, Some(&entries));
        let mut r = Buffer::new(w.into_inner());
        let parsed = parse(&mut r).unwrap();
        assert_eq!(parsed, Some(entries));
    }

    #[test]
    fn dzg_coercion_only_applies_after_old_firmware_serial() {
        // prefix + trailing zero bytes, byte-wise less than the sentinel
        let serial = vec![0x0Au8, 0x01, b'D', b'Z', b'G', 0x00, 0x00, 0x00, 0x00, 0x00];
        let entries = vec![
            minimal_entry(&DZG_SERIAL_OBJ_NAME, Value::OctetString(serial)),
            // written as signed; old-firmware DZG quirk means the meter really means unsigned
            minimal_entry(&DZG_POWER_TYPE_OBJ_NAME, Value::I16(5)),
        ];
        let mut w = Buffer::with_capacity(64);
        write(&mut w, Some(&entries));
        let mut r = Buffer::new(w.into_inner());
        let parsed = parse(&mut r).unwrap().unwrap();
        assert_eq!(parsed[1].value, Value::U16(5));
    }

    #[test]
    fn optional_skip_roundtrips() {
        let mut w = Buffer::with_capacity(1);
        write(&mut w, None);
        assert_eq!(w.as_slice(), &[0x01]);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(parse(&mut r).unwrap(), None);
    }
}
