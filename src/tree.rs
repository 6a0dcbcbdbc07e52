// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! The parameter tree carried by `GetProcParameterResponse`: a recursive
//! name/value/children structure, plus the period- and tupel-entry value
//! shapes a tree leaf can hold.

use crate::buffer::Buffer;
use crate::constant::{
    SML_PROC_PAR_VALUE_TAG_PERIOD_ENTRY, SML_PROC_PAR_VALUE_TAG_TIME,
    SML_PROC_PAR_VALUE_TAG_TUPEL_ENTRY, SML_PROC_PAR_VALUE_TAG_VALUE, SML_TYPE_LIST,
};
use crate::error::Error;
use crate::primitive::{number, octet_string, time::Time};
use crate::value::Value;

/// A single OBIS quantity observed over a reporting period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodEntry {
    pub obj_name: Vec<u8>,
    pub unit: Option<u8>,
    pub scaler: Option<i8>,
    pub value: Option<Value>,
    pub value_signature: Option<Vec<u8>>,
}

impl PeriodEntry {
    pub fn parse(buf: &mut Buffer) -> Result<Option<PeriodEntry>, Error> {
        if buf.probe_optional_skipped()? {
            return Ok(None);
        }
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "period entry", found: ty });
        }
        if count != 5 {
            return Err(Error::LengthMismatch { expected: 5, found: count });
        }
        let obj_name = octet_string::parse(buf)?
            .ok_or(Error::TypeMismatch { expected: "obj name", found: 0 })?;
        let unit = number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8);
        let scaler = number::parse_opt_signed(buf, 1)?.map(|v| v as i8);
        let value = Value::parse(buf)?;
        let value_signature = octet_string::parse(buf)?;
        Ok(Some(PeriodEntry { obj_name, unit, scaler, value, value_signature }))
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 5);
        octet_string::write(buf, Some(&self.obj_name));
        number::write_opt_unsigned(buf, 1, self.unit.map(|u| u as u64));
        number::write_opt_signed(buf, 1, self.scaler.map(|s| s as i64));
        Value::write(buf, self.value.as_ref());
        octet_string::write(buf, self.value_signature.as_deref());
    }
}

/// A three-phase instantaneous power measurement: active power plus four
/// reactive quadrants, each with its own unit/scale and a shared signature
/// across quadrants 1-4-A and 2-3-A.
#[derive(Debug, Clone, PartialEq)]
pub struct TupelEntry {
    pub server_id: Vec<u8>,
    pub sec_index: Option<Time>,
    pub status: Option<u64>,

    pub unit_p_a: Option<u8>,
    pub scaler_p_a: Option<i8>,
    pub value_p_a: Option<i64>,

    pub unit_r1: Option<u8>,
    pub scaler_r1: Option<i8>,
    pub value_r1: Option<i64>,

    pub unit_r4: Option<u8>,
    pub scaler_r4: Option<i8>,
    pub value_r4: Option<i64>,

    pub signature_p_a_r1_r4: Option<Vec<u8>>,

    pub unit_m_a: Option<u8>,
    pub scaler_m_a: Option<i8>,
    pub value_m_a: Option<i64>,

    pub unit_r2: Option<u8>,
    pub scaler_r2: Option<i8>,
    pub value_r2: Option<i64>,

    pub unit_r3: Option<u8>,
    pub scaler_r3: Option<i8>,
    pub value_r3: Option<i64>,

    pub signature_m_a_r2_r3: Option<Vec<u8>>,
}

impl TupelEntry {
    pub fn parse(buf: &mut Buffer) -> Result<Option<TupelEntry>, Error> {
        if buf.probe_optional_skipped()? {
            return Ok(None);
        }
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "tupel entry", found: ty });
        }
        if count != 23 {
            return Err(Error::LengthMismatch { expected: 23, found: count });
        }

        let server_id = octet_string::parse(buf)?
            .ok_or(Error::TypeMismatch { expected: "server id", found: 0 })?;
        let sec_index = Time::parse(buf)?;
        let status = number::parse_opt_unsigned(buf, 8)?;

        let unit_p_a = number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8);
        let scaler_p_a = number::parse_opt_signed(buf, 1)?.map(|v| v as i8);
        let value_p_a = number::parse_opt_signed(buf, 8)?;

        let unit_r1 = number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8);
        let scaler_r1 = number::parse_opt_signed(buf, 1)?.map(|v| v as i8);
        let value_r1 = number::parse_opt_signed(buf, 8)?;

        let unit_r4 = number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8);
        let scaler_r4 = number::parse_opt_signed(buf, 1)?.map(|v| v as i8);
        let value_r4 = number::parse_opt_signed(buf, 8)?;

        let signature_p_a_r1_r4 = octet_string::parse(buf)?;

        let unit_m_a = number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8);
        let scaler_m_a = number::parse_opt_signed(buf, 1)?.map(|v| v as i8);
        let value_m_a = number::parse_opt_signed(buf, 8)?;

        let unit_r2 = number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8);
        let scaler_r2 = number::parse_opt_signed(buf, 1)?.map(|v| v as i8);
        let value_r2 = number::parse_opt_signed(buf, 8)?;

        let unit_r3 = number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8);
        let scaler_r3 = number::parse_opt_signed(buf, 1)?.map(|v| v as i8);
        let value_r3 = number::parse_opt_signed(buf, 8)?;

        let signature_m_a_r2_r3 = octet_string::parse(buf)?;

        Ok(Some(TupelEntry {
            server_id,
            sec_index,
            status,
            unit_p_a,
            scaler_p_a,
            value_p_a,
            unit_r1,
            scaler_r1,
            value_r1,
            unit_r4,
            scaler_r4,
            value_r4,
            signature_p_a_r1_r4,
            unit_m_a,
            scaler_m_a,
            value_m_a,
            unit_r2,
            scaler_r2,
            value_r2,
            unit_r3,
            scaler_r3,
            value_r3,
            signature_m_a_r2_r3,
        }))
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 23);
        octet_string::write(buf, Some(&self.server_id));
        Time::write(buf, self.sec_index);
        number::write_opt_unsigned(buf, 8, self.status);

        number::write_opt_unsigned(buf, 1, self.unit_p_a.map(|v| v as u64));
        number::write_opt_signed(buf, 1, self.scaler_p_a.map(|v| v as i64));
        number::write_opt_signed(buf, 8, self.value_p_a);

        number::write_opt_unsigned(buf, 1, self.unit_r1.map(|v| v as u64));
        number::write_opt_signed(buf, 1, self.scaler_r1.map(|v| v as i64));
        number::write_opt_signed(buf, 8, self.value_r1);

        number::write_opt_unsigned(buf, 1, self.unit_r4.map(|v| v as u64));
        number::write_opt_signed(buf, 1, self.scaler_r4.map(|v| v as i64));
        number::write_opt_signed(buf, 8, self.value_r4);

        octet_string::write(buf, self.signature_p_a_r1_r4.as_deref());

        number::write_opt_unsigned(buf, 1, self.unit_m_a.map(|v| v as u64));
        number::write_opt_signed(buf, 1, self.scaler_m_a.map(|v| v as i64));
        number::write_opt_signed(buf, 8, self.value_m_a);

        number::write_opt_unsigned(buf, 1, self.unit_r2.map(|v| v as u64));
        number::write_opt_signed(buf, 1, self.scaler_r2.map(|v| v as i64));
        number::write_opt_signed(buf, 8, self.value_r2);

        number::write_opt_unsigned(buf, 1, self.unit_r3.map(|v| v as u64));
        number::write_opt_signed(buf, 1, self.scaler_r3.map(|v| v as i64));
        number::write_opt_signed(buf, 8, self.value_r3);

        octet_string::write(buf, self.signature_m_a_r2_r3.as_deref());
    }
}

/// A tagged procedure-parameter payload; the tag selects which shape the
/// second tuple element takes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcParValue {
    Value(Option<Value>),
    PeriodEntry(Option<PeriodEntry>),
    TupelEntry(Option<TupelEntry>),
    Time(Option<Time>),
}

impl ProcParValue {
    pub fn parse(buf: &mut Buffer) -> Result<Option<ProcParValue>, Error> {
        if buf.probe_optional_skipped()? {
            return Ok(None);
        }
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "proc par value", found: ty });
        }
        if count != 2 {
            return Err(Error::LengthMismatch { expected: 2, found: count });
        }
        let tag = number::parse_opt_unsigned(buf, 1)?
            .ok_or(Error::TypeMismatch { expected: "proc par value tag", found: 0 })?
            as u8;
        let ppv = match tag {
            SML_PROC_PAR_VALUE_TAG_VALUE => ProcParValue::Value(Value::parse(buf)?),
            SML_PROC_PAR_VALUE_TAG_PERIOD_ENTRY => ProcParValue::PeriodEntry(PeriodEntry::parse(buf)?),
            SML_PROC_PAR_VALUE_TAG_TUPEL_ENTRY => ProcParValue::TupelEntry(TupelEntry::parse(buf)?),
            SML_PROC_PAR_VALUE_TAG_TIME => ProcParValue::Time(Time::parse(buf)?),
            other => return Err(Error::UnknownTag(other as u32)),
        };
        Ok(Some(ppv))
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 2);
        match self {
            ProcParValue::Value(v) => {
                number::write_opt_unsigned(buf, 1, Some(SML_PROC_PAR_VALUE_TAG_VALUE as u64));
                Value::write(buf, v.as_ref());
            }
            ProcParValue::PeriodEntry(p) => {
                number::write_opt_unsigned(buf, 1, Some(SML_PROC_PAR_VALUE_TAG_PERIOD_ENTRY as u64));
                match p {
                    None => buf.write_optional_skipped(),
                    Some(entry) => entry.write(buf),
                }
            }
            ProcParValue::TupelEntry(t) => {
                number::write_opt_unsigned(buf, 1, Some(SML_PROC_PAR_VALUE_TAG_TUPEL_ENTRY as u64));
                match t {
                    None => buf.write_optional_skipped(),
                    Some(entry) => entry.write(buf),
                }
            }
            ProcParValue::Time(t) => {
                number::write_opt_unsigned(buf, 1, Some(SML_PROC_PAR_VALUE_TAG_TIME as u64));
                Time::write(buf, *t);
            }
        }
    }
}

/// A recursive parameter node: a name, an optional value, and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    pub parameter_name: Vec<u8>,
    pub parameter_value: Option<ProcParValue>,
    pub children: Vec<Tree>,
}

impl Tree {
    pub fn parse(buf: &mut Buffer) -> Result<Option<Tree>, Error> {
        if buf.probe_optional_skipped()? {
            return Ok(None);
        }
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "tree", found: ty });
        }
        if count != 3 {
            return Err(Error::LengthMismatch { expected: 3, found: count });
        }
        let parameter_name = octet_string::parse(buf)?
            .ok_or(Error::TypeMismatch { expected: "parameter name", found: 0 })?;
        let parameter_value = ProcParValue::parse(buf)?;

        let children = if buf.probe_optional_skipped()? {
            Vec::new()
        } else {
            let (ty, elems) = buf.read_type_length()?;
            if ty != SML_TYPE_LIST {
                return Err(Error::TypeMismatch { expected: "tree children", found: ty });
            }
            let mut children = Vec::with_capacity(elems);
            for _ in 0..elems {
                if let Some(child) = Tree::parse(buf)? {
                    children.push(child);
                }
            }
            children
        };

        Ok(Some(Tree { parameter_name, parameter_value, children }))
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 3);
        octet_string::write(buf, Some(&self.parameter_name));
        match &self.parameter_value {
            None => buf.write_optional_skipped(),
            Some(v) => v.write(buf),
        }
        if self.children.is_empty() {
            buf.write_optional_skipped();
        } else {
            buf.write_type_length(SML_TYPE_LIST, self.children.len());
            for child in &self.children {
                child.write(buf);
            }
        }
    }
}

/// A flat path of OBIS object names, addressing a node in a [`Tree`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreePath {
    pub entries: Vec<Vec<u8>>,
}

impl TreePath {
    pub fn parse(buf: &mut Buffer) -> Result<Option<TreePath>, Error> {
        if buf.probe_optional_skipped()? {
            return Ok(None);
        }
        let (ty, elems) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "tree path", found: ty });
        }
        let mut entries = Vec::with_capacity(elems);
        for _ in 0..elems {
            if let Some(entry) = octet_string::parse(buf)? {
                entries.push(entry);
            }
        }
        Ok(Some(TreePath { entries }))
    }

    pub fn write(&self, buf: &mut Buffer) {
        if self.entries.is_empty() {
            buf.write_optional_skipped();
            return;
        }
        buf.write_type_length(SML_TYPE_LIST, self.entries.len());
        for entry in &self.entries {
            octet_string::write(buf, Some(entry));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_tree_roundtrips() {
        let tree = Tree {
            parameter_name: b"1.8.0".to_vec(),
            parameter_value: Some(ProcParValue::Value(Some(Value::U32(12345)))),
            children: Vec::new(),
        };
        let mut w = Buffer::with_capacity(32);
        tree.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(Tree::parse(&mut r).unwrap(), Some(tree));
    }

    #[test]
    fn nested_tree_roundtrips() {
        let child = Tree { parameter_name: b"child".to_vec(), parameter_value: None, children: Vec::new() };
        let root = Tree {
            parameter_name: b"root".to_vec(),
            parameter_value: None,
            children: vec![child],
        };
        let mut w = Buffer::with_capacity(64);
        root.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(Tree::parse(&mut r).unwrap(), Some(root));
    }

    #[test]
    fn tree_path_roundtrips() {
        let path = TreePath { entries: vec![b"1".to_vec(), b"2".to_vec()] };
        let mut w = Buffer::with_capacity(16);
        path.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(TreePath::parse(&mut r).unwrap(), Some(path));
    }

    #[test]
    fn empty_tree_path_writes_optional_skip() {
        let path = TreePath::default();
        let mut w = Buffer::with_capacity(1);
        path.write(&mut w);
        assert_eq!(w.as_slice(), &[0x01]);
    }
}
