// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Get Profile Pack request/response: bulk historical-profile retrieval.
//! The request's object list was a linked list in the reference; here it
//! is a contiguous `Vec` like every other list in this crate.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_LIST;
use crate::error::Error;
use crate::primitive::{boolean, number, octet_string, time::Time};
use crate::sequence;
use crate::tree::{Tree, TreePath};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetProfilePackRequest {
    pub server_id: Option<Vec<u8>>,
    pub username: Option<Vec<u8>>,
    pub password: Option<Vec<u8>>,
    pub with_rawdata: Option<bool>,
    pub begin_time: Option<Time>,
    pub end_time: Option<Time>,
    pub parameter_tree_path: Option<TreePath>,
    pub object_list: Vec<Vec<u8>>,
    pub das_details: Option<Tree>,
}

impl GetProfilePackRequest {
    pub fn parse(buf: &mut Buffer) -> Result<GetProfilePackRequest, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "get profile pack request", found: ty });
        }
        if count != 9 {
            return Err(Error::LengthMismatch { expected: 9, found: count });
        }
        let server_id = octet_string::parse(buf)?;
        let username = octet_string::parse(buf)?;
        let password = octet_string::parse(buf)?;
        let with_rawdata = boolean::parse(buf)?;
        let begin_time = Time::parse(buf)?;
        let end_time = Time::parse(buf)?;
        let parameter_tree_path = TreePath::parse(buf)?;
        let object_list = sequence::parse(buf, |b| {
            octet_string::parse(b)?.ok_or(Error::TypeMismatch { expected: "object list entry", found: 0 })
        })?;
        let das_details = Tree::parse(buf)?;
        Ok(GetProfilePackRequest {
            server_id,
            username,
            password,
            with_rawdata,
            begin_time,
            end_time,
            parameter_tree_path,
            object_list,
            das_details,
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 9);
        octet_string::write(buf, self.server_id.as_deref());
        octet_string::write(buf, self.username.as_deref());
        octet_string::write(buf, self.password.as_deref());
        boolean::write(buf, self.with_rawdata);
        Time::write(buf, self.begin_time);
        Time::write(buf, self.end_time);
        match &self.parameter_tree_path {
            None => buf.write_optional_skipped(),
            Some(path) => path.write(buf),
        }
        sequence::write(buf, &self.object_list, |b, entry| octet_string::write(b, Some(entry)));
        match &self.das_details {
            None => buf.write_optional_skipped(),
            Some(tree) => tree.write(buf),
        }
    }
}

/// One OBIS channel header in a profile pack: name plus unit/scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfObjHeaderEntry {
    pub obj_name: Vec<u8>,
    pub unit: Option<u8>,
    pub scaler: Option<i8>,
}

impl ProfObjHeaderEntry {
    fn parse(buf: &mut Buffer) -> Result<ProfObjHeaderEntry, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "profile header entry", found: ty });
        }
        if count != 3 {
            return Err(Error::LengthMismatch { expected: 3, found: count });
        }
        Ok(ProfObjHeaderEntry {
            obj_name: octet_string::parse(buf)?
                .ok_or(Error::TypeMismatch { expected: "obj name", found: 0 })?,
            unit: number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8),
            scaler: number::parse_opt_signed(buf, 1)?.map(|v| v as i8),
        })
    }

    fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 3);
        octet_string::write(buf, Some(&self.obj_name));
        number::write_opt_unsigned(buf, 1, self.unit.map(|v| v as u64));
        number::write_opt_signed(buf, 1, self.scaler.map(|v| v as i64));
    }
}

/// One value slot within a profile period, paired with its own signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEntry {
    pub value: Option<Value>,
    pub value_signature: Option<Vec<u8>>,
}

impl ValueEntry {
    fn parse(buf: &mut Buffer) -> Result<ValueEntry, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "value entry", found: ty });
        }
        if count != 2 {
            return Err(Error::LengthMismatch { expected: 2, found: count });
        }
        Ok(ValueEntry { value: Value::parse(buf)?, value_signature: octet_string::parse(buf)? })
    }

    fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 2);
        Value::write(buf, self.value.as_ref());
        octet_string::write(buf, self.value_signature.as_deref());
    }
}

/// One reporting period within a profile pack: a timestamp, a status word,
/// and the sequence of values recorded for each header channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfObjPeriodEntry {
    pub val_time: Option<Time>,
    pub status: Option<u64>,
    pub value_list: Vec<ValueEntry>,
    pub period_signature: Option<Vec<u8>>,
}

impl ProfObjPeriodEntry {
    fn parse(buf: &mut Buffer) -> Result<ProfObjPeriodEntry, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "profile period entry", found: ty });
        }
        if count != 4 {
            return Err(Error::LengthMismatch { expected: 4, found: count });
        }
        let val_time = Time::parse(buf)?;
        let status = number::parse_opt_unsigned(buf, 8)?;
        let value_list = sequence::parse(buf, ValueEntry::parse)?;
        let period_signature = octet_string::parse(buf)?;
        Ok(ProfObjPeriodEntry { val_time, status, value_list, period_signature })
    }

    fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 4);
        Time::write(buf, self.val_time);
        number::write_opt_unsigned(buf, 8, self.status);
        sequence::write(buf, &self.value_list, ValueEntry::write);
        octet_string::write(buf, self.period_signature.as_deref());
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetProfilePackResponse {
    pub server_id: Option<Vec<u8>>,
    pub act_time: Option<Time>,
    pub reg_period: Option<u32>,
    pub parameter_tree_path: Option<TreePath>,
    pub header_list: Vec<ProfObjHeaderEntry>,
    pub period_list: Vec<ProfObjPeriodEntry>,
    pub rawdata: Option<Vec<u8>>,
    pub profile_signature: Option<Vec<u8>>,
}

impl GetProfilePackResponse {
    pub fn parse(buf: &mut Buffer) -> Result<GetProfilePackResponse, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "get profile pack response", found: ty });
        }
        if count != 8 {
            return Err(Error::LengthMismatch { expected: 8, found: count });
        }
        let server_id = octet_string::parse(buf)?;
        let act_time = Time::parse(buf)?;
        let reg_period = number::parse_opt_unsigned(buf, 4)?.map(|v| v as u32);
        let parameter_tree_path = TreePath::parse(buf)?;
        let header_list = sequence::parse(buf, ProfObjHeaderEntry::parse)?;
        let period_list = sequence::parse(buf, ProfObjPeriodEntry::parse)?;
        let rawdata = octet_string::parse(buf)?;
        let profile_signature = octet_string::parse(buf)?;
        Ok(GetProfilePackResponse {
            server_id,
            act_time,
            reg_period,
            parameter_tree_path,
            header_list,
            period_list,
            rawdata,
            profile_signature,
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 8);
        octet_string::write(buf, self.server_id.as_deref());
        Time::write(buf, self.act_time);
        number::write_opt_unsigned(buf, 4, self.reg_period.map(|v| v as u64));
        match &self.parameter_tree_path {
            None => buf.write_optional_skipped(),
            Some(path) => path.write(buf),
        }
        sequence::write(buf, &self.header_list, ProfObjHeaderEntry::write);
        sequence::write(buf, &self.period_list, ProfObjPeriodEntry::write);
        octet_string::write(buf, self.rawdata.as_deref());
        octet_string::write(buf, self.profile_signature.as_deref());
    }
}
