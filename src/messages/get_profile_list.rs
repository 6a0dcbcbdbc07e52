// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Get Profile List response: a single-channel variant of the profile pack
//! exchange, reusing [`crate::tree::PeriodEntry`] for each period slot.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_LIST;
use crate::error::Error;
use crate::primitive::{number, octet_string, time::Time};
use crate::sequence;
use crate::tree::{PeriodEntry, TreePath};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetProfileListResponse {
    pub server_id: Option<Vec<u8>>,
    pub act_time: Option<Time>,
    pub reg_period: Option<u32>,
    pub parameter_tree_path: Option<TreePath>,
    pub val_time: Option<Time>,
    pub status: Option<u64>,
    pub period_list: Vec<PeriodEntry>,
    pub rawdata: Option<Vec<u8>>,
    pub period_signature: Option<Vec<u8>>,
}

impl GetProfileListResponse {
    pub fn parse(buf: &mut Buffer) -> Result<GetProfileListResponse, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "get profile list response", found: ty });
        }
        if count != 9 {
            return Err(Error::LengthMismatch { expected: 9, found: count });
        }
        let server_id = octet_string::parse(buf)?;
        let act_time = Time::parse(buf)?;
        let reg_period = number::parse_opt_unsigned(buf, 4)?.map(|v| v as u32);
        let parameter_tree_path = TreePath::parse(buf)?;
        let val_time = Time::parse(buf)?;
        let status = number::parse_opt_unsigned(buf, 8)?;
        let period_list = sequence::parse(buf, |b| {
            PeriodEntry::parse(b)?.ok_or(Error::TypeMismatch { expected: "period entry", found: 0 })
        })?;
        let rawdata = octet_string::parse(buf)?;
        let period_signature = octet_string::parse(buf)?;
        Ok(GetProfileListResponse {
            server_id,
            act_time,
            reg_period,
            parameter_tree_path,
            val_time,
            status,
            period_list,
            rawdata,
            period_signature,
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 9);
        octet_string::write(buf, self.server_id.as_deref());
        Time::write(buf, self.act_time);
        number::write_opt_unsigned(buf, 4, self.reg_period.map(|v| v as u64));
        match &self.parameter_tree_path {
            None => buf.write_optional_skipped(),
            Some(path) => path.write(buf),
        }
        Time::write(buf, self.val_time);
        number::write_opt_unsigned(buf, 8, self.status);
        sequence::write(buf, &self.period_list, PeriodEntry::write);
        octet_string::write(buf, self.rawdata.as_deref());
        octet_string::write(buf, self.period_signature.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn get_profile_list_response_roundtrips() {
        let resp = GetProfileListResponse {
            server_id: Some(b"s".to_vec()),
            act_time: Some(Time::SecIndex(1)),
            reg_period: Some(60),
            parameter_tree_path: None,
            val_time: Some(Time::SecIndex(2)),
            status: Some(0),
            period_list: vec![PeriodEntry {
                obj_name: b"1.8.0".to_vec(),
                unit: Some(30),
                scaler: Some(-1),
                value: Some(Value::U32(42)),
                value_signature: None,
            }],
            rawdata: None,
            period_signature: None,
        };
        let mut w = Buffer::with_capacity(256);
        resp.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(GetProfileListResponse::parse(&mut r).unwrap(), resp);
    }
}
