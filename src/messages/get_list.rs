// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Get List request/response: the everyday meter-reading exchange.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_LIST;
use crate::error::Error;
use crate::list::{self, ListEntry};
use crate::primitive::{octet_string, time::Time};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetListRequest {
    pub client_id: Option<Vec<u8>>,
    pub server_id: Option<Vec<u8>>,
    pub username: Option<Vec<u8>>,
    pub password: Option<Vec<u8>>,
    pub list_name: Option<Vec<u8>>,
}

impl GetListRequest {
    pub fn parse(buf: &mut Buffer) -> Result<GetListRequest, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "get list request", found: ty });
        }
        if count != 5 {
            return Err(Error::LengthMismatch { expected: 5, found: count });
        }
        Ok(GetListRequest {
            client_id: octet_string::parse(buf)?,
            server_id: octet_string::parse(buf)?,
            username: octet_string::parse(buf)?,
            password: octet_string::parse(buf)?,
            list_name: octet_string::parse(buf)?,
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 5);
        octet_string::write(buf, self.client_id.as_deref());
        octet_string::write(buf, self.server_id.as_deref());
        octet_string::write(buf, self.username.as_deref());
        octet_string::write(buf, self.password.as_deref());
        octet_string::write(buf, self.list_name.as_deref());
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetListResponse {
    pub client_id: Option<Vec<u8>>,
    pub server_id: Option<Vec<u8>>,
    pub list_name: Option<Vec<u8>>,
    pub act_sensor_time: Option<Time>,
    pub val_list: Option<Vec<ListEntry>>,
    pub list_signature: Option<Vec<u8>>,
    pub act_gateway_time: Option<Time>,
}

impl GetListResponse {
    pub fn parse(buf: &mut Buffer) -> Result<GetListResponse, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "get list response", found: ty });
        }
        if count != 7 {
            return Err(Error::LengthMismatch { expected: 7, found: count });
        }
        Ok(GetListResponse {
            client_id: octet_string::parse(buf)?,
            server_id: octet_string::parse(buf)?,
            list_name: octet_string::parse(buf)?,
            act_sensor_time: Time::parse(buf)?,
            val_list: list::parse(buf)?,
            list_signature: octet_string::parse(buf)?,
            act_gateway_time: Time::parse(buf)?,
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 7);
        octet_string::write(buf, self.client_id.as_deref());
        octet_string::write(buf, self.server_id.as_deref());
        octet_string::write(buf, self.list_name.as_deref());
        Time::write(buf, self.act_sensor_time);
        list::write(buf, self.val_list.as_deref());
        octet_string::write(buf, self.list_signature.as_deref());
        Time::write(buf, self.act_gateway_time);
    }
}
