// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Open request/response: the session handshake.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_LIST;
use crate::error::Error;
use crate::primitive::{number, octet_string, time::Time};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenRequest {
    pub codepage: Option<Vec<u8>>,
    pub client_id: Option<Vec<u8>>,
    pub req_file_id: Option<Vec<u8>>,
    pub server_id: Option<Vec<u8>>,
    pub username: Option<Vec<u8>>,
    pub password: Option<Vec<u8>>,
    pub sml_version: Option<u8>,
}

impl OpenRequest {
    pub fn parse(buf: &mut Buffer) -> Result<OpenRequest, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "open request", found: ty });
        }
        if count != 7 {
            return Err(Error::LengthMismatch { expected: 7, found: count });
        }
        Ok(OpenRequest {
            codepage: octet_string::parse(buf)?,
            client_id: octet_string::parse(buf)?,
            req_file_id: octet_string::parse(buf)?,
            server_id: octet_string::parse(buf)?,
            username: octet_string::parse(buf)?,
            password: octet_string::parse(buf)?,
            sml_version: number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8),
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 7);
        octet_string::write(buf, self.codepage.as_deref());
        octet_string::write(buf, self.client_id.as_deref());
        octet_string::write(buf, self.req_file_id.as_deref());
        octet_string::write(buf, self.server_id.as_deref());
        octet_string::write(buf, self.username.as_deref());
        octet_string::write(buf, self.password.as_deref());
        number::write_opt_unsigned(buf, 1, self.sml_version.map(|v| v as u64));
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpenResponse {
    pub codepage: Option<Vec<u8>>,
    pub client_id: Option<Vec<u8>>,
    pub req_file_id: Option<Vec<u8>>,
    pub server_id: Option<Vec<u8>>,
    pub ref_time: Option<Time>,
    pub sml_version: Option<u8>,
}

impl OpenResponse {
    pub fn parse(buf: &mut Buffer) -> Result<OpenResponse, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "open response", found: ty });
        }
        if count != 6 {
            return Err(Error::LengthMismatch { expected: 6, found: count });
        }
        Ok(OpenResponse {
            codepage: octet_string::parse(buf)?,
            client_id: octet_string::parse(buf)?,
            req_file_id: octet_string::parse(buf)?,
            server_id: octet_string::parse(buf)?,
            ref_time: Time::parse(buf)?,
            sml_version: number::parse_opt_unsigned(buf, 1)?.map(|v| v as u8),
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 6);
        octet_string::write(buf, self.codepage.as_deref());
        octet_string::write(buf, self.client_id.as_deref());
        octet_string::write(buf, self.req_file_id.as_deref());
        octet_string::write(buf, self.server_id.as_deref());
        Time::write(buf, self.ref_time);
        number::write_opt_unsigned(buf, 1, self.sml_version.map(|v| v as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_request_roundtrips() {
        let req = OpenRequest {
            codepage: None,
            client_id: Some(b"client".to_vec()),
            req_file_id: Some(b"1".to_vec()),
            server_id: Some(b"server".to_vec()),
            username: None,
            password: None,
            sml_version: Some(1),
        };
        let mut w = Buffer::with_capacity(64);
        req.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(OpenRequest::parse(&mut r).unwrap(), req);
    }

    #[test]
    fn open_response_roundtrips() {
        let resp = OpenResponse {
            codepage: None,
            client_id: Some(b"client".to_vec()),
            req_file_id: None,
            server_id: Some(b"server".to_vec()),
            ref_time: Some(Time::SecIndex(42)),
            sml_version: Some(1),
        };
        let mut w = Buffer::with_capacity(64);
        resp.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(OpenResponse::parse(&mut r).unwrap(), resp);
    }
}
