// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Close request/response: both carry a single optional signature.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_LIST;
use crate::error::Error;
use crate::primitive::octet_string;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloseRequest {
    pub global_signature: Option<Vec<u8>>,
}

impl CloseRequest {
    pub fn parse(buf: &mut Buffer) -> Result<CloseRequest, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "close request", found: ty });
        }
        if count != 1 {
            return Err(Error::LengthMismatch { expected: 1, found: count });
        }
        Ok(CloseRequest { global_signature: octet_string::parse(buf)? })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 1);
        octet_string::write(buf, self.global_signature.as_deref());
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloseResponse {
    pub global_signature: Option<Vec<u8>>,
}

impl CloseResponse {
    pub fn parse(buf: &mut Buffer) -> Result<CloseResponse, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "close response", found: ty });
        }
        if count != 1 {
            return Err(Error::LengthMismatch { expected: 1, found: count });
        }
        Ok(CloseResponse { global_signature: octet_string::parse(buf)? })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 1);
        octet_string::write(buf, self.global_signature.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_request_roundtrips() {
        let req = CloseRequest { global_signature: Some(b"sig".to_vec()) };
        let mut w = Buffer::with_capacity(16);
        req.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(CloseRequest::parse(&mut r).unwrap(), req);
    }

    #[test]
    fn close_response_empty_signature_roundtrips() {
        let resp = CloseResponse::default();
        let mut w = Buffer::with_capacity(4);
        resp.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(CloseResponse::parse(&mut r).unwrap(), resp);
    }
}
