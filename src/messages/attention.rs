// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Attention response: a meter-raised notice or error, optionally carrying
//! a detail tree.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_LIST;
use crate::error::Error;
use crate::primitive::octet_string;
use crate::tree::Tree;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttentionResponse {
    pub server_id: Option<Vec<u8>>,
    pub attention_number: Option<Vec<u8>>,
    pub attention_message: Option<Vec<u8>>,
    pub attention_details: Option<Tree>,
}

impl AttentionResponse {
    pub fn parse(buf: &mut Buffer) -> Result<AttentionResponse, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "attention response", found: ty });
        }
        if count != 4 {
            return Err(Error::LengthMismatch { expected: 4, found: count });
        }
        Ok(AttentionResponse {
            server_id: octet_string::parse(buf)?,
            attention_number: octet_string::parse(buf)?,
            attention_message: octet_string::parse(buf)?,
            attention_details: Tree::parse(buf)?,
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 4);
        octet_string::write(buf, self.server_id.as_deref());
        octet_string::write(buf, self.attention_number.as_deref());
        octet_string::write(buf, self.attention_message.as_deref());
        match &self.attention_details {
            None => buf.write_optional_skipped(),
            Some(tree) => tree.write(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attention_response_roundtrips() {
        let resp = AttentionResponse {
            server_id: Some(b"s".to_vec()),
            attention_number: Some(b"1".to_vec()),
            attention_message: None,
            attention_details: None,
        };
        let mut w = Buffer::with_capacity(32);
        resp.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(AttentionResponse::parse(&mut r).unwrap(), resp);
    }
}
