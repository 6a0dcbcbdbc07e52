// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Set Proc Parameter request: writing a node of the parameter tree.
//! The corresponding response tag is declared but never paired with a
//! payload shape; it is not dispatched.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_LIST;
use crate::error::Error;
use crate::primitive::octet_string;
use crate::tree::{Tree, TreePath};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetProcParameterRequest {
    pub server_id: Option<Vec<u8>>,
    pub username: Option<Vec<u8>>,
    pub password: Option<Vec<u8>>,
    pub parameter_tree_path: Option<TreePath>,
    pub parameter_tree: Option<Tree>,
}

impl SetProcParameterRequest {
    pub fn parse(buf: &mut Buffer) -> Result<SetProcParameterRequest, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "set proc parameter request", found: ty });
        }
        if count != 5 {
            return Err(Error::LengthMismatch { expected: 5, found: count });
        }
        Ok(SetProcParameterRequest {
            server_id: octet_string::parse(buf)?,
            username: octet_string::parse(buf)?,
            password: octet_string::parse(buf)?,
            parameter_tree_path: TreePath::parse(buf)?,
            parameter_tree: Tree::parse(buf)?,
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 5);
        octet_string::write(buf, self.server_id.as_deref());
        octet_string::write(buf, self.username.as_deref());
        octet_string::write(buf, self.password.as_deref());
        match &self.parameter_tree_path {
            None => buf.write_optional_skipped(),
            Some(path) => path.write(buf),
        }
        match &self.parameter_tree {
            None => buf.write_optional_skipped(),
            Some(tree) => tree.write(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_proc_parameter_request_roundtrips() {
        let req = SetProcParameterRequest {
            server_id: Some(b"s".to_vec()),
            username: Some(b"u".to_vec()),
            password: Some(b"p".to_vec()),
            parameter_tree_path: Some(TreePath { entries: vec![b"1.8.0".to_vec()] }),
            parameter_tree: None,
        };
        let mut w = Buffer::with_capacity(64);
        req.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(SetProcParameterRequest::parse(&mut r).unwrap(), req);
    }
}
