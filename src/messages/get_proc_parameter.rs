// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Get Proc Parameter request/response: reading a node of the parameter tree.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_LIST;
use crate::error::Error;
use crate::primitive::octet_string;
use crate::tree::{Tree, TreePath};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetProcParameterRequest {
    pub server_id: Option<Vec<u8>>,
    pub username: Option<Vec<u8>>,
    pub password: Option<Vec<u8>>,
    pub parameter_tree_path: Option<TreePath>,
    pub attribute: Option<Vec<u8>>,
}

impl GetProcParameterRequest {
    pub fn parse(buf: &mut Buffer) -> Result<GetProcParameterRequest, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "get proc parameter request", found: ty });
        }
        if count != 5 {
            return Err(Error::LengthMismatch { expected: 5, found: count });
        }
        Ok(GetProcParameterRequest {
            server_id: octet_string::parse(buf)?,
            username: octet_string::parse(buf)?,
            password: octet_string::parse(buf)?,
            parameter_tree_path: TreePath::parse(buf)?,
            attribute: octet_string::parse(buf)?,
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
        octet_string::write(buf, self.attribute.as_deref());
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetProcParameterResponse {
    pub server_id: Option<Vec<u8>>,
    pub parameter_tree_path: Option<TreePath>,
    pub parameter_tree: Option<Tree>,
}

impl GetProcParameterResponse {
    pub fn parse(buf: &mut Buffer) -> Result<GetProcParameterResponse, Error> {
        let (ty, count) = buf.read_type_length()?;
        if ty != SML_TYPE_LIST {
            return Err(Error::TypeMismatch { expected: "get proc parameter response", found: ty });
        }
        if count != 3 {
            return Err(Error::LengthMismatch { expected: 3, found: count });
        }
        Ok(GetProcParameterResponse {
            server_id: octet_string::parse(buf)?,
            parameter_tree_path: TreePath::parse(buf)?,
            parameter_tree: Tree::parse(buf)?,
        })
    }

    pub fn write(&self, buf: &mut Buffer) {
        buf.write_type_length(SML_TYPE_LIST, 3);
        octet_string::write(buf, self.server_id.as_deref());
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
    use crate::tree::ProcParValue;
    use crate::value::Value;

    #[test]
    fn get_proc_parameter_request_roundtrips() {
        let req = GetProcParameterRequest {
            server_id: Some(b"s".to_vec()),
            username: None,
            password: None,
            parameter_tree_path: Some(TreePath { entries: vec![b"1.8.0".to_vec()] }),
            attribute: None,
        };
        let mut w = Buffer::with_capacity(64);
        req.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(GetProcParameterRequest::parse(&mut r).unwrap(), req);
    }

    #[test]
    fn get_proc_parameter_response_roundtrips() {
        let resp = GetProcParameterResponse {
            server_id: Some(b"s".to_vec()),
            parameter_tree_path: None,
            parameter_tree: Some(Tree {
                parameter_name: b"1.8.0".to_vec(),
                parameter_value: Some(ProcParValue::Value(Some(Value::U32(5)))),
                children: Vec::new(),
            }),
        };
        let mut w = Buffer::with_capacity(64);
        resp.write(&mut w);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(GetProcParameterResponse::parse(&mut r).unwrap(), resp);
    }
}
