// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Generic homogeneous SML sequence: a plain `Vec<T>` parameterized over the
//! element codec, used wherever the wire carries a list of identically
//! shaped records (profile headers, profile periods, value entries).
//!
//! An empty sequence and the optional-skip marker are treated as the same
//! thing on read, so a writer that collapses an empty `Vec` to a skip byte
//! round-trips cleanly either way.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_LIST;
use crate::error::Error;

pub fn parse<T>(
    buf: &mut Buffer,
    mut elem_parse: impl FnMut(&mut Buffer) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    if buf.probe_optional_skipped()? {
        return Ok(Vec::new());
    }
    let (ty, count) = buf.read_type_length()?;
    if ty != SML_TYPE_LIST {
        return Err(Error::TypeMismatch { expected: "sequence", found: ty });
    }
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(elem_parse(buf)?);
    }
    Ok(items)
}

pub fn write<T>(buf: &mut Buffer, items: &[T], mut elem_write: impl FnMut(&mut Buffer, &T)) {
    if items.is_empty() {
        buf.write_optional_skipped();
        return;
    }
    buf.write_type_length(SML_TYPE_LIST, items.len());
    for item in items {
        elem_write(buf, item);
    }
}
