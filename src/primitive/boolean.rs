// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Boolean: a single byte, canonicalized to 0x00/0xFF on write.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_BOOLEAN;
use crate::error::Error;

pub fn parse(buf: &mut Buffer) -> Result<Option<bool>, Error> {
    if buf.probe_optional_skipped()? {
        return Ok(None);
    }
    let (ty, len) = buf.read_type_length()?;
    if ty != SML_TYPE_BOOLEAN {
        return Err(Error::TypeMismatch { expected: "boolean", found: ty });
    }
    if len != 1 {
        return Err(Error::LengthMismatch { expected: 1, found: len });
    }
    Ok(Some(buf.read_byte()? != 0))
}

pub fn write(buf: &mut Buffer, value: Option<bool>) {
    match value {
        None => buf.write_optional_skipped(),
        Some(b) => {
            buf.write_type_length(SML_TYPE_BOOLEAN, 1);
            buf.write_byte(if b { 0xFF } else { 0x00 });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_true_and_false() {
        let mut t = Buffer::new(vec![0x42, 0xFF]);
        assert_eq!(parse(&mut t).unwrap(), Some(true));
        let mut f = Buffer::new(vec![0x42, 0x00]);
        assert_eq!(parse(&mut f).unwrap(), Some(false));
    }

    #[test]
    fn write_canonicalizes_true() {
        let mut w = Buffer::with_capacity(2);
        write(&mut w, Some(true));
        assert_eq!(w.as_slice(), &[0x42, 0xFF]);
    }

    #[test]
    fn optional_skip_roundtrips() {
        let mut w = Buffer::with_capacity(1);
        write(&mut w, None);
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(parse(&mut r).unwrap(), None);
    }
}
