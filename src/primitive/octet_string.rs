// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Octet string: a raw byte run, SML's only variable-length primitive.

use crate::buffer::Buffer;
use crate::constant::SML_TYPE_OCTET_STRING;
use crate::error::Error;

/// Parses an optional octet string. `Ok(None)` means the field was present
/// but carried the optional-skip marker.
pub fn parse(buf: &mut Buffer) -> Result<Option<Vec<u8>>, Error> {
    if buf.probe_optional_skipped()? {
        return Ok(None);
    }
    let (ty, len) = buf.read_type_length()?;
    if ty != SML_TYPE_OCTET_STRING {
        return Err(Error::TypeMismatch { expected: "octet string", found: ty });
    }
    Ok(Some(buf.read_bytes(len)?.to_vec()))
}

pub fn write(buf: &mut Buffer, value: Option<&[u8]>) {
    match value {
        None => buf.write_optional_skipped(),
        Some(bytes) => {
            buf.write_type_length(SML_TYPE_OCTET_STRING, bytes.len());
            buf.write_bytes(bytes);
        }
    }
}

/// Renders bytes as space-separated hex pairs; when `mixed` is set,
/// printable ASCII bytes pass through as themselves instead of being
/// hex-encoded, until the first non-printable byte is seen, after which
/// every remaining byte is hex-encoded regardless of printability.
pub fn to_hex_string(bytes: &[u8], mixed: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    let mut mixed = mixed;
    for &b in bytes {
        if mixed && b > 0x20 && b < 0x7B {
            out.push(b as char);
        } else {
            mixed = false;
            out.push_str(&format!("{:02x} ", b));
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_skipped_returns_none() {
        let mut buf = Buffer::new(vec![0x01]);
        assert_eq!(parse(&mut buf).unwrap(), None);
    }

    #[test]
    fn short_string_roundtrips() {
        let mut buf = Buffer::new(vec![0x03, 0x48, 0x69]);
        assert_eq!(parse(&mut buf).unwrap(), Some(b"Hi".to_vec()));
    }

    #[test]
    fn write_then_parse_roundtrips() {
        let mut w = Buffer::with_capacity(8);
        write(&mut w, Some(b"hello"));
        let mut r = Buffer::new(w.into_inner());
        assert_eq!(parse(&mut r).unwrap(), Some(b"hello".to_vec()));
    }

    #[test]
    fn write_none_emits_optional_skip() {
        let mut w = Buffer::with_capacity(1);
        write(&mut w, None);
        assert_eq!(w.as_slice(), &[0x01]);
    }

    #[test]
    fn hex_string_mixed_mode() {
        assert_eq!(to_hex_string(b"Ab\x01", true), "Ab01");
        assert_eq!(to_hex_string(b"Ab\x01", false), "41 62 01");
    }

    #[test]
    fn hex_string_mixed_mode_falls_back_after_non_printable() {
        // once a non-printable byte forces hex mode, later printable bytes
        // stay hex-encoded too
        assert_eq!(to_hex_string(b"A\x01b", true), "A01 62");
    }
}
