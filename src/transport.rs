// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Transport framing: the START/ESC/END escape sequences and 4-byte padding
//! that bracket a file of messages on the wire, plus the frame-level CRC-16.

use crate::constant::{TRANSPORT_END_MARK, TRANSPORT_ESC, TRANSPORT_START};
use crate::crc;
use crate::error::Error;
use crate::file::File;
use std::io::{Read, Write};

/// Blocking-read one complete transport frame (START through the trailing
/// CRC, inclusive) from `reader`. Scans one byte at a time for the start
/// sequence, then reads 4 bytes at a time looking for an escape window.
///
/// A repeated `ESC ESC` 8-byte run in the payload is treated as an escaped
/// literal occurrence of the escape bytes, not a frame boundary, and is
/// copied straight through.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<u8>, Error> {
    let mut frame = Vec::new();
    let mut matched = 0usize;
    let mut byte = [0u8; 1];
    while matched < 8 {
        if reader.read(&mut byte)? == 0 {
            return Err(Error::TransportFraming("eof before start sequence"));
        }
        let b = byte[0];
        if (b == 0x1B && matched < 4) || (b == 0x01 && matched >= 4) {
            frame.push(b);
            matched += 1;
        } else {
            frame.clear();
            matched = 0;
        }
    }

    loop {
        let mut window = [0u8; 4];
        reader.read_exact(&mut window)?;
        if window == TRANSPORT_ESC {
            let mut next = [0u8; 4];
            reader.read_exact(&mut next)?;
            if next[0] == TRANSPORT_END_MARK {
                frame.extend_from_slice(&window);
                frame.extend_from_slice(&next);
                return Ok(frame);
            }
            if next == TRANSPORT_ESC {
                // literal escape: two ESC windows in a row are data, not a boundary
                frame.extend_from_slice(&window);
                frame.extend_from_slice(&next);
                continue;
            }
            return Err(Error::TransportFraming("unrecognized escape sequence"));
        }
        frame.extend_from_slice(&window);
    }
}

/// Checks a frame's trailing CRC-16 (x25, falling back to Kermit for the
/// Holley DTZ541 quirk) against what its bytes hash to. The reader itself
/// does not call this; it is the caller's choice whether to validate.
pub fn verify_crc(frame: &[u8]) -> Result<(), Error> {
    if frame.len() < 2 {
        return Err(Error::TransportFraming("frame too short for crc"));
    }
    let crc_pos = frame.len() - 2;
    let expected = u16::from_be_bytes([frame[crc_pos], frame[crc_pos + 1]]);
    let computed_x25 = crc::x25(&frame[..crc_pos]).swap_bytes();
    if computed_x25 != expected {
        let computed_kermit = crc::kermit(&frame[..crc_pos]).swap_bytes();
        if computed_kermit != expected {
            return Err(Error::CrcMismatch { expected, computed_x25, computed_kermit });
        }
        log::warn!("transport frame crc matched kermit, not x25 (holley DTZ541 workaround)");
    }
    Ok(())
}

/// Validates a frame's start and end markers, then decodes the enclosed
/// messages. Does not check the CRC; call [`verify_crc`] first if that
/// matters to the caller.
pub fn parse_frame(frame: &[u8]) -> Result<File, Error> {
    if frame.len() < TRANSPORT_START.len() + 4 + 1 + 2 {
        return Err(Error::TransportFraming("frame too short"));
    }
    if frame[..TRANSPORT_START.len()] != TRANSPORT_START {
        return Err(Error::TransportFraming("missing start sequence"));
    }

    let crc_pos = frame.len() - 2;
    let pad_pos = crc_pos - 1;
    let padding = frame[pad_pos] as usize;
    let end_seq_pos = pad_pos - 5;
    if frame[end_seq_pos..end_seq_pos + 4] != TRANSPORT_ESC {
        return Err(Error::TransportFraming("missing end escape sequence"));
    }
    if frame[end_seq_pos + 4] != TRANSPORT_END_MARK {
        return Err(Error::TransportFraming("missing end marker"));
    }
    if padding > end_seq_pos {
        return Err(Error::TransportFraming("padding count exceeds frame"));
    }

    let body_start = TRANSPORT_START.len();
    let body_end = end_seq_pos - padding;
    Ok(File::parse(frame[body_start..body_end].to_vec()))
}

/// Reads and decodes exactly one frame, validating its CRC.
pub fn read<R: Read>(reader: &mut R) -> Result<File, Error> {
    let frame = read_frame(reader)?;
    verify_crc(&frame)?;
    parse_frame(&frame)
}

/// Reads frames in an endless loop, invoking `receiver` with each decoded
/// file, until the reader hits EOF or a framing error.
pub fn listen<R: Read>(reader: &mut R, mut receiver: impl FnMut(File)) -> Result<(), Error> {
    loop {
        match read(reader) {
            Ok(file) => receiver(file),
            Err(Error::TransportFraming(reason)) if reason == "eof before start sequence" => {
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}

/// Wraps `file` in transport framing (start sequence, 4-byte-aligned zero
/// padding, end sequence, pad count, CRC-16) and writes the result.
pub fn write<W: Write>(writer: &mut W, file: &File) -> Result<usize, Error> {
    let mut frame = Vec::with_capacity(512);
    frame.extend_from_slice(&TRANSPORT_START);
    frame.extend_from_slice(&file.write());

    let padding = (4 - (frame.len() % 4)) % 4;
    frame.extend(std::iter::repeat(0u8).take(padding));

    frame.extend_from_slice(&TRANSPORT_ESC);
    frame.push(TRANSPORT_END_MARK);
    frame.push(padding as u8);

    let crc = crc::x25(&frame).swap_bytes();
    frame.extend_from_slice(&crc.to_be_bytes());

    writer.write_all(&frame)?;
    Ok(frame.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Message, MessageBody};
    use crate::messages::CloseRequest;
    use std::io::Cursor;

    fn sample_file() -> File {
        File {
            messages: vec![Message::new(MessageBody::CloseRequest(CloseRequest {
                global_signature: Some(b"sig".to_vec()),
            }))],
        }
    }

    #[test]
    fn write_then_read_roundtrips() {
        let file = sample_file();
        let mut out = Vec::new();
        write(&mut out, &file).unwrap();

        assert_eq!(&out[..8], &TRANSPORT_START[..]);
        assert_eq!(out.len() % 4, 0);

        let mut reader = Cursor::new(out);
        let parsed = read(&mut reader).unwrap();
        assert_eq!(parsed.messages.len(), 1);
        assert_eq!(parsed.messages[0].body, file.messages[0].body);
    }

    #[test]
    fn leading_garbage_before_start_is_skipped() {
        let file = sample_file();
        let mut out = vec![0xAA, 0xBB, 0xCC];
        write(&mut out, &file).unwrap();
        let mut reader = Cursor::new(out);
        let parsed = read(&mut reader).unwrap();
        assert_eq!(parsed.messages.len(), 1);
    }

    #[test]
    fn corrupted_frame_crc_is_rejected() {
        let file = sample_file();
        let mut out = Vec::new();
        write(&mut out, &file).unwrap();
        let last = out.len() - 1;
        out[last] ^= 0xFF;
        let mut reader = Cursor::new(out);
        assert!(matches!(read(&mut reader), Err(Error::CrcMismatch { .. })));
    }

    #[test]
    fn parse_frame_succeeds_without_crc_check() {
        let file = sample_file();
        let mut out = Vec::new();
        write(&mut out, &file).unwrap();
        let last = out.len() - 1;
        out[last] ^= 0xFF;
        // parse_frame only checks markers, not the crc; verify_crc is separate
        let parsed = parse_frame(&out).unwrap();
        assert_eq!(parsed.messages.len(), 1);
        assert!(verify_crc(&out).is_err());
    }
}
