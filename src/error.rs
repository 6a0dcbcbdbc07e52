// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

use std::error;
use std::fmt;
use std::io::Error as IOError;

/// Errors produced while decoding or encoding SML data.
#[derive(Debug)]
pub enum Error {
    /// the buffer ran out of bytes before a field finished decoding
    Truncation { wanted: usize, available: usize },
    /// the type nibble at the cursor did not match what the caller expected
    TypeMismatch { expected: &'static str, found: u8 },
    /// a fixed-arity tuple (list, tree, message) had the wrong element count
    LengthMismatch { expected: usize, found: usize },
    /// a message body or ProcParValue tag was outside the enumerated set
    UnknownTag(u32),
    /// neither CCITT-x25 nor Kermit CRC-16 matched the message's CRC field
    CrcMismatch { expected: u16, computed_x25: u16, computed_kermit: u16 },
    /// the transport frame was missing its start/end markers or carried an
    /// escape sequence this decoder does not understand
    TransportFraming(&'static str),
    /// an underlying `std::io` operation failed
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Truncation { wanted, available } => write!(
                f,
                "buffer truncated: wanted {} bytes, {} available",
                wanted, available
            ),
            Error::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found type nibble {:#x}", expected, found)
            }
            Error::LengthMismatch { expected, found } => {
                write!(f, "length mismatch: expected {} elements, found {}", expected, found)
            }
            Error::UnknownTag(tag) => write!(f, "unknown tag {:#010x}", tag),
            Error::CrcMismatch { expected, computed_x25, computed_kermit } => write!(
                f,
                "crc mismatch: message carries {:#06x}, computed x25 {:#06x}, kermit {:#06x}",
                expected, computed_x25, computed_kermit
            ),
            Error::TransportFraming(reason) => write!(f, "transport framing error: {}", reason),
            Error::Io(s) => write!(f, "io error: {}", s),
        }
    }
}

impl From<IOError> for Error {
    fn from(e: IOError) -> Self {
        Error::Io(e.to_string())
    }
}

// This is important for other errors to wrap this one.
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
