// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! A file: the ordered sequence of messages a meter emits between one
//! transport START and END frame, separated by zero-byte padding.

use crate::buffer::Buffer;
use crate::constant::SML_MESSAGE_END;
use crate::message::Message;

/// An ordered run of messages. Parsing stops at the first malformed
/// message and keeps whatever parsed cleanly before it, logging a warning
/// rather than discarding a partially usable file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct File {
    pub messages: Vec<Message>,
}

impl File {
    pub fn parse(data: Vec<u8>) -> File {
        let mut buf = Buffer::new(data);
        let mut messages = Vec::new();
        while buf.remaining() > 0 {
            if buf.peek_byte().unwrap() == SML_MESSAGE_END {
                buf.read_byte().unwrap();
                continue;
            }
            match Message::parse(&mut buf) {
                Ok(msg) => messages.push(msg),
                Err(e) => {
                    log::warn!("could not read the whole file: {}", e);
                    break;
                }
            }
        }
        File { messages }
    }

    pub fn write(&self) -> Vec<u8> {
        let mut buf = Buffer::with_capacity(512);
        for message in &self.messages {
            message.write(&mut buf);
        }
        buf.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageBody;
    use crate::messages::CloseRequest;

    #[test]
    fn roundtrips_multiple_messages() {
        let file = File {
            messages: vec![
                Message::new(MessageBody::CloseRequest(CloseRequest { global_signature: None })),
                Message::new(MessageBody::CloseRequest(CloseRequest {
                    global_signature: Some(b"sig".to_vec()),
                })),
            ],
        };
        let bytes = file.write();
        let parsed = File::parse(bytes);
        assert_eq!(parsed.messages.len(), 2);
        assert_eq!(parsed.messages[1].body, file.messages[1].body);
    }

    #[test]
    fn stops_at_first_malformed_message_but_keeps_earlier_ones() {
        let file = File {
            messages: vec![Message::new(MessageBody::CloseRequest(CloseRequest {
                global_signature: None,
            }))],
        };
        let mut bytes = file.write();
        bytes.extend_from_slice(&[0x70, 0xFF, 0xFF]); // garbage trailing message
        let parsed = File::parse(bytes);
        assert_eq!(parsed.messages.len(), 1);
    }

    #[test]
    fn empty_input_parses_to_no_messages() {
        let parsed = File::parse(Vec::new());
        assert!(parsed.messages.is_empty());
    }
}
