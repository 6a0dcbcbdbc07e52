// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

//! Wire constants for the SML Type-Length byte stream and message envelope.

/// Type nibble values carried in the high 4 bits of a TL byte.
pub const SML_TYPE_OCTET_STRING: u8 = 0x00;
pub const SML_TYPE_BOOLEAN: u8 = 0x40;
pub const SML_TYPE_INTEGER: u8 = 0x50;
pub const SML_TYPE_UNSIGNED: u8 = 0x60;
pub const SML_TYPE_LIST: u8 = 0x70;

/// Masks over a single TL byte.
pub const SML_TYPE_FIELD: u8 = 0x70;
pub const SML_LENGTH_FIELD: u8 = 0x0F;
/// Set on a TL byte when another TL byte follows, extending the length.
pub const SML_ANOTHER_TL: u8 = 0x80;

/// Stands in for any absent optional field.
pub const SML_OPTIONAL_SKIPPED: u8 = 0x01;

/// Trailing byte of a message once its CRC has been consumed.
pub const SML_MESSAGE_END: u8 = 0x00;

/// Message body tags (the `tag` half of the Message's body 2-tuple).
pub const SML_MESSAGE_OPEN_REQUEST: u32 = 0x00000100;
pub const SML_MESSAGE_OPEN_RESPONSE: u32 = 0x00000101;
pub const SML_MESSAGE_CLOSE_REQUEST: u32 = 0x00000200;
pub const SML_MESSAGE_CLOSE_RESPONSE: u32 = 0x00000201;
pub const SML_MESSAGE_GET_PROFILE_PACK_REQUEST: u32 = 0x00000300;
pub const SML_MESSAGE_GET_PROFILE_PACK_RESPONSE: u32 = 0x00000301;
pub const SML_MESSAGE_GET_PROFILE_LIST_REQUEST: u32 = 0x00000400;
pub const SML_MESSAGE_GET_PROFILE_LIST_RESPONSE: u32 = 0x00000401;
pub const SML_MESSAGE_GET_PROC_PARAMETER_REQUEST: u32 = 0x00000500;
pub const SML_MESSAGE_GET_PROC_PARAMETER_RESPONSE: u32 = 0x00000501;
pub const SML_MESSAGE_SET_PROC_PARAMETER_REQUEST: u32 = 0x00000600;
/// declared by the reference but never paired with a payload shape; not dispatched
pub const SML_MESSAGE_SET_PROC_PARAMETER_RESPONSE: u32 = 0x00000601;
pub const SML_MESSAGE_GET_LIST_REQUEST: u32 = 0x00000700;
pub const SML_MESSAGE_GET_LIST_RESPONSE: u32 = 0x00000701;
pub const SML_MESSAGE_ATTENTION_RESPONSE: u32 = 0x0000FF01;

/// ProcParValue tags (the `tag` half of its 2-tuple).
pub const SML_PROC_PAR_VALUE_TAG_VALUE: u8 = 0x01;
pub const SML_PROC_PAR_VALUE_TAG_PERIOD_ENTRY: u8 = 0x02;
pub const SML_PROC_PAR_VALUE_TAG_TUPEL_ENTRY: u8 = 0x03;
pub const SML_PROC_PAR_VALUE_TAG_TIME: u8 = 0x04;

/// Time tags (the `tag` half of the Time 2-tuple).
pub const SML_TIME_TAG_SEC_INDEX: u8 = 0x01;
pub const SML_TIME_TAG_TIMESTAMP: u8 = 0x02;

/// Transport framing byte sequences.
pub const TRANSPORT_START: [u8; 8] = [0x1B, 0x1B, 0x1B, 0x1B, 0x01, 0x01, 0x01, 0x01];
pub const TRANSPORT_ESC: [u8; 4] = [0x1B, 0x1B, 0x1B, 0x1B];
pub const TRANSPORT_END_MARK: u8 = 0x1A;

/// DZG old-firmware sentinel and the obj-name it is keyed on (see list.rs).
pub const DZG_SERIAL_OBJ_NAME: [u8; 6] = [0x01, 0x00, 0x60, 0x01, 0x00, 0xFF];
pub const DZG_SERIAL_SENTINEL: [u8; 10] = [0x0A, 0x01, 0x44, 0x5A, 0x47, 0x00, 0x03, 0x93, 0x87, 0x00];
pub const DZG_POWER_TYPE_OBJ_NAME: [u8; 6] = [0x01, 0x00, 0x10, 0x07, 0x00, 0xFF];

/// Holley DTZ541 bare-value substitute for an elided Time tuple.
pub const HOLLEY_BARE_TIME_TYPE: u8 = SML_TYPE_UNSIGNED | 0x05;
