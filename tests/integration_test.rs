// Copyright 2019 Petar Dambovaliev. All rights reserved.
// This software may be modified and distributed under the terms
// of the BSD license. See the LICENSE file for details.

extern crate sml_rs;

use sml_rs::message::{Message, MessageBody};
use sml_rs::messages::{
    CloseRequest, CloseResponse, GetListRequest, GetListResponse, OpenRequest, OpenResponse,
};
use sml_rs::value::Value;
use sml_rs::{file::File, transport};
use std::io::Cursor;

fn open_close_session() -> File {
    File {
        messages: vec![
            Message::new(MessageBody::OpenRequest(OpenRequest {
                codepage: None,
                client_id: Some(b"test-client".to_vec()),
                req_file_id: Some(b"req-1".to_vec()),
                server_id: None,
                username: None,
                password: None,
                sml_version: Some(1),
            })),
            Message::new(MessageBody::OpenResponse(OpenResponse {
                codepage: None,
                client_id: Some(b"test-client".to_vec()),
                req_file_id: Some(b"req-1".to_vec()),
                server_id: Some(b"meter-1".to_vec()),
                ref_time: None,
                sml_version: Some(1),
            })),
            Message::new(MessageBody::GetListRequest(GetListRequest {
                client_id: None,
                server_id: Some(b"meter-1".to_vec()),
                username: None,
                password: None,
                list_name: None,
            })),
            Message::new(MessageBody::GetListResponse(GetListResponse {
                client_id: None,
                server_id: Some(b"meter-1".to_vec()),
                list_name: None,
                act_sensor_time: None,
                val_list: None,
                list_signature: None,
                act_gateway_time: None,
            })),
            Message::new(MessageBody::CloseRequest(CloseRequest { global_signature: None })),
            Message::new(MessageBody::CloseResponse(CloseResponse { global_signature: None })),
        ],
    }
}

/// S1: a full open/get-list/close session survives a transport round trip
/// byte-for-byte in message content.
#[test]
fn full_session_roundtrips_through_transport() {
    let file = open_close_session();
    let mut wire = Vec::new();
    transport::write(&mut wire, &file).unwrap();

    let mut reader = Cursor::new(wire);
    let decoded = transport::read(&mut reader).unwrap();

    assert_eq!(decoded.messages.len(), file.messages.len());
    for (got, want) in decoded.messages.iter().zip(file.messages.iter()) {
        assert_eq!(got.body, want.body);
    }
}

/// S2: `listen` drains every frame on a reader containing several
/// back-to-back files and stops cleanly at EOF.
#[test]
fn listen_drains_multiple_frames() {
    let mut wire = Vec::new();
    transport::write(&mut wire, &open_close_session()).unwrap();
    transport::write(&mut wire, &open_close_session()).unwrap();

    let mut reader = Cursor::new(wire);
    let mut seen = 0;
    transport::listen(&mut reader, |file| {
        seen += 1;
        assert_eq!(file.messages.len(), 6);
    })
    .unwrap();

    assert_eq!(seen, 2);
}

/// S3: a file containing a response with an actual value list round-trips
/// the decoded numeric value intact.
#[test]
fn value_in_list_response_survives_roundtrip() {
    use sml_rs::list::ListEntry;

    let entry = ListEntry {
        obj_name: vec![1, 0, 1, 8, 0, 255],
        status: None,
        val_time: None,
        unit: Some(30),
        scaler: Some(-1),
        value: Value::U32(12345),
        value_signature: None,
    };
    let file = File {
        messages: vec![Message::new(MessageBody::GetListResponse(GetListResponse {
            client_id: None,
            server_id: Some(b"meter-1".to_vec()),
            list_name: None,
            act_sensor_time: None,
            val_list: Some(vec![entry]),
            list_signature: None,
            act_gateway_time: None,
        }))],
    };

    let mut wire = Vec::new();
    transport::write(&mut wire, &file).unwrap();
    let mut reader = Cursor::new(wire);
    let decoded = transport::read(&mut reader).unwrap();

    match &decoded.messages[0].body {
        MessageBody::GetListResponse(resp) => {
            let entries = resp.val_list.as_ref().unwrap();
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].value, Value::U32(12345));
            assert_eq!(entries[0].scaler, Some(-1));
        }
        other => panic!("unexpected body: {:?}", other),
    }
}

/// S4: leading noise on the wire ahead of the start sequence does not
/// prevent the frame from being found and decoded.
#[test]
fn leading_noise_does_not_break_framing() {
    let file = open_close_session();
    let mut wire = vec![0xDE, 0xAD, 0xBE, 0xEF];
    transport::write(&mut wire, &file).unwrap();

    let mut reader = Cursor::new(wire);
    let decoded = transport::read(&mut reader).unwrap();
    assert_eq!(decoded.messages.len(), file.messages.len());
}

/// S5: flipping a single payload byte breaks the frame CRC, so the
/// corruption is caught rather than silently decoded.
#[test]
fn corrupted_payload_is_rejected_by_crc() {
    let file = open_close_session();
    let mut wire = Vec::new();
    transport::write(&mut wire, &file).unwrap();

    let mid = wire.len() / 2;
    wire[mid] ^= 0xFF;

    let mut reader = Cursor::new(wire);
    assert!(transport::read(&mut reader).is_err());
}

/// S6: an empty reader produces a clean EOF rather than an error from
/// `listen`.
#[test]
fn listen_on_empty_reader_returns_ok() {
    let mut reader = Cursor::new(Vec::new());
    let mut seen = 0;
    transport::listen(&mut reader, |_| seen += 1).unwrap();
    assert_eq!(seen, 0);
}
