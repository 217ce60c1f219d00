use ndef_record::kinds::{
    BluetoothEasyPairingRecord, ByteOrder, DeviceInfoRecord, HandoverRecord, TextRecord,
    device_info,
};
use ndef_record::{
    NdefError, Record, RecordKind, SliceCursor, TypeNameFormat, decode_record, decode_record_with,
    default_resolver,
};

fn bytes(s: &str) -> Vec<u8> {
    hex::decode(s.replace(' ', "")).unwrap()
}

#[test]
fn text_record_from_tag() {
    let data = bytes("D1 01 03 54 02 65 6E");
    let record = Record::from_bytes(&data).unwrap();

    let flags = record.flags();
    assert!(flags.message_begin && flags.message_end && flags.short_record);
    assert!(!flags.chunk && !flags.id_length_present);
    assert_eq!(record.tnf(), Ok(TypeNameFormat::WellKnown));
    assert_eq!(record.decoded_type(), "T");
    assert_eq!(record.record_type(), "urn:nfc:wkt:T");
    match record.kind() {
        RecordKind::Text(text) => {
            assert_eq!(text.language, "en");
            assert!(text.text.is_empty());
        }
        other => panic!("expected text record, got {:?}", other),
    }

    assert_eq!(record.to_bytes().unwrap(), data);
}

#[test]
fn text_record_built_by_hand_matches_service_layout() {
    // MB=1, ME=1, SR=1, TNF=1, type "T", payload "\x02en" + text
    let record = Record::text("en", "user-42");
    let mut expected = vec![0xD1, 0x01, 0x0A, b'T', 0x02, b'e', b'n'];
    expected.extend_from_slice(b"user-42");
    assert_eq!(record.to_bytes().unwrap(), expected);
}

#[test]
fn payload_of_255_uses_short_length() {
    let record = Record::with_type(TypeNameFormat::Media, "application/octet-stream", &[0x5A; 255]);
    let encoded = record.to_bytes().unwrap();
    assert_eq!(encoded[0] & 0x10, 0x10);
    assert_eq!(encoded[2], 0xFF);
    assert_eq!(encoded.len(), 3 + 24 + 255);
    assert_eq!(Record::from_bytes(&encoded).unwrap(), record);
}

#[test]
fn payload_of_256_uses_long_length() {
    let mut record =
        Record::with_type(TypeNameFormat::Media, "application/octet-stream", &[0x5A; 256]);
    // Earlier behaviour left SR set here, producing a header that disagrees
    // with the 4-byte length field. The encoder now clears it.
    record.flags_mut().short_record = true;

    let encoded = record.to_bytes().unwrap();
    assert_eq!(encoded[0] & 0x10, 0x00);
    assert_eq!(&encoded[2..6], &[0x00, 0x01, 0x00, 0x00]);
    assert_eq!(encoded.len(), 6 + 24 + 256);

    let decoded = Record::from_bytes(&encoded).unwrap();
    assert!(!decoded.flags().short_record);
    assert_eq!(decoded, record);
}

#[test]
fn absent_id_has_no_length_byte() {
    let mut record = Record::uri("https://example.com");
    record.flags_mut().id_length_present = true;

    let encoded = record.to_bytes().unwrap();
    assert_eq!(encoded[0] & 0x08, 0x00);
    // header, type length, payload length, then the type byte directly
    assert_eq!(encoded[3], b'U');

    let decoded = Record::from_bytes(&encoded).unwrap();
    assert_eq!(decoded.id(), None);
    assert_eq!(decoded.id_string(), "(empty)");
}

#[test]
fn present_id_round_trips() {
    let mut record = Record::uri("https://example.com");
    record.set_id(Some(b"#1".to_vec()));

    let encoded = record.to_bytes().unwrap();
    assert_eq!(encoded[0] & 0x08, 0x08);
    assert_eq!(encoded[3], 2);
    assert_eq!(&encoded[4..7], b"U#1");

    let decoded = Record::from_bytes(&encoded).unwrap();
    assert_eq!(decoded.id(), Some(&b"#1"[..]));
    assert_eq!(decoded, record);
}

#[test]
fn zero_length_id_is_not_an_id() {
    let mut record = Record::uri("tel:1");
    record.set_id(Some(Vec::new()));
    assert_eq!(record.to_bytes(), Err(NdefError::IdLength(0)));

    // IL set with an id length of 0 decodes as "no id"
    let data = bytes("D9 01 02 00 55 05 31");
    let decoded = Record::from_bytes(&data).unwrap();
    assert_eq!(decoded.id(), None);
}

#[test]
fn empty_tnf_with_content_rejected() {
    assert!(matches!(
        Record::from_bytes(&bytes("D0 01 00 41")),
        Err(NdefError::TypeMustBeEmpty { tnf: 0, length: 1 })
    ));
    assert!(matches!(
        Record::from_bytes(&bytes("D0 00 01 AA")),
        Err(NdefError::EmptyRecordNotEmpty { .. })
    ));
    assert!(matches!(
        Record::from_bytes(&bytes("D8 00 00 01 AA")),
        Err(NdefError::EmptyRecordNotEmpty { .. })
    ));
}

#[test]
fn unknown_and_unchanged_carry_no_type() {
    let data = bytes("D5 00 02 AB CD");
    let record = Record::from_bytes(&data).unwrap();
    assert_eq!(record.tnf(), Ok(TypeNameFormat::Unknown));
    assert_eq!(record.record_type(), "unknown");
    assert_eq!(record.payload().unwrap(), vec![0xAB, 0xCD]);
    assert_eq!(record.to_bytes().unwrap(), data);

    assert!(matches!(
        Record::from_bytes(&bytes("D6 01 00 41")),
        Err(NdefError::TypeMustBeEmpty { tnf: 6, .. })
    ));
}

#[test]
fn typed_tnf_without_type_rejected() {
    for header in ["D1", "D2", "D3", "D4"] {
        let data = bytes(&format!("{} 00 00", header));
        assert!(matches!(
            Record::from_bytes(&data),
            Err(NdefError::TypeRequired { .. })
        ));
    }
}

#[test]
fn external_type_is_qualified() {
    let data = bytes("D4 0F 01 616E64726F69642E636F6D3A706B67 78");
    let record = Record::from_bytes(&data).unwrap();
    assert!(matches!(record.kind(), RecordKind::Generic(_)));
    assert_eq!(record.record_type(), "urn:nfc:ext:android.com:pkg");
}

#[test]
fn absolute_uri_record() {
    let uri = "http://example.com/a";
    let mut data = vec![0xD3, uri.len() as u8, 0x00];
    data.extend_from_slice(uri.as_bytes());
    let record = Record::from_bytes(&data).unwrap();
    assert!(matches!(record.kind(), RecordKind::AbsoluteUri(_)));
    assert_eq!(record.record_type(), uri);
    assert_eq!(record.to_bytes().unwrap(), data);
}

#[test]
fn registered_kinds_round_trip() {
    let mut info = DeviceInfoRecord::default();
    info.push(device_info::MANUFACTURER, b"Acme".to_vec());
    info.push(device_info::MODEL, b"T-1".to_vec());

    let kinds = vec![
        RecordKind::Text(TextRecord::new("fr", "bonjour")),
        RecordKind::DeviceInfo(info),
        RecordKind::HandoverSelect(HandoverRecord {
            major_version: 1,
            minor_version: 3,
            embedded: vec![0xD1, 0x02, 0x00, b'a', b'c'],
        }),
        RecordKind::BluetoothEasyPairing(BluetoothEasyPairingRecord::new(
            [0x01, 0x02, 0x03, 0x04, 0x05, 0x06],
            vec![0x05, 0x09, b'p', b'h', b'o', b'n'],
        )),
        RecordKind::Text(TextRecord::utf16("ja", "こんにちは")),
    ];

    for kind in kinds {
        let record = Record::from_kind(kind);
        let decoded = Record::from_bytes(&record.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.kind(), record.kind());
        assert_eq!(decoded, record);
    }
}

#[test]
fn uri_without_abbreviation_is_kept() {
    let mut payload = vec![0x00];
    payload.extend_from_slice(b"http://www.a.com");
    let record = Record::with_type(TypeNameFormat::WellKnown, "U", &payload);

    let decoded = Record::from_bytes(&record.to_bytes().unwrap()).unwrap();
    match decoded.kind() {
        RecordKind::Uri(uri) => {
            assert_eq!(uri.identifier_code, 0x00);
            assert_eq!(uri.uri(), "http://www.a.com");
        }
        other => panic!("expected uri, got {:?}", other),
    }
    assert_eq!(decoded.payload().unwrap(), payload);
    assert_eq!(decoded, record);
}

#[test]
fn uri_reserved_identifier_code() {
    let data = bytes("D1 01 02 55 24 78");
    let record = Record::from_bytes(&data).unwrap();
    match record.kind() {
        RecordKind::Uri(uri) => assert_eq!(uri.uri(), "x"),
        other => panic!("expected uri, got {:?}", other),
    }
    assert_eq!(record.to_bytes().unwrap(), data);
}

#[test]
fn utf16_text_keeps_byte_order_mark() {
    let data = bytes("D1 01 09 54 82 65 6E FF FE 4F 00 4B 00");
    let record = Record::from_bytes(&data).unwrap();
    match record.kind() {
        RecordKind::Text(text) => {
            assert_eq!(text.text, "OK");
            assert_eq!(text.byte_order, ByteOrder::LittleEndian);
        }
        other => panic!("expected text, got {:?}", other),
    }
    assert_eq!(record.to_bytes().unwrap(), data);
}

#[test]
fn kind_payload_errors_surface_from_decode() {
    // Text record whose language length runs past the payload
    let data = bytes("D1 01 02 54 09 65");
    assert!(matches!(
        Record::from_bytes(&data),
        Err(NdefError::InvalidPayload { kind: "text", .. })
    ));
}

#[test]
fn bluetooth_payload_below_minimum() {
    let ty = b"application/vnd.bluetooth.ep.oob";
    let mut data = vec![0xD2, ty.len() as u8, 0x02];
    data.extend_from_slice(ty);
    data.extend_from_slice(&[0x02, 0x00]);
    assert!(matches!(
        Record::from_bytes(&data),
        Err(NdefError::PayloadLength {
            kind: "bluetooth-ep",
            min: 8,
            ..
        })
    ));
}

#[test]
fn resolver_can_remap_types() {
    // Treat well-known "X" as text
    let resolver = |tnf: TypeNameFormat, record_type: &str| {
        if tnf == TypeNameFormat::WellKnown && record_type == "X" {
            let mut record = Record::text("en", "");
            record.set_decoded_type("X");
            record
        } else {
            default_resolver(tnf, record_type)
        }
    };

    let data = bytes("D1 01 04 58 02 65 6E 21");
    let record = decode_record_with(&mut SliceCursor::new(&data), resolver).unwrap();
    match record.kind() {
        RecordKind::Text(text) => assert_eq!(text.text, "!"),
        other => panic!("expected text, got {:?}", other),
    }

    let record = decode_record(&mut SliceCursor::new(&data)).unwrap();
    assert!(matches!(record.kind(), RecordKind::WellKnown(_)));
}

#[test]
fn consecutive_records_from_one_cursor() {
    let mut data = Record::text("en", "a").to_bytes().unwrap();
    data.extend(Record::uri("https://b.example").to_bytes().unwrap());

    let mut cursor = SliceCursor::new(&data);
    let first = decode_record(&mut cursor).unwrap();
    let second = decode_record(&mut cursor).unwrap();
    assert!(matches!(first.kind(), RecordKind::Text(_)));
    assert!(matches!(second.kind(), RecordKind::Uri(_)));
    assert_eq!(cursor.remaining(), 0);
}
