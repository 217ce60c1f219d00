// src/ndef.rs
use log::{debug, trace, warn};

use crate::cursor::{ByteCursor, SliceCursor};
use crate::error::{NdefError, Result};
use crate::flags::HeaderFlags;
use crate::record::Record;
use crate::resolver::default_resolver;
use crate::types::TypeNameFormat;

// Payloads shorter than this fit the 1-byte length field of a short record.
pub const SHORT_RECORD_LIMIT: usize = 256;
const MAX_FIELD_LEN: usize = 255;

/// Cross-field checks between the type name format and the three length
/// fields of a record header.
pub fn validate_structure(
    tnf: u8,
    type_length: usize,
    id_length: usize,
    payload_length: usize,
) -> Result<()> {
    if matches!(tnf, 0 | 5 | 6) && type_length != 0 {
        return Err(NdefError::TypeMustBeEmpty {
            tnf,
            length: type_length,
        });
    }
    if tnf == 0 && (id_length != 0 || payload_length != 0) {
        return Err(NdefError::EmptyRecordNotEmpty {
            id_length,
            payload_length,
        });
    }
    if matches!(tnf, 1..=4) && type_length == 0 {
        return Err(NdefError::TypeRequired { tnf });
    }
    Ok(())
}

/// Decode one record with the default kind registry.
pub fn decode_record<C: ByteCursor + ?Sized>(cursor: &mut C) -> Result<Record> {
    decode_record_with(cursor, default_resolver)
}

/// Decode one record, choosing its kind with `resolver`.
///
/// Consumes exactly the bytes of this record. On error the cursor is left
/// part-way through and must not be reused.
pub fn decode_record_with<C, R>(cursor: &mut C, resolver: R) -> Result<Record>
where
    C: ByteCursor + ?Sized,
    R: Fn(TypeNameFormat, &str) -> Record,
{
    // 1. Header
    let header = cursor.read_u8()?;
    let flags = HeaderFlags::decode(header);
    trace!("header {:#04x} -> {:?}", header, flags);

    // 2. Type length
    let type_length = cursor.read_u8()? as usize;

    // 3. Payload length (1 byte for short records, 4 otherwise)
    let payload_length = if flags.short_record {
        cursor.read_u8()? as usize
    } else {
        cursor.read_uint(4)? as usize
    };

    // 4. Id length (only when IL is set)
    let id_length = if flags.id_length_present {
        cursor.read_u8()? as usize
    } else {
        0
    };

    // 5. Structure
    validate_structure(flags.tnf, type_length, id_length, payload_length)?;

    // 6-8. Type, id, payload
    let type_ = cursor.read_bytes(type_length)?;
    let id = if id_length != 0 {
        Some(cursor.read_bytes(id_length)?)
    } else {
        None
    };
    let payload = cursor.read_bytes(payload_length)?;

    // 9. Kind
    let tnf = TypeNameFormat::from_code(flags.tnf)?;
    let decoded_type = String::from_utf8_lossy(&type_);
    let mut record = resolver(tnf, &decoded_type);

    // 10. Declared bounds of the resolved kind
    let (min, max) = (record.min_payload_length(), record.max_payload_length());
    if payload_length < min || max.is_some_and(|max| payload_length > max) {
        return Err(NdefError::PayloadLength {
            kind: record.kind().name(),
            length: payload_length,
            min,
            max,
        });
    }

    // 11. Fill in; the decoded flags replace the constructor's defaults
    record.set_id(id);
    record.replace_flags(flags);
    record.set_type_bytes(type_);
    record.set_payload(&payload)?;

    debug!(
        "decoded {} record {} ({} byte payload, id {})",
        record.kind().name(),
        record.record_type(),
        payload_length,
        record.id_string()
    );
    Ok(record)
}

/// Serialize a record into its wire layout.
///
/// The IL and SR flags are derived from the record's id and payload
/// length; the record itself is not modified. The reserved type name
/// format 7 is refused here as on decode, so everything written can be
/// read back.
pub fn encode_record(record: &Record) -> Result<Vec<u8>> {
    let payload = record.payload()?;
    let type_ = record.type_bytes();
    let id = record.id();

    let mut flags = record.flags();
    flags.id_length_present = id.is_some();
    let short = payload.len() < SHORT_RECORD_LIMIT;
    if flags.short_record && !short {
        warn!(
            "clearing short record flag for {} byte payload",
            payload.len()
        );
    }
    flags.short_record = short;
    let header = flags.encode()?;
    TypeNameFormat::from_code(flags.tnf)?;

    if type_.len() > MAX_FIELD_LEN {
        return Err(NdefError::TypeLength(type_.len()));
    }
    if let Some(id) = id {
        if id.is_empty() || id.len() > MAX_FIELD_LEN {
            return Err(NdefError::IdLength(id.len()));
        }
    }
    validate_structure(flags.tnf, type_.len(), id.map_or(0, <[u8]>::len), payload.len())?;

    let payload_length = u32::try_from(payload.len()).map_err(|_| NdefError::PayloadLength {
        kind: record.kind().name(),
        length: payload.len(),
        min: 0,
        max: Some(u32::MAX as usize),
    })?;

    let mut out = Vec::with_capacity(6 + type_.len() + id.map_or(0, <[u8]>::len) + payload.len());
    out.push(header);
    out.push(type_.len() as u8);
    if short {
        out.push(payload_length as u8);
    } else {
        out.extend_from_slice(&payload_length.to_le_bytes());
    }
    if let Some(id) = id {
        out.push(id.len() as u8);
    }
    out.extend_from_slice(type_);
    if let Some(id) = id {
        out.extend_from_slice(id);
    }
    out.extend_from_slice(&payload);

    debug!(
        "encoded {} record {} into {} bytes",
        record.kind().name(),
        record.record_type(),
        out.len()
    );
    Ok(out)
}

impl Record {
    /// Decode the record at the start of `data`. Trailing bytes are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Record> {
        decode_record(&mut SliceCursor::new(data))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_record(self)
    }
}
