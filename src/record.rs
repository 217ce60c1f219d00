// src/record.rs
use log::debug;
use serde::Serialize;

use crate::error::{NdefError, Result};
use crate::flags::HeaderFlags;
use crate::kinds::{RecordKind, TextRecord, UriRecord};
use crate::types::TypeNameFormat;

/// Shown by [`Record::id_string`] when the record has no id.
pub const EMPTY_ID: &str = "(empty)";

/// One NDEF record: header flags, type, optional id and a kind that owns the
/// payload.
///
/// The type name format lives in `flags.tnf`; there is no second copy.
#[derive(Debug, Clone)]
pub struct Record {
    flags: HeaderFlags,
    type_: Vec<u8>,
    id: Option<Vec<u8>>,
    kind: RecordKind,
}

impl Record {
    /// Build a record of the given kind.
    ///
    /// `tnf` may be omitted. Kinds with a fixed type name format reject an
    /// explicit one that differs; kinds without one fall back to `Empty`.
    pub fn new(kind: RecordKind, tnf: Option<TypeNameFormat>) -> Result<Self> {
        let spec = kind.spec();
        let tnf = match (spec.tnf, tnf) {
            (Some(fixed), Some(requested)) if fixed != requested => {
                return Err(NdefError::TnfConflict {
                    kind: spec.name,
                    fixed: fixed.code(),
                    requested: requested.code(),
                });
            }
            (Some(fixed), _) => fixed,
            (None, Some(requested)) => requested,
            (None, None) => TypeNameFormat::Empty,
        };

        Ok(Record::build(kind, tnf))
    }

    /// Build a record using the kind's own type name format.
    pub fn from_kind(kind: RecordKind) -> Self {
        let tnf = kind.spec().tnf.unwrap_or(TypeNameFormat::Empty);
        Record::build(kind, tnf)
    }

    fn build(kind: RecordKind, tnf: TypeNameFormat) -> Self {
        let type_ = if tnf.forbids_type() {
            Vec::new()
        } else {
            kind.spec().record_type.as_bytes().to_vec()
        };
        Record {
            flags: HeaderFlags {
                message_begin: true,
                message_end: true,
                tnf: tnf.code(),
                ..HeaderFlags::default()
            },
            type_,
            id: None,
            kind,
        }
    }

    /// Base record of any type name format with an empty payload.
    pub fn generic(tnf: TypeNameFormat) -> Self {
        Record::build(RecordKind::Generic(Vec::new()), tnf)
    }

    /// Base record with explicit type and payload.
    pub fn with_type(tnf: TypeNameFormat, type_: impl Into<Vec<u8>>, payload: &[u8]) -> Self {
        let mut record = Record::generic(tnf);
        record.set_type_bytes(type_);
        record.kind = RecordKind::Generic(payload.to_vec());
        record
    }

    /// The empty record (TNF 0): no type, no id, no payload.
    pub fn empty() -> Self {
        Record::generic(TypeNameFormat::Empty)
    }

    pub fn text(language: &str, text: &str) -> Self {
        Record::from_kind(RecordKind::Text(TextRecord::new(language, text)))
    }

    pub fn uri(uri: &str) -> Self {
        Record::from_kind(RecordKind::Uri(UriRecord::new(uri)))
    }

    pub fn flags(&self) -> HeaderFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut HeaderFlags {
        &mut self.flags
    }

    pub(crate) fn replace_flags(&mut self, flags: HeaderFlags) {
        self.flags = flags;
    }

    pub fn tnf(&self) -> Result<TypeNameFormat> {
        TypeNameFormat::from_code(self.flags.tnf)
    }

    /// Change the type name format; kinds with a fixed one refuse anything else.
    pub fn set_tnf(&mut self, tnf: TypeNameFormat) -> Result<()> {
        let spec = self.kind.spec();
        if let Some(fixed) = spec.tnf.filter(|fixed| *fixed != tnf) {
            return Err(NdefError::TnfConflict {
                kind: spec.name,
                fixed: fixed.code(),
                requested: tnf.code(),
            });
        }
        self.flags.tnf = tnf.code();
        if tnf.forbids_type() {
            self.type_.clear();
        }
        Ok(())
    }

    pub fn kind(&self) -> &RecordKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut RecordKind {
        &mut self.kind
    }

    pub fn min_payload_length(&self) -> usize {
        self.kind.spec().min_payload_length
    }

    pub fn max_payload_length(&self) -> Option<usize> {
        self.kind.spec().max_payload_length
    }

    pub fn type_bytes(&self) -> &[u8] {
        &self.type_
    }

    /// Set the raw type. Empty, Unknown and Unchanged records keep an empty
    /// type whatever is passed in.
    pub fn set_type_bytes(&mut self, type_: impl Into<Vec<u8>>) {
        let type_ = type_.into();
        let forced = TypeNameFormat::from_code(self.flags.tnf)
            .map(TypeNameFormat::forbids_type)
            .unwrap_or(false);
        if forced && !type_.is_empty() {
            debug!("dropping type for tnf {}", self.flags.tnf);
            self.type_.clear();
        } else {
            self.type_ = type_;
        }
    }

    /// Type as UTF-8 text; invalid sequences are replaced.
    pub fn decoded_type(&self) -> String {
        String::from_utf8_lossy(&self.type_).into_owned()
    }

    pub fn set_decoded_type(&mut self, type_: &str) {
        self.set_type_bytes(type_.as_bytes());
    }

    /// Globally qualified type: the TNF prefix followed by the decoded type.
    pub fn record_type(&self) -> String {
        let prefix = self.tnf().map(TypeNameFormat::prefix).unwrap_or("");
        format!("{}{}", prefix, self.decoded_type())
    }

    pub fn id(&self) -> Option<&[u8]> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<Vec<u8>>) {
        self.id = id;
    }

    /// Hex view of the id, or [`EMPTY_ID`] when there is none.
    pub fn id_string(&self) -> String {
        match &self.id {
            Some(id) => hex::encode(id),
            None => EMPTY_ID.to_string(),
        }
    }

    /// Set the id from hex. An empty string clears it.
    pub fn set_id_string(&mut self, id: &str) -> Result<()> {
        self.id = if id.is_empty() {
            None
        } else {
            Some(hex::decode(id)?)
        };
        Ok(())
    }

    pub fn payload(&self) -> Result<Vec<u8>> {
        self.kind.payload()
    }

    pub fn set_payload(&mut self, payload: &[u8]) -> Result<()> {
        self.kind.set_payload(payload)
    }

    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            kind: self.kind.name(),
            tnf: self.tnf().ok(),
            record_type: self.record_type(),
            id: self.id_string(),
            payload: self.payload().map(hex::encode).unwrap_or_default(),
            flags: self.flags,
        }
    }
}

/// Two records are equal when their type name format, type, id and payload
/// bytes match. The remaining header flags are framing and do not count.
///
/// When either payload cannot be built, the kinds are compared field by
/// field instead.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        let same_payload = match (self.payload(), other.payload()) {
            (Ok(a), Ok(b)) => a == b,
            _ => self.kind == other.kind,
        };
        self.flags.tnf == other.flags.tnf
            && self.type_ == other.type_
            && self.id == other.id
            && same_payload
    }
}

impl Eq for Record {}

/// Serializable snapshot of a record for display and logging.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSummary {
    pub kind: &'static str,
    pub tnf: Option<TypeNameFormat>,
    pub record_type: String,
    pub id: String,
    pub payload: String,
    pub flags: HeaderFlags,
}
