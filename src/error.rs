// src/error.rs
use thiserror::Error;

/// Everything that can go wrong while packing or unpacking a record.
///
/// Decode errors leave the cursor wherever the failing read stopped; callers
/// must not resume decoding from that position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NdefError {
    #[error("header byte out of range: {0} (expected 0..=255)")]
    HeaderByteOutOfRange(u32),

    #[error("type name format code out of range: {0} (expected 0..=7)")]
    TnfOutOfRange(u8),

    #[error("type name format code {0} is reserved")]
    ReservedTnf(u8),

    #[error("type length must be 0 for type name format {tnf}, got {length}")]
    TypeMustBeEmpty { tnf: u8, length: usize },

    #[error("empty record must not carry id or payload (id {id_length}, payload {payload_length})")]
    EmptyRecordNotEmpty {
        id_length: usize,
        payload_length: usize,
    },

    #[error("type name format {tnf} requires a non-empty type")]
    TypeRequired { tnf: u8 },

    #[error("payload length {length} outside {min}..={} for {kind}", bound(.max))]
    PayloadLength {
        kind: &'static str,
        length: usize,
        min: usize,
        max: Option<usize>,
    },

    #[error("type length {0} outside 1..=255")]
    TypeLength(usize),

    #[error("id length {0} outside 1..=255")]
    IdLength(usize),

    #[error("{kind} has fixed type name format {fixed}, cannot construct as {requested}")]
    TnfConflict {
        kind: &'static str,
        fixed: u8,
        requested: u8,
    },

    #[error("cannot read a {0} byte integer (at most 8)")]
    IntegerWidth(usize),

    #[error("unexpected end of input: needed {needed} bytes, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    #[error("invalid {kind} payload: {reason}")]
    InvalidPayload { kind: &'static str, reason: String },

    #[error("invalid hex string: {0}")]
    InvalidHex(String),
}

impl NdefError {
    pub(crate) fn invalid_payload(kind: &'static str, reason: impl Into<String>) -> Self {
        NdefError::InvalidPayload {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<hex::FromHexError> for NdefError {
    fn from(err: hex::FromHexError) -> Self {
        NdefError::InvalidHex(err.to_string())
    }
}

fn bound(max: &Option<usize>) -> String {
    max.map_or_else(|| "unbounded".to_string(), |m| m.to_string())
}

pub type Result<T> = std::result::Result<T, NdefError>;
