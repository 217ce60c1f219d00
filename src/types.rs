// src/types.rs
use std::fmt;

use serde::Serialize;

use crate::error::{NdefError, Result};

/// Type Name Format: the 3-bit field telling a reader how to interpret the
/// record's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum TypeNameFormat {
    Empty = 0x00,
    WellKnown = 0x01,
    Media = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    Unchanged = 0x06,
}

// Indexed by TNF code.
const PREFIXES: [&str; 7] = [
    "",
    "urn:nfc:wkt:",
    "",
    "",
    "urn:nfc:ext:",
    "unknown",
    "unchanged",
];

impl TypeNameFormat {
    pub const ALL: [TypeNameFormat; 7] = [
        TypeNameFormat::Empty,
        TypeNameFormat::WellKnown,
        TypeNameFormat::Media,
        TypeNameFormat::AbsoluteUri,
        TypeNameFormat::External,
        TypeNameFormat::Unknown,
        TypeNameFormat::Unchanged,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Resolve a 3-bit code. Code 7 is reserved by NDEF and anything wider
    /// cannot come from a header byte.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0..=6 => Ok(Self::ALL[code as usize]),
            7 => Err(NdefError::ReservedTnf(code)),
            _ => Err(NdefError::TnfOutOfRange(code)),
        }
    }

    /// Prefix used to build a globally qualified record type.
    pub fn prefix(self) -> &'static str {
        PREFIXES[self as usize]
    }

    /// Empty, Unknown and Unchanged records never carry a type field.
    pub fn forbids_type(self) -> bool {
        matches!(
            self,
            TypeNameFormat::Empty | TypeNameFormat::Unknown | TypeNameFormat::Unchanged
        )
    }

    pub fn requires_type(self) -> bool {
        !self.forbids_type()
    }
}

impl fmt::Display for TypeNameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeNameFormat::Empty => "empty",
            TypeNameFormat::WellKnown => "nfc-well-known",
            TypeNameFormat::Media => "media",
            TypeNameFormat::AbsoluteUri => "absolute-uri",
            TypeNameFormat::External => "nfc-external",
            TypeNameFormat::Unknown => "unknown",
            TypeNameFormat::Unchanged => "unchanged",
        };
        f.write_str(name)
    }
}
