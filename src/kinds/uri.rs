// src/kinds/uri.rs
use std::str;

use super::PayloadCodec;
use crate::error::{NdefError, Result};

const KIND: &str = "uri";

// NFC Forum URI identifier codes, indexed by code. 0x00 means "no prefix";
// 0x24 and up are reserved.
const ABBREVIATIONS: [&str; 36] = [
    "",
    "http://www.",
    "https://www.",
    "http://",
    "https://",
    "tel:",
    "mailto:",
    "ftp://anonymous:anonymous@",
    "ftp://ftp.",
    "ftps://",
    "sftp://",
    "smb://",
    "nfs://",
    "ftp://",
    "dav://",
    "news:",
    "telnet://",
    "imap:",
    "rtsp://",
    "urn:",
    "pop:",
    "sip:",
    "sips:",
    "tftp:",
    "btspp://",
    "btl2cap://",
    "btgoep://",
    "tcpobex://",
    "irdaobex://",
    "file://",
    "urn:epc:id:",
    "urn:epc:tag:",
    "urn:epc:pat:",
    "urn:epc:raw:",
    "urn:epc:",
    "urn:nfc:",
];

/// Well-known `U` record, kept in its wire form: the identifier code and
/// the rest of the URI after the abbreviated prefix.
///
/// Codes past the end of the abbreviation table are reserved and read as
/// "no prefix"; the code itself is kept so it is written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriRecord {
    pub identifier_code: u8,
    pub field: String,
}

impl UriRecord {
    /// Abbreviate `uri` with the longest matching prefix, so "https://www."
    /// beats "https://".
    pub fn new(uri: &str) -> Self {
        let (code, prefix) = ABBREVIATIONS
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, prefix)| uri.starts_with(*prefix))
            .max_by_key(|(_, prefix)| prefix.len())
            .map_or((0, ""), |(code, prefix)| (code as u8, *prefix));
        UriRecord {
            identifier_code: code,
            field: uri[prefix.len()..].to_string(),
        }
    }

    pub fn prefix(&self) -> &'static str {
        ABBREVIATIONS
            .get(self.identifier_code as usize)
            .copied()
            .unwrap_or("")
    }

    pub fn is_reserved_code(&self) -> bool {
        self.identifier_code as usize >= ABBREVIATIONS.len()
    }

    /// The full URI with its prefix expanded.
    pub fn uri(&self) -> String {
        format!("{}{}", self.prefix(), self.field)
    }
}

impl PayloadCodec for UriRecord {
    fn to_payload(&self) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(1 + self.field.len());
        payload.push(self.identifier_code);
        payload.extend_from_slice(self.field.as_bytes());
        Ok(payload)
    }

    fn from_payload(payload: &[u8]) -> Result<Self> {
        let (&identifier_code, rest) = payload
            .split_first()
            .ok_or_else(|| NdefError::invalid_payload(KIND, "missing identifier code"))?;
        let field = str::from_utf8(rest)
            .map_err(|_| NdefError::invalid_payload(KIND, "URI field is not UTF-8"))?;

        Ok(UriRecord {
            identifier_code,
            field: field.to_string(),
        })
    }
}
