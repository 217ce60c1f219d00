// src/kinds/text.rs
use std::str;

use super::PayloadCodec;
use crate::error::{NdefError, Result};

const KIND: &str = "text";

// Status byte: bit 7 = UTF-16, bit 6 reserved, bits 5-0 = language code length
const UTF16_BIT: u8 = 0x80;
const RESERVED_BIT: u8 = 0x40;
const LANG_LEN_MASK: u8 = 0x3F;

const BOM_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_LE: [u8; 2] = [0xFF, 0xFE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

/// Well-known `T` record: language-tagged text.
///
/// For UTF-16 text, `byte_order` and `bom` record how the text sits on the
/// wire so a parsed payload is written back unchanged. Both are ignored for
/// UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    pub encoding: TextEncoding,
    pub byte_order: ByteOrder,
    pub bom: bool,
    pub language: String,
    pub text: String,
}

impl TextRecord {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        TextRecord {
            encoding: TextEncoding::Utf8,
            byte_order: ByteOrder::BigEndian,
            bom: false,
            language: language.into(),
            text: text.into(),
        }
    }

    /// UTF-16 text, big-endian without a byte order mark.
    pub fn utf16(language: impl Into<String>, text: impl Into<String>) -> Self {
        TextRecord {
            encoding: TextEncoding::Utf16,
            ..TextRecord::new(language, text)
        }
    }
}

impl Default for TextRecord {
    fn default() -> Self {
        TextRecord::new("en", "")
    }
}

impl PayloadCodec for TextRecord {
    fn to_payload(&self) -> Result<Vec<u8>> {
        let lang = self.language.as_bytes();
        if lang.len() > LANG_LEN_MASK as usize {
            return Err(NdefError::invalid_payload(
                KIND,
                format!("language code is {} bytes, at most 63 fit", lang.len()),
            ));
        }

        let mut status = lang.len() as u8;
        if self.encoding == TextEncoding::Utf16 {
            status |= UTF16_BIT;
        }

        let mut payload = Vec::with_capacity(3 + lang.len() + 2 * self.text.len());
        payload.push(status);
        payload.extend_from_slice(lang);
        match self.encoding {
            TextEncoding::Utf8 => payload.extend_from_slice(self.text.as_bytes()),
            TextEncoding::Utf16 => {
                let little_endian = self.byte_order == ByteOrder::LittleEndian;
                if self.bom {
                    payload.extend_from_slice(if little_endian { &BOM_LE } else { &BOM_BE });
                }
                for unit in self.text.encode_utf16() {
                    let pair = if little_endian {
                        unit.to_le_bytes()
                    } else {
                        unit.to_be_bytes()
                    };
                    payload.extend_from_slice(&pair);
                }
            }
        }
        Ok(payload)
    }

    fn from_payload(payload: &[u8]) -> Result<Self> {
        let (&status, rest) = payload
            .split_first()
            .ok_or_else(|| NdefError::invalid_payload(KIND, "missing status byte"))?;
        if status & RESERVED_BIT != 0 {
            return Err(NdefError::invalid_payload(KIND, "reserved status bit is set"));
        }

        let lang_len = (status & LANG_LEN_MASK) as usize;
        if lang_len > rest.len() {
            return Err(NdefError::invalid_payload(
                KIND,
                format!("language length {} exceeds payload", lang_len),
            ));
        }
        let (lang, body) = rest.split_at(lang_len);

        let language = str::from_utf8(lang)
            .map_err(|_| NdefError::invalid_payload(KIND, "language code is not UTF-8"))?
            .to_string();

        if status & UTF16_BIT == 0 {
            let text = str::from_utf8(body)
                .map_err(|_| NdefError::invalid_payload(KIND, "text is not UTF-8"))?;
            return Ok(TextRecord::new(language, text));
        }

        let (byte_order, bom, body) = match body {
            [0xFF, 0xFE, tail @ ..] => (ByteOrder::LittleEndian, true, tail),
            [0xFE, 0xFF, tail @ ..] => (ByteOrder::BigEndian, true, tail),
            _ => (ByteOrder::BigEndian, false, body),
        };
        Ok(TextRecord {
            encoding: TextEncoding::Utf16,
            byte_order,
            bom,
            language,
            text: decode_utf16(body, byte_order)?,
        })
    }
}

fn decode_utf16(bytes: &[u8], byte_order: ByteOrder) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(NdefError::invalid_payload(KIND, "odd number of UTF-16 bytes"));
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            let pair = [pair[0], pair[1]];
            match byte_order {
                ByteOrder::BigEndian => u16::from_be_bytes(pair),
                ByteOrder::LittleEndian => u16::from_le_bytes(pair),
            }
        })
        .collect();

    String::from_utf16(&units).map_err(|_| NdefError::invalid_payload(KIND, "invalid UTF-16"))
}
