// src/flags.rs
use serde::Serialize;

use crate::error::{NdefError, Result};

// Bit 7: MB, Bit 6: ME, Bit 5: CF, Bit 4: SR, Bit 3: IL, Bits 2-0: TNF
const MB: u8 = 0x80;
const ME: u8 = 0x40;
const CF: u8 = 0x20;
const SR: u8 = 0x10;
const IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// The first byte of every NDEF record, unpacked.
///
/// `tnf` is kept as a raw code so that a misconfigured value can be caught
/// when the byte is packed again (see [`HeaderFlags::encode`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct HeaderFlags {
    pub message_begin: bool,
    pub message_end: bool,
    pub chunk: bool,
    pub short_record: bool,
    pub id_length_present: bool,
    pub tnf: u8,
}

impl HeaderFlags {
    /// Unpack a header byte. Every byte value is a valid header.
    pub fn decode(byte: u8) -> Self {
        HeaderFlags {
            message_begin: byte & MB != 0,
            message_end: byte & ME != 0,
            chunk: byte & CF != 0,
            short_record: byte & SR != 0,
            id_length_present: byte & IL != 0,
            tnf: byte & TNF_MASK,
        }
    }

    /// Pack the flags back into one byte. Fails when `tnf` does not fit in
    /// three bits.
    pub fn encode(&self) -> Result<u8> {
        if self.tnf > TNF_MASK {
            return Err(NdefError::TnfOutOfRange(self.tnf));
        }

        let mut header = self.tnf;
        if self.message_begin {
            header |= MB;
        }
        if self.message_end {
            header |= ME;
        }
        if self.chunk {
            header |= CF;
        }
        if self.short_record {
            header |= SR;
        }
        if self.id_length_present {
            header |= IL;
        }
        Ok(header)
    }
}

impl TryFrom<u32> for HeaderFlags {
    type Error = NdefError;

    /// Decode from a wider integer, e.g. a value read from a CLI or a
    /// foreign buffer API.
    fn try_from(value: u32) -> Result<Self> {
        let byte = u8::try_from(value).map_err(|_| NdefError::HeaderByteOutOfRange(value))?;
        Ok(HeaderFlags::decode(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_text_record_header() {
        let flags = HeaderFlags::decode(0xD1);
        assert!(flags.message_begin);
        assert!(flags.message_end);
        assert!(!flags.chunk);
        assert!(flags.short_record);
        assert!(!flags.id_length_present);
        assert_eq!(flags.tnf, 1);
    }

    #[test]
    fn every_byte_round_trips() {
        for b in 0..=u8::MAX {
            assert_eq!(HeaderFlags::decode(b).encode(), Ok(b));
        }
    }

    #[test]
    fn bit_order_is_fixed() {
        let single = |f: fn(&mut HeaderFlags)| {
            let mut flags = HeaderFlags::default();
            f(&mut flags);
            flags.encode().unwrap()
        };
        assert_eq!(single(|f| f.message_begin = true), 0x80);
        assert_eq!(single(|f| f.message_end = true), 0x40);
        assert_eq!(single(|f| f.chunk = true), 0x20);
        assert_eq!(single(|f| f.short_record = true), 0x10);
        assert_eq!(single(|f| f.id_length_present = true), 0x08);
        assert_eq!(single(|f| f.tnf = 7), 0x07);
    }

    #[test]
    fn rejects_wide_tnf() {
        let flags = HeaderFlags {
            tnf: 8,
            ..HeaderFlags::default()
        };
        assert_eq!(flags.encode(), Err(NdefError::TnfOutOfRange(8)));
    }

    #[test]
    fn rejects_wide_header_value() {
        assert_eq!(
            HeaderFlags::try_from(256u32),
            Err(NdefError::HeaderByteOutOfRange(256))
        );
        assert_eq!(HeaderFlags::try_from(0xD1u32), Ok(HeaderFlags::decode(0xD1)));
    }
}
