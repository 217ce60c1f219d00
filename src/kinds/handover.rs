// src/kinds/handover.rs
//! Connection handover (`Hr`, `Hs`, `Hm`, `Hi`) and signature (`Sig`)
//! records. Only the leading version byte is structured; the embedded
//! records are kept as raw bytes since message assembly is not handled here.

use super::PayloadCodec;
use crate::error::{NdefError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverRecord {
    pub major_version: u8,
    pub minor_version: u8,
    pub embedded: Vec<u8>,
}

impl Default for HandoverRecord {
    fn default() -> Self {
        HandoverRecord {
            major_version: 1,
            minor_version: 2,
            embedded: Vec::new(),
        }
    }
}

impl PayloadCodec for HandoverRecord {
    fn to_payload(&self) -> Result<Vec<u8>> {
        if self.major_version > 0x0F || self.minor_version > 0x0F {
            return Err(NdefError::invalid_payload(
                "handover",
                format!(
                    "version {}.{} does not fit in two nibbles",
                    self.major_version, self.minor_version
                ),
            ));
        }
        let mut payload = Vec::with_capacity(1 + self.embedded.len());
        payload.push((self.major_version << 4) | self.minor_version);
        payload.extend_from_slice(&self.embedded);
        Ok(payload)
    }

    fn from_payload(payload: &[u8]) -> Result<Self> {
        let (&version, rest) = payload
            .split_first()
            .ok_or_else(|| NdefError::invalid_payload("handover", "missing version byte"))?;
        Ok(HandoverRecord {
            major_version: version >> 4,
            minor_version: version & 0x0F,
            embedded: rest.to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureRecord {
    pub version: u8,
    pub data: Vec<u8>,
}

impl Default for SignatureRecord {
    fn default() -> Self {
        SignatureRecord {
            version: 0x20,
            data: Vec::new(),
        }
    }
}

impl PayloadCodec for SignatureRecord {
    fn to_payload(&self) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(1 + self.data.len());
        payload.push(self.version);
        payload.extend_from_slice(&self.data);
        Ok(payload)
    }

    fn from_payload(payload: &[u8]) -> Result<Self> {
        let (&version, rest) = payload
            .split_first()
            .ok_or_else(|| NdefError::invalid_payload("signature", "missing version byte"))?;
        Ok(SignatureRecord {
            version,
            data: rest.to_vec(),
        })
    }
}
