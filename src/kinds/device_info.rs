// src/kinds/device_info.rs
use super::PayloadCodec;
use crate::error::{NdefError, Result};

const KIND: &str = "device-info";

pub const MANUFACTURER: u8 = 0x00;
pub const MODEL: u8 = 0x01;
pub const DEVICE_NAME: u8 = 0x02;
pub const UUID: u8 = 0x03;
pub const FIRMWARE_VERSION: u8 = 0x04;
pub const VENDOR_SPECIFIC: u8 = 0xFF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfoEntry {
    pub info_type: u8,
    pub value: Vec<u8>,
}

/// Well-known `Di` record: a flat list of type/length/value entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfoRecord {
    pub entries: Vec<DeviceInfoEntry>,
}

impl DeviceInfoRecord {
    pub fn get(&self, info_type: u8) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.info_type == info_type)
            .map(|e| e.value.as_slice())
    }

    pub fn push(&mut self, info_type: u8, value: impl Into<Vec<u8>>) {
        self.entries.push(DeviceInfoEntry {
            info_type,
            value: value.into(),
        });
    }
}

impl PayloadCodec for DeviceInfoRecord {
    fn to_payload(&self) -> Result<Vec<u8>> {
        let mut payload = Vec::new();
        for entry in &self.entries {
            let len = u8::try_from(entry.value.len()).map_err(|_| {
                NdefError::invalid_payload(
                    KIND,
                    format!("entry {:#04x} value exceeds 255 bytes", entry.info_type),
                )
            })?;
            payload.push(entry.info_type);
            payload.push(len);
            payload.extend_from_slice(&entry.value);
        }
        Ok(payload)
    }

    fn from_payload(payload: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut rest = payload;
        while !rest.is_empty() {
            let [info_type, len, tail @ ..] = rest else {
                return Err(NdefError::invalid_payload(KIND, "truncated entry header"));
            };
            let len = *len as usize;
            if len > tail.len() {
                return Err(NdefError::invalid_payload(
                    KIND,
                    format!("entry {:#04x} claims {} bytes", info_type, len),
                ));
            }
            entries.push(DeviceInfoEntry {
                info_type: *info_type,
                value: tail[..len].to_vec(),
            });
            rest = &tail[len..];
        }
        Ok(DeviceInfoRecord { entries })
    }
}
