// src/kinds/bluetooth.rs
//! Bluetooth out-of-band pairing payloads carried as media records.

use super::PayloadCodec;
use crate::error::{NdefError, Result};

pub const EASY_PAIRING_TYPE: &str = "application/vnd.bluetooth.ep.oob";
pub const LOW_ENERGY_TYPE: &str = "application/vnd.bluetooth.le.oob";

// OOB length (2) + device address (6)
pub(crate) const EASY_PAIRING_MIN_LEN: usize = 8;

/// BR/EDR easy pairing OOB block.
///
/// `address` is stored most significant byte first, the order people write
/// it in; the wire carries it reversed. `declared_length` holds the OOB
/// length from the tag only when it disagrees with the payload size; `None`
/// writes the real size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BluetoothEasyPairingRecord {
    pub address: [u8; 6],
    pub eir: Vec<u8>,
    pub declared_length: Option<u16>,
}

impl BluetoothEasyPairingRecord {
    pub fn new(address: [u8; 6], eir: impl Into<Vec<u8>>) -> Self {
        BluetoothEasyPairingRecord {
            address,
            eir: eir.into(),
            declared_length: None,
        }
    }
}

impl PayloadCodec for BluetoothEasyPairingRecord {
    fn to_payload(&self) -> Result<Vec<u8>> {
        let total = EASY_PAIRING_MIN_LEN + self.eir.len();
        let oob_len = match self.declared_length {
            Some(declared) => declared,
            None => u16::try_from(total).map_err(|_| {
                NdefError::invalid_payload("bluetooth-ep", format!("OOB block of {} bytes", total))
            })?,
        };

        let mut payload = Vec::with_capacity(total);
        payload.extend_from_slice(&oob_len.to_le_bytes());
        payload.extend(self.address.iter().rev());
        payload.extend_from_slice(&self.eir);
        Ok(payload)
    }

    fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() < EASY_PAIRING_MIN_LEN {
            return Err(NdefError::invalid_payload(
                "bluetooth-ep",
                format!("{} bytes, need at least {}", payload.len(), EASY_PAIRING_MIN_LEN),
            ));
        }
        // Tags in the wild get the OOB length wrong; keep it rather than reject.
        let declared = u16::from_le_bytes([payload[0], payload[1]]);
        let declared_length = (usize::from(declared) != payload.len()).then_some(declared);

        let mut address = [0u8; 6];
        for (dst, src) in address.iter_mut().zip(payload[2..8].iter().rev()) {
            *dst = *src;
        }
        Ok(BluetoothEasyPairingRecord {
            address,
            eir: payload[EASY_PAIRING_MIN_LEN..].to_vec(),
            declared_length,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdStructure {
    pub ad_type: u8,
    pub data: Vec<u8>,
}

/// LE OOB block: a sequence of advertising data structures.
///
/// A zero length byte ends the structures; it and everything after it is
/// kept in `trailer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BluetoothLowEnergyRecord {
    pub structures: Vec<AdStructure>,
    pub trailer: Vec<u8>,
}

impl PayloadCodec for BluetoothLowEnergyRecord {
    fn to_payload(&self) -> Result<Vec<u8>> {
        let mut payload = Vec::new();
        for ad in &self.structures {
            let len = u8::try_from(ad.data.len() + 1).map_err(|_| {
                NdefError::invalid_payload(
                    "bluetooth-le",
                    format!("AD type {:#04x} data exceeds 254 bytes", ad.ad_type),
                )
            })?;
            payload.push(len);
            payload.push(ad.ad_type);
            payload.extend_from_slice(&ad.data);
        }
        payload.extend_from_slice(&self.trailer);
        Ok(payload)
    }

    fn from_payload(payload: &[u8]) -> Result<Self> {
        let mut structures = Vec::new();
        let mut rest = payload;
        while let Some((&len, tail)) = rest.split_first() {
            if len == 0 {
                break;
            }
            let len = len as usize;
            if len > tail.len() {
                return Err(NdefError::invalid_payload(
                    "bluetooth-le",
                    format!("AD structure claims {} bytes, {} left", len, tail.len()),
                ));
            }
            structures.push(AdStructure {
                ad_type: tail[0],
                data: tail[1..len].to_vec(),
            });
            rest = &tail[len..];
        }
        Ok(BluetoothLowEnergyRecord {
            structures,
            trailer: rest.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easy_pairing_address_is_reversed_on_wire() {
        let record =
            BluetoothEasyPairingRecord::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55], [0x02, 0x0A, 0x04]);
        let payload = record.to_payload().unwrap();
        assert_eq!(
            payload,
            vec![0x0B, 0x00, 0x55, 0x44, 0x33, 0x22, 0x11, 0x00, 0x02, 0x0A, 0x04]
        );
        assert_eq!(BluetoothEasyPairingRecord::from_payload(&payload).unwrap(), record);
    }

    #[test]
    fn easy_pairing_keeps_wrong_oob_length() {
        let payload = [0x20, 0x00, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01];
        let record = BluetoothEasyPairingRecord::from_payload(&payload).unwrap();
        assert_eq!(record.declared_length, Some(0x20));
        assert_eq!(record.address, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(record.to_payload().unwrap(), payload.to_vec());
    }

    #[test]
    fn easy_pairing_too_short() {
        assert!(BluetoothEasyPairingRecord::from_payload(&[0x08, 0x00, 0x01]).is_err());
    }

    #[test]
    fn low_energy_structures() {
        let payload = [0x02, 0x1C, 0x00, 0x03, 0x19, 0xC1, 0x03, 0x00, 0x00];
        let record = BluetoothLowEnergyRecord::from_payload(&payload).unwrap();
        assert_eq!(record.structures.len(), 2);
        assert_eq!(record.structures[0].ad_type, 0x1C);
        assert_eq!(record.structures[1].data, vec![0xC1, 0x03]);
        assert_eq!(record.trailer, vec![0x00, 0x00]);
        assert_eq!(record.to_payload().unwrap(), payload.to_vec());
    }

    #[test]
    fn low_energy_truncated() {
        assert!(BluetoothLowEnergyRecord::from_payload(&[0x05, 0x1C, 0x00]).is_err());
    }
}
