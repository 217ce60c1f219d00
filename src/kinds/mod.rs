// src/kinds/mod.rs
//! The closed set of record kinds.
//!
//! Each kind declares a fixed type name format (or none), a canonical type
//! string and payload length bounds, and owns the conversion between the
//! raw payload and its structured fields.

pub mod bluetooth;
pub mod device_info;
pub mod handover;
pub mod text;
pub mod uri;

use crate::error::Result;
use crate::types::TypeNameFormat;

pub use bluetooth::{
    AdStructure, BluetoothEasyPairingRecord, BluetoothLowEnergyRecord, EASY_PAIRING_TYPE,
    LOW_ENERGY_TYPE,
};
pub use device_info::{DeviceInfoEntry, DeviceInfoRecord};
pub use handover::{HandoverRecord, SignatureRecord};
pub use text::{ByteOrder, TextEncoding, TextRecord};
pub use uri::UriRecord;

/// Conversion between a payload and a kind's structured fields.
///
/// Parsing is exact: whenever `from_payload(bytes)` succeeds,
/// `to_payload()` on the result gives back `bytes`. Payloads the fields
/// cannot reproduce are rejected.
pub trait PayloadCodec: Sized {
    fn to_payload(&self) -> Result<Vec<u8>>;

    fn from_payload(payload: &[u8]) -> Result<Self>;
}

/// What a kind declares about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec<'a> {
    pub name: &'static str,
    pub tnf: Option<TypeNameFormat>,
    pub record_type: &'a str,
    pub min_payload_length: usize,
    pub max_payload_length: Option<usize>,
}

impl KindSpec<'static> {
    const fn fixed(
        name: &'static str,
        tnf: Option<TypeNameFormat>,
        record_type: &'static str,
        min_payload_length: usize,
    ) -> Self {
        KindSpec {
            name,
            tnf,
            record_type,
            min_payload_length,
            max_payload_length: None,
        }
    }
}

const WKT: Option<TypeNameFormat> = Some(TypeNameFormat::WellKnown);
const MEDIA: Option<TypeNameFormat> = Some(TypeNameFormat::Media);

pub const GENERIC: KindSpec<'static> = KindSpec::fixed("generic", None, "", 0);
pub const WELL_KNOWN: KindSpec<'static> = KindSpec::fixed("well-known", WKT, "", 0);
pub const MIME: KindSpec<'static> = KindSpec::fixed("mime", MEDIA, "", 0);
pub const ABSOLUTE_URI: KindSpec<'static> =
    KindSpec::fixed("absolute-uri", Some(TypeNameFormat::AbsoluteUri), "", 0);
pub const TEXT: KindSpec<'static> = KindSpec::fixed("text", WKT, "T", 1);
pub const URI: KindSpec<'static> = KindSpec::fixed("uri", WKT, "U", 1);
pub const SMART_POSTER: KindSpec<'static> = KindSpec::fixed("smart-poster", WKT, "Sp", 0);
pub const SIGNATURE: KindSpec<'static> = KindSpec::fixed("signature", WKT, "Sig", 1);
pub const HANDOVER_REQUEST: KindSpec<'static> = KindSpec::fixed("handover-request", WKT, "Hr", 1);
pub const HANDOVER_SELECT: KindSpec<'static> = KindSpec::fixed("handover-select", WKT, "Hs", 1);
pub const HANDOVER_MEDIATION: KindSpec<'static> =
    KindSpec::fixed("handover-mediation", WKT, "Hm", 1);
pub const HANDOVER_INITIATE: KindSpec<'static> =
    KindSpec::fixed("handover-initiate", WKT, "Hi", 1);
pub const DEVICE_INFO: KindSpec<'static> = KindSpec::fixed("device-info", WKT, "Di", 0);
pub const BLUETOOTH_EASY_PAIRING: KindSpec<'static> = KindSpec::fixed(
    "bluetooth-ep",
    MEDIA,
    EASY_PAIRING_TYPE,
    bluetooth::EASY_PAIRING_MIN_LEN,
);
pub const BLUETOOTH_LOW_ENERGY: KindSpec<'static> =
    KindSpec::fixed("bluetooth-le", MEDIA, LOW_ENERGY_TYPE, 0);

/// A kind declared at runtime, for resolvers that handle types this crate
/// does not know about. The payload is kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRecord {
    pub tnf: Option<TypeNameFormat>,
    pub record_type: String,
    pub min_payload_length: usize,
    pub max_payload_length: Option<usize>,
    pub payload: Vec<u8>,
}

impl CustomRecord {
    pub fn new(tnf: TypeNameFormat, record_type: impl Into<String>) -> Self {
        CustomRecord {
            tnf: Some(tnf),
            record_type: record_type.into(),
            min_payload_length: 0,
            max_payload_length: None,
            payload: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_payload_length = min;
        self.max_payload_length = max;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    /// Base record; the type name format comes from the caller.
    Generic(Vec<u8>),
    WellKnown(Vec<u8>),
    Mime(Vec<u8>),
    AbsoluteUri(Vec<u8>),
    Text(TextRecord),
    Uri(UriRecord),
    SmartPoster(Vec<u8>),
    Signature(SignatureRecord),
    HandoverRequest(HandoverRecord),
    HandoverSelect(HandoverRecord),
    HandoverMediation(HandoverRecord),
    HandoverInitiate(HandoverRecord),
    DeviceInfo(DeviceInfoRecord),
    BluetoothEasyPairing(BluetoothEasyPairingRecord),
    BluetoothLowEnergy(BluetoothLowEnergyRecord),
    Custom(CustomRecord),
}

impl RecordKind {
    pub fn spec(&self) -> KindSpec<'_> {
        match self {
            RecordKind::Generic(_) => GENERIC,
            RecordKind::WellKnown(_) => WELL_KNOWN,
            RecordKind::Mime(_) => MIME,
            RecordKind::AbsoluteUri(_) => ABSOLUTE_URI,
            RecordKind::Text(_) => TEXT,
            RecordKind::Uri(_) => URI,
            RecordKind::SmartPoster(_) => SMART_POSTER,
            RecordKind::Signature(_) => SIGNATURE,
            RecordKind::HandoverRequest(_) => HANDOVER_REQUEST,
            RecordKind::HandoverSelect(_) => HANDOVER_SELECT,
            RecordKind::HandoverMediation(_) => HANDOVER_MEDIATION,
            RecordKind::HandoverInitiate(_) => HANDOVER_INITIATE,
            RecordKind::DeviceInfo(_) => DEVICE_INFO,
            RecordKind::BluetoothEasyPairing(_) => BLUETOOTH_EASY_PAIRING,
            RecordKind::BluetoothLowEnergy(_) => BLUETOOTH_LOW_ENERGY,
            RecordKind::Custom(custom) => KindSpec {
                name: "custom",
                tnf: custom.tnf,
                record_type: &custom.record_type,
                min_payload_length: custom.min_payload_length,
                max_payload_length: custom.max_payload_length,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    /// Synthesize the payload from the structured fields.
    pub fn payload(&self) -> Result<Vec<u8>> {
        match self {
            RecordKind::Generic(raw)
            | RecordKind::WellKnown(raw)
            | RecordKind::Mime(raw)
            | RecordKind::AbsoluteUri(raw)
            | RecordKind::SmartPoster(raw) => Ok(raw.clone()),
            RecordKind::Custom(custom) => Ok(custom.payload.clone()),
            RecordKind::Text(r) => r.to_payload(),
            RecordKind::Uri(r) => r.to_payload(),
            RecordKind::Signature(r) => r.to_payload(),
            RecordKind::HandoverRequest(r)
            | RecordKind::HandoverSelect(r)
            | RecordKind::HandoverMediation(r)
            | RecordKind::HandoverInitiate(r) => r.to_payload(),
            RecordKind::DeviceInfo(r) => r.to_payload(),
            RecordKind::BluetoothEasyPairing(r) => r.to_payload(),
            RecordKind::BluetoothLowEnergy(r) => r.to_payload(),
        }
    }

    /// Rebuild the structured fields from a payload. On error the kind is
    /// left unchanged.
    pub fn set_payload(&mut self, payload: &[u8]) -> Result<()> {
        match self {
            RecordKind::Generic(raw)
            | RecordKind::WellKnown(raw)
            | RecordKind::Mime(raw)
            | RecordKind::AbsoluteUri(raw)
            | RecordKind::SmartPoster(raw) => *raw = payload.to_vec(),
            RecordKind::Custom(custom) => custom.payload = payload.to_vec(),
            RecordKind::Text(r) => *r = TextRecord::from_payload(payload)?,
            RecordKind::Uri(r) => *r = UriRecord::from_payload(payload)?,
            RecordKind::Signature(r) => *r = SignatureRecord::from_payload(payload)?,
            RecordKind::HandoverRequest(r)
            | RecordKind::HandoverSelect(r)
            | RecordKind::HandoverMediation(r)
            | RecordKind::HandoverInitiate(r) => *r = HandoverRecord::from_payload(payload)?,
            RecordKind::DeviceInfo(r) => *r = DeviceInfoRecord::from_payload(payload)?,
            RecordKind::BluetoothEasyPairing(r) => {
                *r = BluetoothEasyPairingRecord::from_payload(payload)?
            }
            RecordKind::BluetoothLowEnergy(r) => {
                *r = BluetoothLowEnergyRecord::from_payload(payload)?
            }
        }
        Ok(())
    }
}
