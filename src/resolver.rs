// src/resolver.rs
use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::kinds::{
    self, BluetoothEasyPairingRecord, BluetoothLowEnergyRecord, DeviceInfoRecord, HandoverRecord,
    RecordKind, SignatureRecord, TextRecord, UriRecord,
};
use crate::record::Record;
use crate::types::TypeNameFormat;

/// Maps a decoded (type name format, type) pair to an empty record of the
/// matching kind. The decoder fills in id, type, payload and flags.
///
/// Any `Fn(TypeNameFormat, &str) -> Record` works; wrap
/// [`default_resolver`] to add or override kinds.
pub type Resolver = fn(TypeNameFormat, &str) -> Record;

type KindFactory = fn() -> RecordKind;

lazy_static! {
    static ref WELL_KNOWN: HashMap<&'static str, KindFactory> = {
        let mut m: HashMap<&'static str, KindFactory> = HashMap::new();
        m.insert(kinds::URI.record_type, || RecordKind::Uri(UriRecord::default()));
        m.insert(kinds::TEXT.record_type, || RecordKind::Text(TextRecord::default()));
        m.insert(kinds::SMART_POSTER.record_type, || RecordKind::SmartPoster(Vec::new()));
        m.insert(kinds::SIGNATURE.record_type, || {
            RecordKind::Signature(SignatureRecord::default())
        });
        m.insert(kinds::HANDOVER_REQUEST.record_type, || {
            RecordKind::HandoverRequest(HandoverRecord::default())
        });
        m.insert(kinds::HANDOVER_SELECT.record_type, || {
            RecordKind::HandoverSelect(HandoverRecord::default())
        });
        m.insert(kinds::HANDOVER_MEDIATION.record_type, || {
            RecordKind::HandoverMediation(HandoverRecord::default())
        });
        m.insert(kinds::HANDOVER_INITIATE.record_type, || {
            RecordKind::HandoverInitiate(HandoverRecord::default())
        });
        m.insert(kinds::DEVICE_INFO.record_type, || {
            RecordKind::DeviceInfo(DeviceInfoRecord::default())
        });
        m
    };
    static ref MEDIA: HashMap<&'static str, KindFactory> = {
        let mut m: HashMap<&'static str, KindFactory> = HashMap::new();
        m.insert(kinds::BLUETOOTH_EASY_PAIRING.record_type, || {
            RecordKind::BluetoothEasyPairing(BluetoothEasyPairingRecord::default())
        });
        m.insert(kinds::BLUETOOTH_LOW_ENERGY.record_type, || {
            RecordKind::BluetoothLowEnergy(BluetoothLowEnergyRecord::default())
        });
        m
    };
}

/// Registry of the kinds this crate knows. Unregistered well-known and
/// media types fall back to their generic bucket kind; every other type
/// name format gets the base record.
pub fn default_resolver(tnf: TypeNameFormat, record_type: &str) -> Record {
    let kind = match tnf {
        TypeNameFormat::WellKnown => WELL_KNOWN
            .get(record_type)
            .map_or_else(|| RecordKind::WellKnown(Vec::new()), |make| make()),
        TypeNameFormat::Media => MEDIA
            .get(record_type)
            .map_or_else(|| RecordKind::Mime(Vec::new()), |make| make()),
        TypeNameFormat::AbsoluteUri => RecordKind::AbsoluteUri(Vec::new()),
        other => return Record::generic(other),
    };
    Record::from_kind(kind)
}

/// Resolves every type to the base record, leaving payloads unstructured.
pub fn generic_resolver(tnf: TypeNameFormat, _record_type: &str) -> Record {
    Record::generic(tnf)
}

/// Types registered for a bucket, for diagnostics.
pub fn registered_types(tnf: TypeNameFormat) -> Vec<&'static str> {
    let mut types: Vec<_> = match tnf {
        TypeNameFormat::WellKnown => WELL_KNOWN.keys().copied().collect(),
        TypeNameFormat::Media => MEDIA.keys().copied().collect(),
        _ => Vec::new(),
    };
    types.sort_unstable();
    types
}
