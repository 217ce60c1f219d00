//! Single-record NDEF (NFC Data Exchange Format) encoding and decoding.
//!
//! ```
//! use ndef_record::{Record, RecordKind};
//!
//! let bytes = [0xD1, 0x01, 0x03, b'T', 0x02, b'e', b'n'];
//! let record = Record::from_bytes(&bytes).unwrap();
//! assert!(matches!(record.kind(), RecordKind::Text(_)));
//! assert_eq!(record.to_bytes().unwrap(), bytes);
//! ```

pub mod cursor;
pub mod error;
pub mod flags;
pub mod kinds;
pub mod ndef;
pub mod record;
pub mod resolver;
pub mod types;

pub use cursor::{ByteCursor, SliceCursor};
pub use error::{NdefError, Result};
pub use flags::HeaderFlags;
pub use kinds::{KindSpec, PayloadCodec, RecordKind};
pub use ndef::{decode_record, decode_record_with, encode_record, validate_structure};
pub use record::{Record, RecordSummary};
pub use resolver::{Resolver, default_resolver, generic_resolver, registered_types};
pub use types::TypeNameFormat;
