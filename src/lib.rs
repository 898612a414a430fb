//! Oleds - A Rust library for decoding the Object Linking and Embedding Data
//! Structures (MS-OLEDS)
//!
//! Compound files written by Office and other OLE containers keep linked and
//! embedded objects in a handful of named streams. This crate decodes the
//! bytes of those streams into typed, validated records. Reading the compound
//! file itself is left to the caller.
//!
//! # Features
//!
//! - **OLEStream**: link-tracking record with its moniker streams
//! - **CompObjStream**: user type, clipboard format and ProgID of an object
//! - **OLEPresentationStream**: cached presentation data, target device and
//!   table of contents
//! - **OLE 1.0 objects**: embedded and linked objects with their
//!   presentation objects, and the native data stream
//! - **Strict validation**: every length, offset and constant is checked; a
//!   malformed stream yields [`Error::Corrupted`] with the byte offset
//!
//! # Example - Decoding a single stream
//!
//! ```
//! use oleds::{OleStream, StreamRecord};
//!
//! # fn main() -> oleds::Result<()> {
//! let data = [
//!     0x01, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//!     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//! ];
//! let stream = OleStream::parse(&data, data.len())?;
//! assert!(!stream.is_linked());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Decoding an object storage
//!
//! ```
//! use std::collections::BTreeMap;
//! use oleds::ObjectStorage;
//!
//! # fn main() -> oleds::Result<()> {
//! let mut streams = BTreeMap::new();
//! streams.insert("\u{1}Ole10Native".to_string(), vec![0x01, 0x00, 0x00, 0x00, 0x7F]);
//! let storage = ObjectStorage::load(&mut streams)?;
//! assert_eq!(storage.native.unwrap().native_data, vec![0x7F]);
//! # Ok(())
//! # }
//! ```

/// Shared binary reading and error types
pub mod common;

/// MS-OLEDS record decoders
pub mod ole;

pub use common::{Corruption, Error, Result};
pub use ole::{
    CompObjStream, DecodeOptions, EmbeddedObject, LinkedObject, ObjectStorage, OleNativeStream,
    OlePresentationStream, OleStream, StreamRecord, StreamSource,
};
