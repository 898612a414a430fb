//! OLEStream (MS-OLEDS 2.3.3): link-tracking information of a linked or
//! embedded object stored in the `\x01Ole` stream.

use super::consts::{MIN_MONIKER_STREAM_SIZE, OLE_STREAM_CLSID_INDICATOR, OLE_STREAM_VERSION};
use super::record::StreamRecord;
use super::strings::LengthPrefixedUnicodeString;
use super::types::{Clsid, FileTime};
use crate::common::{ByteReader, Corruption, Error, Result};
use bitflags::bitflags;
use serde::Serialize;
use tracing::debug;

bitflags! {
    /// OLEStream flags. An object without `LINKED_OBJECT` is embedded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(transparent)]
    pub struct OleStreamFlags: u32 {
        /// The object is a linked object
        const LINKED_OBJECT = 0x0000_0001;
        /// Implementation-specific hint, may be ignored
        const CACHE = 0x0000_1000;
    }
}

/// MONIKERSTREAM: a serialized moniker preceded by its class id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonikerStream {
    pub clsid: Clsid,
    pub stream_data: Vec<u8>,
}

impl MonikerStream {
    /// Read a moniker occupying exactly `len` bytes.
    pub fn read(reader: &mut ByteReader<'_>, len: usize) -> Result<Self> {
        if len < MIN_MONIKER_STREAM_SIZE {
            return Err(reader.corrupted(Corruption::InvalidValue {
                field: "MONIKERSTREAM length",
                value: len as u64,
            }));
        }
        let clsid = Clsid::read(reader)?;
        let stream_data = reader.read_bytes(len - MIN_MONIKER_STREAM_SIZE)?.to_vec();
        Ok(Self { clsid, stream_data })
    }
}

/// Read a moniker size field and the moniker it announces.
///
/// The size counts its own four bytes; zero means no moniker follows.
fn read_sized_moniker(
    reader: &mut ByteReader<'_>,
    field: &'static str,
) -> Result<(u32, Option<MonikerStream>)> {
    let size_offset = reader.position();
    let size = reader.read_u32()?;
    if size == 0 {
        return Ok((size, None));
    }
    if size < 4 {
        return Err(Error::corrupted(
            size_offset,
            Corruption::InvalidValue {
                field,
                value: u64::from(size),
            },
        ));
    }
    let moniker = MonikerStream::read(reader, size as usize - 4)?;
    Ok((size, Some(moniker)))
}

/// Fields present only for linked objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSource {
    pub relative_source_moniker_stream_size: u32,
    pub relative_source_moniker_stream: Option<MonikerStream>,
    pub absolute_source_moniker_stream_size: u32,
    pub absolute_source_moniker_stream: MonikerStream,
    pub clsid_indicator: i32,
    /// Class of the link source
    pub clsid: Clsid,
    pub reserved_display_name: LengthPrefixedUnicodeString,
    pub reserved2: u32,
    pub local_update_time: FileTime,
    pub local_check_update_time: FileTime,
    pub remote_update_time: FileTime,
}

impl LinkSource {
    fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let (relative_source_moniker_stream_size, relative_source_moniker_stream) =
            read_sized_moniker(reader, "OLEStream RelativeSourceMonikerStreamSize")?;

        let absolute_offset = reader.position();
        let (absolute_source_moniker_stream_size, absolute_source_moniker_stream) =
            read_sized_moniker(reader, "OLEStream AbsoluteSourceMonikerStreamSize")?;
        let Some(absolute_source_moniker_stream) = absolute_source_moniker_stream else {
            return Err(Error::corrupted(
                absolute_offset,
                Corruption::InvalidValue {
                    field: "OLEStream AbsoluteSourceMonikerStreamSize",
                    value: 0,
                },
            ));
        };

        let indicator_offset = reader.position();
        let clsid_indicator = reader.read_i32()?;
        if clsid_indicator != OLE_STREAM_CLSID_INDICATOR {
            return Err(Error::corrupted(
                indicator_offset,
                Corruption::InvalidValue {
                    field: "OLEStream ClsidIndicator",
                    value: u64::from(clsid_indicator as u32),
                },
            ));
        }

        Ok(Self {
            relative_source_moniker_stream_size,
            relative_source_moniker_stream,
            absolute_source_moniker_stream_size,
            absolute_source_moniker_stream,
            clsid_indicator,
            clsid: Clsid::read(reader)?,
            reserved_display_name: LengthPrefixedUnicodeString::read(reader)?,
            reserved2: reader.read_u32()?,
            local_update_time: FileTime::read(reader)?,
            local_check_update_time: FileTime::read(reader)?,
            remote_update_time: FileTime::read(reader)?,
        })
    }
}

/// The `\x01Ole` stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OleStream {
    pub version: u32,
    pub flags: OleStreamFlags,
    pub link_update_option: u32,
    pub reserved1: u32,
    pub reserved_moniker_stream_size: u32,
    pub reserved_moniker_stream: Option<MonikerStream>,
    /// Present when the stream describes a linked object
    pub link: Option<LinkSource>,
}

impl OleStream {
    /// Read an OLEStream occupying exactly `len` bytes.
    pub fn read(reader: &mut ByteReader<'_>, len: usize) -> Result<Self> {
        let start = reader.position();

        let version = reader.read_u32()?;
        if version != OLE_STREAM_VERSION {
            return Err(Error::corrupted(
                start,
                Corruption::InvalidValue {
                    field: "OLEStream Version",
                    value: u64::from(version),
                },
            ));
        }
        let flags = OleStreamFlags::from_bits_retain(reader.read_u32()?);
        let link_update_option = reader.read_u32()?;
        let reserved1 = reader.read_u32()?;
        if reserved1 != 0 {
            return Err(Error::corrupted(
                start + 12,
                Corruption::InvalidValue {
                    field: "OLEStream Reserved1",
                    value: u64::from(reserved1),
                },
            ));
        }
        let (reserved_moniker_stream_size, reserved_moniker_stream) =
            read_sized_moniker(reader, "OLEStream ReservedMonikerStreamSize")?;

        let link = if reader.consumed_since(start) == len {
            debug!("OLEStream ends after the reserved moniker: embedded object");
            None
        } else if !flags.contains(OleStreamFlags::LINKED_OBJECT) {
            return Err(reader.corrupted(Corruption::InvalidValue {
                field: "OLEStream Flags",
                value: u64::from(flags.bits()),
            }));
        } else {
            Some(LinkSource::read(reader)?)
        };

        let consumed = reader.consumed_since(start);
        if consumed != len {
            return Err(reader.corrupted(Corruption::LengthMismatch {
                record: Self::NAME,
                declared: len,
                consumed,
            }));
        }

        Ok(Self {
            version,
            flags,
            link_update_option,
            reserved1,
            reserved_moniker_stream_size,
            reserved_moniker_stream,
            link,
        })
    }

    /// Whether the stream carries link-tracking fields.
    pub fn is_linked(&self) -> bool {
        self.link.is_some()
    }
}

impl StreamRecord for OleStream {
    const NAME: &'static str = "OLEStream";

    fn read_record(reader: &mut ByteReader<'_>, declared_len: usize) -> Result<Self> {
        Self::read(reader, declared_len)
    }
}
