//! OLEPresentationStream (MS-OLEDS 2.3.4) and its TOCENTRY records
//! (MS-OLEDS 2.3.5): cached renderings stored in `\x02OlePresXXX` streams.

use super::consts::{
    CF_BITMAP, CF_METAFILEPICT, MAX_PRESENTATION_FORMAT_NAME_LEN, METAFILE_RESERVED2_LEN,
    TARGET_DEVICE_SIZE_FIELD_LEN, TOC_SIGNATURE,
};
use super::record::StreamRecord;
use super::strings::{ClipboardFormatOrAnsiString, ClipboardFormatOrString};
use super::target_device::DvTargetDevice;
use crate::common::{ByteReader, Corruption, Error, Result};
use serde::Serialize;

/// One additional rendering listed after the primary presentation data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub ansi_clipboard_format: ClipboardFormatOrAnsiString,
    pub target_device_size: u32,
    pub aspect: u32,
    pub lindex: u32,
    /// Storage medium hint, ignored on read
    pub tymed: u32,
    pub reserved1: [u32; 3],
    pub advf: u32,
    pub reserved2: u32,
    pub target_device: Option<DvTargetDevice>,
}

impl TocEntry {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let ansi_clipboard_format = ClipboardFormatOrAnsiString::read(reader)?;
        let target_device_size = reader.read_u32()?;
        let aspect = reader.read_u32()?;
        let lindex = reader.read_u32()?;
        let tymed = reader.read_u32()?;
        let reserved1 = [reader.read_u32()?, reader.read_u32()?, reader.read_u32()?];
        let advf = reader.read_u32()?;
        let reserved2 = reader.read_u32()?;
        let target_device = match target_device_size {
            0 => None,
            size => Some(DvTargetDevice::read(reader, size as usize)?),
        };
        Ok(Self {
            ansi_clipboard_format,
            target_device_size,
            aspect,
            lindex,
            tymed,
            reserved1,
            advf,
            reserved2,
            target_device,
        })
    }
}

/// A `\x02OlePresXXX` stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OlePresentationStream {
    pub ansi_clipboard_format: ClipboardFormatOrAnsiString,
    /// Size of the target device record plus this field
    pub target_device_size: u32,
    pub target_device: Option<DvTargetDevice>,
    pub aspect: u32,
    pub lindex: u32,
    pub advf: u32,
    pub reserved1: u32,
    pub width: u32,
    pub height: u32,
    pub size: u32,
    pub data: Vec<u8>,
    /// Present only after `CF_METAFILEPICT` data
    pub reserved2: Option<[u8; METAFILE_RESERVED2_LEN]>,
    pub toc_signature: u32,
    pub toc_count: u32,
    pub toc_entries: Vec<TocEntry>,
}

fn validate_clipboard_format(format: &ClipboardFormatOrAnsiString, offset: usize) -> Result<()> {
    match &format.format {
        ClipboardFormatOrString::None => Err(Error::corrupted(
            offset,
            Corruption::InvalidClipboardFormat("OLEPresentationStream"),
        )),
        ClipboardFormatOrString::Standard(CF_BITMAP) => Err(Error::corrupted(
            offset,
            Corruption::InvalidClipboardFormat("OLEPresentationStream"),
        )),
        ClipboardFormatOrString::Registered(_)
            if format.marker_or_length - 1 > MAX_PRESENTATION_FORMAT_NAME_LEN =>
        {
            Err(Error::corrupted(
                offset,
                Corruption::InvalidValue {
                    field: "OLEPresentationStream registered format length",
                    value: u64::from(format.marker_or_length),
                },
            ))
        },
        _ => Ok(()),
    }
}

impl OlePresentationStream {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.position();
        let ansi_clipboard_format = ClipboardFormatOrAnsiString::read(reader)?;
        validate_clipboard_format(&ansi_clipboard_format, start)?;

        let size_offset = reader.position();
        let target_device_size = reader.read_u32()?;
        if target_device_size < TARGET_DEVICE_SIZE_FIELD_LEN {
            return Err(Error::corrupted(
                size_offset,
                Corruption::InvalidValue {
                    field: "OLEPresentationStream TargetDeviceSize",
                    value: u64::from(target_device_size),
                },
            ));
        }
        let target_device = match target_device_size - TARGET_DEVICE_SIZE_FIELD_LEN {
            0 => None,
            len => Some(DvTargetDevice::read(reader, len as usize)?),
        };

        let aspect = reader.read_u32()?;
        let lindex = reader.read_u32()?;
        let advf = reader.read_u32()?;
        let reserved1 = reader.read_u32()?;
        let width = reader.read_u32()?;
        let height = reader.read_u32()?;
        let size = reader.read_u32()?;
        let data = reader.read_bytes(size as usize)?.to_vec();
        let reserved2 = match ansi_clipboard_format.format {
            ClipboardFormatOrString::Standard(CF_METAFILEPICT) => {
                Some(reader.read_array::<METAFILE_RESERVED2_LEN>()?)
            },
            _ => None,
        };

        let toc_offset = reader.position();
        let toc_signature = reader.read_u32()?;
        let toc_count = reader.read_u32()?;
        if toc_count != 0 && toc_signature != TOC_SIGNATURE {
            return Err(Error::corrupted(
                toc_offset,
                Corruption::InvalidValue {
                    field: "OLEPresentationStream TocSignature",
                    value: u64::from(toc_signature),
                },
            ));
        }
        let toc_entries = (0..toc_count)
            .map(|_| TocEntry::read(reader))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ansi_clipboard_format,
            target_device_size,
            target_device,
            aspect,
            lindex,
            advf,
            reserved1,
            width,
            height,
            size,
            data,
            reserved2,
            toc_signature,
            toc_count,
            toc_entries,
        })
    }
}

impl StreamRecord for OlePresentationStream {
    const NAME: &'static str = "OLEPresentationStream";

    fn read_record(reader: &mut ByteReader<'_>, _declared_len: usize) -> Result<Self> {
        Self::read(reader)
    }
}
