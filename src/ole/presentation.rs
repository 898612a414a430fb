//! OLE 1.0 presentation objects (MS-OLEDS 2.2.2, 2.2.3).
//!
//! A presentation object is selected by its header: the reserved class names
//! `METAFILEPICT`, `BITMAP` and `DIB` pick the standard objects, any other
//! class name picks a generic object whose clipboard format picks between
//! the standard-format and registered-format layouts.
//!
//! Selection is done by looking ahead at the header and then decoding the
//! whole record again from its first byte with the chosen decoder. Every
//! concrete decoder validates its own header, so calling one directly on the
//! wrong record fails instead of producing a mislabelled value.
//!
//! Payload bytes (metafile, bitmap, DIB or clipboard data) are kept opaque.

use super::consts::{
    CLASS_NAME_BITMAP, CLASS_NAME_DIB, CLASS_NAME_METAFILEPICT, METAFILE_RESERVED_LEN,
};
use super::header::{ClipboardFormatHeader, PresentationObjectHeader};
use super::strings::LengthPrefixedAnsiString;
use crate::common::{ByteReader, Corruption, Error, Result};
use serde::Serialize;

/// Envelope shared by the metafile, bitmap and DIB presentation objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardPresentationObject {
    pub header: PresentationObjectHeader,
    pub width: i32,
    pub height: i32,
}

impl StandardPresentationObject {
    /// Read the envelope; the class name must be one of the three reserved
    /// names.
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.position();
        let header = PresentationObjectHeader::read(reader)?;
        if !header.has_standard_class_name() {
            return Err(unexpected_class(start, &header));
        }
        Ok(Self {
            header,
            width: reader.read_i32()?,
            height: reader.read_i32()?,
        })
    }

    /// Read the envelope and require one exact class name.
    fn read_class(reader: &mut ByteReader<'_>, class_name: &str) -> Result<Self> {
        let start = reader.position();
        let object = Self::read(reader)?;
        if object.header.class_name() != Some(class_name) {
            return Err(unexpected_class(start, &object.header));
        }
        Ok(object)
    }
}

fn unexpected_class(offset: usize, header: &PresentationObjectHeader) -> Error {
    Error::corrupted(
        offset,
        Corruption::UnexpectedClassName(header.class_name().unwrap_or_default().to_string()),
    )
}

/// Windows metafile presentation (class `METAFILEPICT`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaFilePresentationObject {
    pub header: StandardPresentationObject,
    /// Size of the four reserved words plus the metafile
    pub presentation_data_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub reserved3: u16,
    pub reserved4: u16,
    pub presentation_data: Vec<u8>,
}

impl MetaFilePresentationObject {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let header = StandardPresentationObject::read_class(reader, CLASS_NAME_METAFILEPICT)?;
        let size_offset = reader.position();
        let presentation_data_size = reader.read_u32()?;
        if presentation_data_size < METAFILE_RESERVED_LEN {
            return Err(Error::corrupted(
                size_offset,
                Corruption::InvalidValue {
                    field: "MetaFilePresentationObject PresentationDataSize",
                    value: u64::from(presentation_data_size),
                },
            ));
        }
        let reserved1 = reader.read_u16()?;
        let reserved2 = reader.read_u16()?;
        let reserved3 = reader.read_u16()?;
        let reserved4 = reader.read_u16()?;
        let presentation_data = reader
            .read_bytes((presentation_data_size - METAFILE_RESERVED_LEN) as usize)?
            .to_vec();
        Ok(Self {
            header,
            presentation_data_size,
            reserved1,
            reserved2,
            reserved3,
            reserved4,
            presentation_data,
        })
    }
}

/// Device-dependent bitmap presentation (class `BITMAP`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitmapPresentationObject {
    pub header: StandardPresentationObject,
    pub presentation_data_size: u32,
    pub bitmap: Vec<u8>,
}

impl BitmapPresentationObject {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let header = StandardPresentationObject::read_class(reader, CLASS_NAME_BITMAP)?;
        let presentation_data_size = reader.read_u32()?;
        let bitmap = reader.read_bytes(presentation_data_size as usize)?.to_vec();
        Ok(Self {
            header,
            presentation_data_size,
            bitmap,
        })
    }
}

/// Device-independent bitmap presentation (class `DIB`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DibPresentationObject {
    pub header: StandardPresentationObject,
    pub presentation_data_size: u32,
    pub dib: Vec<u8>,
}

impl DibPresentationObject {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let header = StandardPresentationObject::read_class(reader, CLASS_NAME_DIB)?;
        let presentation_data_size = reader.read_u32()?;
        let dib = reader.read_bytes(presentation_data_size as usize)?.to_vec();
        Ok(Self {
            header,
            presentation_data_size,
            dib,
        })
    }
}

/// Presentation data in a standard clipboard format (non-zero format id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardClipboardFormatPresentationObject {
    pub header: ClipboardFormatHeader,
    pub presentation_data_size: u32,
    pub presentation_data: Vec<u8>,
}

impl StandardClipboardFormatPresentationObject {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.position();
        let header = ClipboardFormatHeader::read(reader)?;
        if header.clipboard_format == 0 {
            return Err(Error::corrupted(
                start,
                Corruption::InvalidClipboardFormat("StandardClipboardFormatPresentationObject"),
            ));
        }
        let presentation_data_size = reader.read_u32()?;
        let presentation_data = reader.read_bytes(presentation_data_size as usize)?.to_vec();
        Ok(Self {
            header,
            presentation_data_size,
            presentation_data,
        })
    }
}

/// Presentation data in a registered clipboard format named inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredClipboardFormatPresentationObject {
    pub header: ClipboardFormatHeader,
    pub string_format_data_size: u32,
    pub string_format_data: LengthPrefixedAnsiString,
    pub presentation_data_size: u32,
    pub presentation_data: Vec<u8>,
}

impl RegisteredClipboardFormatPresentationObject {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.position();
        let header = ClipboardFormatHeader::read(reader)?;
        if header.clipboard_format != 0 {
            return Err(Error::corrupted(
                start,
                Corruption::InvalidClipboardFormat("RegisteredClipboardFormatPresentationObject"),
            ));
        }
        let string_format_data_size = reader.read_u32()?;
        let string_start = reader.position();
        let string_format_data = LengthPrefixedAnsiString::read(reader)?;
        let consumed = reader.consumed_since(string_start);
        if consumed != string_format_data_size as usize {
            return Err(reader.corrupted(Corruption::LengthMismatch {
                record: "RegisteredClipboardFormatPresentationObject StringFormatData",
                declared: string_format_data_size as usize,
                consumed,
            }));
        }
        let presentation_data_size = reader.read_u32()?;
        let presentation_data = reader.read_bytes(presentation_data_size as usize)?.to_vec();
        Ok(Self {
            header,
            string_format_data_size,
            string_format_data,
            presentation_data_size,
            presentation_data,
        })
    }

    /// Name of the registered clipboard format.
    pub fn format_name(&self) -> &str {
        self.string_format_data.as_str()
    }
}

/// Presentation object with a non-reserved class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GenericPresentationObject {
    Standard(StandardClipboardFormatPresentationObject),
    Registered(RegisteredClipboardFormatPresentationObject),
}

impl GenericPresentationObject {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let header = reader.lookahead(ClipboardFormatHeader::read)?;
        if header.clipboard_format == 0 {
            RegisteredClipboardFormatPresentationObject::read(reader).map(Self::Registered)
        } else {
            StandardClipboardFormatPresentationObject::read(reader).map(Self::Standard)
        }
    }
}

/// Any presentation object that may follow an OLE 1.0 object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PresentationObject {
    MetaFile(MetaFilePresentationObject),
    Bitmap(BitmapPresentationObject),
    Dib(DibPresentationObject),
    StandardClipboardFormat(StandardClipboardFormatPresentationObject),
    RegisteredClipboardFormat(RegisteredClipboardFormatPresentationObject),
}

impl PresentationObject {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.position();
        let header = reader.lookahead(PresentationObjectHeader::read)?;
        match header.class_name() {
            Some(CLASS_NAME_METAFILEPICT) => {
                MetaFilePresentationObject::read(reader).map(Self::MetaFile)
            },
            Some(CLASS_NAME_BITMAP) => BitmapPresentationObject::read(reader).map(Self::Bitmap),
            Some(CLASS_NAME_DIB) => DibPresentationObject::read(reader).map(Self::Dib),
            Some(_) => GenericPresentationObject::read(reader).map(Self::from),
            None => Err(Error::corrupted(
                start + 4,
                Corruption::InvalidValue {
                    field: "PresentationObjectHeader FormatID",
                    value: u64::from(header.format_id),
                },
            )),
        }
    }

    /// Class name from the object's header.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            PresentationObject::MetaFile(o) => o.header.header.class_name(),
            PresentationObject::Bitmap(o) => o.header.header.class_name(),
            PresentationObject::Dib(o) => o.header.header.class_name(),
            PresentationObject::StandardClipboardFormat(o) => o.header.header.class_name(),
            PresentationObject::RegisteredClipboardFormat(o) => o.header.header.class_name(),
        }
    }

    /// The opaque presentation payload.
    pub fn data(&self) -> &[u8] {
        match self {
            PresentationObject::MetaFile(o) => &o.presentation_data,
            PresentationObject::Bitmap(o) => &o.bitmap,
            PresentationObject::Dib(o) => &o.dib,
            PresentationObject::StandardClipboardFormat(o) => &o.presentation_data,
            PresentationObject::RegisteredClipboardFormat(o) => &o.presentation_data,
        }
    }
}

impl From<GenericPresentationObject> for PresentationObject {
    fn from(object: GenericPresentationObject) -> Self {
        match object {
            GenericPresentationObject::Standard(o) => {
                PresentationObject::StandardClipboardFormat(o)
            },
            GenericPresentationObject::Registered(o) => {
                PresentationObject::RegisteredClipboardFormat(o)
            },
        }
    }
}
