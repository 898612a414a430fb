//! Discriminated header records of the OLE 1.0 object layout
//! (MS-OLEDS 2.2.1, 2.2.3.1, 2.2.4).
//!
//! Each header carries the field that decides which larger record may follow
//! it. The headers validate their own discriminants; the records that embed
//! them validate the contextual constraints.

use super::consts::{
    OBJECT_FORMAT_ID_EMBEDDED, OBJECT_FORMAT_ID_LINKED, PRESENTATION_FORMAT_ID_CLASS,
    PRESENTATION_FORMAT_ID_NO_CLASS, STANDARD_PRESENTATION_CLASS_NAMES,
};
use super::strings::LengthPrefixedAnsiString;
use crate::common::{ByteReader, Corruption, Error, Result};
use serde::Serialize;

/// Whether an object is stored by reference or by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectFormat {
    Linked,
    Embedded,
}

impl ObjectFormat {
    fn from_raw(value: u32) -> Option<Self> {
        match value {
            OBJECT_FORMAT_ID_LINKED => Some(ObjectFormat::Linked),
            OBJECT_FORMAT_ID_EMBEDDED => Some(ObjectFormat::Embedded),
            _ => None,
        }
    }
}

/// PresentationObjectHeader: OLE version, format id and an optional class
/// name present only when the format id is 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationObjectHeader {
    pub ole_version: u32,
    pub format_id: u32,
    pub class_name: Option<LengthPrefixedAnsiString>,
}

impl PresentationObjectHeader {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let ole_version = reader.read_u32()?;
        let format_offset = reader.position();
        let format_id = reader.read_u32()?;
        let class_name = match format_id {
            PRESENTATION_FORMAT_ID_CLASS => Some(LengthPrefixedAnsiString::read(reader)?),
            PRESENTATION_FORMAT_ID_NO_CLASS => None,
            other => {
                return Err(Error::corrupted(
                    format_offset,
                    Corruption::InvalidValue {
                        field: "PresentationObjectHeader FormatID",
                        value: u64::from(other),
                    },
                ));
            },
        };
        Ok(Self {
            ole_version,
            format_id,
            class_name,
        })
    }

    /// The class name text, if present.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_ref().map(|s| s.as_str())
    }

    /// Whether the class name is one of METAFILEPICT, BITMAP or DIB.
    pub fn has_standard_class_name(&self) -> bool {
        self.class_name()
            .is_some_and(|name| STANDARD_PRESENTATION_CLASS_NAMES.contains(&name))
    }
}

/// ObjectHeader: the prologue of an OLE 1.0 linked or embedded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectHeader {
    pub ole_version: u32,
    pub format_id: ObjectFormat,
    pub class_name: LengthPrefixedAnsiString,
    pub topic_name: LengthPrefixedAnsiString,
    pub item_name: LengthPrefixedAnsiString,
}

impl ObjectHeader {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let ole_version = reader.read_u32()?;
        let format_offset = reader.position();
        let raw_format = reader.read_u32()?;
        let format_id = ObjectFormat::from_raw(raw_format).ok_or_else(|| {
            Error::corrupted(
                format_offset,
                Corruption::InvalidValue {
                    field: "ObjectHeader FormatID",
                    value: u64::from(raw_format),
                },
            )
        })?;
        Ok(Self {
            ole_version,
            format_id,
            class_name: LengthPrefixedAnsiString::read(reader)?,
            topic_name: LengthPrefixedAnsiString::read(reader)?,
            item_name: LengthPrefixedAnsiString::read(reader)?,
        })
    }

    /// Read a header and require a specific format id.
    pub(crate) fn read_expecting(
        reader: &mut ByteReader<'_>,
        expected: ObjectFormat,
    ) -> Result<Self> {
        let start = reader.position();
        let header = Self::read(reader)?;
        if header.format_id != expected {
            return Err(Error::corrupted(
                start + 4,
                Corruption::InvalidValue {
                    field: "ObjectHeader FormatID",
                    value: match header.format_id {
                        ObjectFormat::Linked => u64::from(OBJECT_FORMAT_ID_LINKED),
                        ObjectFormat::Embedded => u64::from(OBJECT_FORMAT_ID_EMBEDDED),
                    },
                },
            ));
        }
        Ok(header)
    }
}

/// ClipboardFormatHeader: a presentation header with a non-standard class
/// name followed by a clipboard format id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipboardFormatHeader {
    pub header: PresentationObjectHeader,
    pub clipboard_format: u32,
}

impl ClipboardFormatHeader {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.position();
        let header = PresentationObjectHeader::read(reader)?;
        match header.class_name() {
            None => {
                return Err(Error::corrupted(
                    start + 4,
                    Corruption::InvalidValue {
                        field: "ClipboardFormatHeader FormatID",
                        value: u64::from(header.format_id),
                    },
                ));
            },
            Some(name) if header.has_standard_class_name() => {
                return Err(Error::corrupted(
                    start,
                    Corruption::UnexpectedClassName(name.to_string()),
                ));
            },
            Some(_) => {},
        }
        let clipboard_format = reader.read_u32()?;
        Ok(Self {
            header,
            clipboard_format,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Encode a presentation header with class name `name`.
    pub(crate) fn presentation_header_bytes(name: &str) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0x0000_0501u32.to_le_bytes());
        data.extend_from_slice(&PRESENTATION_FORMAT_ID_CLASS.to_le_bytes());
        data.extend_from_slice(&(name.len() as u32 + 1).to_le_bytes());
        data.extend_from_slice(name.as_bytes());
        data.push(0);
        data
    }

    /// Encode an object header with the given format id and names.
    pub(crate) fn object_header_bytes(
        format_id: u32,
        class: &str,
        topic: &str,
        item: &str,
    ) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0x0000_0501u32.to_le_bytes());
        data.extend_from_slice(&format_id.to_le_bytes());
        for name in [class, topic, item] {
            if name.is_empty() {
                data.extend_from_slice(&0u32.to_le_bytes());
            } else {
                data.extend_from_slice(&(name.len() as u32 + 1).to_le_bytes());
                data.extend_from_slice(name.as_bytes());
                data.push(0);
            }
        }
        data
    }

    #[test]
    fn test_presentation_header_with_class_name() {
        let data = presentation_header_bytes("DIB");
        let mut reader = ByteReader::new(&data);
        let header = PresentationObjectHeader::read(&mut reader).unwrap();
        assert_eq!(header.ole_version, 0x501);
        assert_eq!(header.format_id, 5);
        assert_eq!(header.class_name(), Some("DIB"));
        assert!(header.has_standard_class_name());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_presentation_header_without_class_name() {
        let data = [0x01, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let mut reader = ByteReader::new(&data);
        let header = PresentationObjectHeader::read(&mut reader).unwrap();
        assert_eq!(header.class_name, None);
        assert!(!header.has_standard_class_name());
    }

    #[test]
    fn test_presentation_header_rejects_format_id() {
        let data = [0x01, 0x05, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00];
        let mut reader = ByteReader::new(&data);
        let err = PresentationObjectHeader::read(&mut reader).unwrap_err();
        assert_eq!(err.offset(), 4);
        assert!(matches!(err.reason(), Corruption::InvalidValue { value: 2, .. }));
    }

    #[test]
    fn test_class_name_match_is_case_sensitive() {
        let data = presentation_header_bytes("dib");
        let mut reader = ByteReader::new(&data);
        let header = PresentationObjectHeader::read(&mut reader).unwrap();
        assert!(!header.has_standard_class_name());
    }

    #[test]
    fn test_object_header() {
        let data = object_header_bytes(2, "Paint.Picture", "", "");
        let mut reader = ByteReader::new(&data);
        let header = ObjectHeader::read(&mut reader).unwrap();
        assert_eq!(header.format_id, ObjectFormat::Embedded);
        assert_eq!(header.class_name.as_str(), "Paint.Picture");
        assert_eq!(header.topic_name.length, 0);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_object_header_rejects_format_id() {
        for format_id in [0u32, 3, 5] {
            let data = object_header_bytes(format_id, "X", "", "");
            let mut reader = ByteReader::new(&data);
            assert!(ObjectHeader::read(&mut reader).is_err(), "format {format_id}");
        }
    }

    #[test]
    fn test_object_header_expecting_other_format() {
        let data = object_header_bytes(1, "X", "C:\\a.xls", "");
        let mut reader = ByteReader::new(&data);
        let err = ObjectHeader::read_expecting(&mut reader, ObjectFormat::Embedded).unwrap_err();
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn test_clipboard_format_header() {
        let mut data = presentation_header_bytes("Word.Document.8");
        data.extend_from_slice(&0xC013u32.to_le_bytes());
        let mut reader = ByteReader::new(&data);
        let header = ClipboardFormatHeader::read(&mut reader).unwrap();
        assert_eq!(header.header.class_name(), Some("Word.Document.8"));
        assert_eq!(header.clipboard_format, 0xC013);
    }

    #[test]
    fn test_clipboard_format_header_rejects_standard_names() {
        for name in STANDARD_PRESENTATION_CLASS_NAMES {
            let mut data = presentation_header_bytes(name);
            data.extend_from_slice(&0u32.to_le_bytes());
            let mut reader = ByteReader::new(&data);
            assert_eq!(
                ClipboardFormatHeader::read(&mut reader).unwrap_err().reason(),
                &Corruption::UnexpectedClassName(name.to_string())
            );
        }
    }

    #[test]
    fn test_clipboard_format_header_requires_class_name() {
        let data = [0x01, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x00];
        let mut reader = ByteReader::new(&data);
        assert!(ClipboardFormatHeader::read(&mut reader).is_err());
    }
}
