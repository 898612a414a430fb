//! CompObjStream (MS-OLEDS 2.3.8): user type, clipboard format and ProgID
//! of an object, stored in the `\x01CompObj` stream.
//!
//! Early producers stop after the ANSI clipboard format, and some stop after
//! the ANSI ProgID. The remaining members form a forward-only chain: each
//! gate that fails closes everything after it.

use super::consts::{
    COMPOBJ_HEADER_LEN, COMPOBJ_MAX_PROG_ID_LEN, COMPOBJ_UNICODE_MARKER,
    MAX_COMPOBJ_FORMAT_NAME_LEN,
};
use super::record::StreamRecord;
use super::strings::{
    ClipboardFormatOrAnsiString, ClipboardFormatOrString, ClipboardFormatOrUnicodeString,
    LengthPrefixedAnsiString, LengthPrefixedUnicodeString,
};
use super::types::Clsid;
use crate::common::{ByteReader, Corruption, Error, Result};
use serde::Serialize;
use tracing::debug;
use zerocopy::{LE, U32};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// On-disk CompObjHeader (28 bytes)
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawCompObjHeader {
    reserved1: U32<LE>,
    version: U32<LE>,
    reserved2: [u8; 20],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompObjHeader {
    pub reserved1: u32,
    pub version: u32,
    pub reserved2: [u8; 20],
}

impl CompObjHeader {
    pub const SIZE: usize = COMPOBJ_HEADER_LEN;

    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let raw: RawCompObjHeader = reader.read_value()?;
        Ok(Self {
            reserved1: raw.reserved1.get(),
            version: raw.version.get(),
            reserved2: raw.reserved2,
        })
    }

    /// Class id written by the creating application in the last 16 bytes of
    /// `reserved2`.
    pub fn clsid(&self) -> Clsid {
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&self.reserved2[4..]);
        Clsid::from_bytes(&bytes)
    }
}

/// Unicode members, present only after the Unicode marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompObjUnicodeFields {
    pub unicode_user_type: LengthPrefixedUnicodeString,
    pub unicode_clipboard_format: ClipboardFormatOrUnicodeString,
    pub unicode_prog_id: LengthPrefixedUnicodeString,
}

/// Members that follow the ANSI clipboard format in newer producers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompObjLegacyFields {
    pub ansi_prog_id: LengthPrefixedAnsiString,
    pub unicode_marker: u32,
    pub unicode: Option<CompObjUnicodeFields>,
}

/// The `\x01CompObj` stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompObjStream {
    pub header: CompObjHeader,
    /// Display name of the object's class
    pub ansi_user_type: LengthPrefixedAnsiString,
    pub ansi_clipboard_format: ClipboardFormatOrAnsiString,
    pub legacy: Option<CompObjLegacyFields>,
}

fn check_format_name_len(
    marker_or_length: u32,
    format: &ClipboardFormatOrString,
    offset: usize,
) -> Result<()> {
    if matches!(format, ClipboardFormatOrString::Registered(_))
        && marker_or_length > MAX_COMPOBJ_FORMAT_NAME_LEN
    {
        return Err(Error::corrupted(
            offset,
            Corruption::InvalidValue {
                field: "CompObjStream clipboard format length",
                value: u64::from(marker_or_length),
            },
        ));
    }
    Ok(())
}

impl CompObjStream {
    /// Read a CompObj stream occupying exactly `len` bytes.
    pub fn read(reader: &mut ByteReader<'_>, len: usize) -> Result<Self> {
        let start = reader.position();
        let header = CompObjHeader::read(reader)?;
        let ansi_user_type = LengthPrefixedAnsiString::read(reader)?;
        let format_offset = reader.position();
        let ansi_clipboard_format = ClipboardFormatOrAnsiString::read(reader)?;
        check_format_name_len(
            ansi_clipboard_format.marker_or_length,
            &ansi_clipboard_format.format,
            format_offset,
        )?;

        let legacy = Self::read_legacy(reader, start, len)?;

        let consumed = reader.consumed_since(start);
        if consumed > len {
            return Err(reader.corrupted(Corruption::LengthMismatch {
                record: Self::NAME,
                declared: len,
                consumed,
            }));
        }
        reader.skip(len - consumed)?;

        Ok(Self {
            header,
            ansi_user_type,
            ansi_clipboard_format,
            legacy,
        })
    }

    fn read_legacy(
        reader: &mut ByteReader<'_>,
        start: usize,
        len: usize,
    ) -> Result<Option<CompObjLegacyFields>> {
        if reader.consumed_since(start) >= len {
            debug!("CompObjStream ends after the ANSI clipboard format");
            return Ok(None);
        }
        let prog_id_len = reader.peek_u32()?;
        if prog_id_len == 0 || prog_id_len > COMPOBJ_MAX_PROG_ID_LEN {
            debug!("CompObjStream ProgID length {:#x} closes the optional fields", prog_id_len);
            return Ok(None);
        }
        let ansi_prog_id = LengthPrefixedAnsiString::read(reader)?;

        let unicode_marker = reader.read_u32()?;
        if unicode_marker != COMPOBJ_UNICODE_MARKER {
            debug!("CompObjStream Unicode marker {:#x} absent", unicode_marker);
            return Ok(Some(CompObjLegacyFields {
                ansi_prog_id,
                unicode_marker,
                unicode: None,
            }));
        }

        let unicode_user_type = LengthPrefixedUnicodeString::read(reader)?;
        let format_offset = reader.position();
        let unicode_clipboard_format = ClipboardFormatOrUnicodeString::read(reader)?;
        check_format_name_len(
            unicode_clipboard_format.marker_or_length,
            &unicode_clipboard_format.format,
            format_offset,
        )?;
        let unicode_prog_id = LengthPrefixedUnicodeString::read(reader)?;

        Ok(Some(CompObjLegacyFields {
            ansi_prog_id,
            unicode_marker,
            unicode: Some(CompObjUnicodeFields {
                unicode_user_type,
                unicode_clipboard_format,
                unicode_prog_id,
            }),
        }))
    }

    /// The ANSI ProgID, if present.
    pub fn prog_id(&self) -> Option<&str> {
        self.legacy.as_ref().map(|legacy| legacy.ansi_prog_id.as_str())
    }

    /// The Unicode user type, if present.
    pub fn unicode_user_type(&self) -> Option<&str> {
        self.legacy
            .as_ref()
            .and_then(|legacy| legacy.unicode.as_ref())
            .map(|unicode| unicode.unicode_user_type.as_str())
    }
}

impl StreamRecord for CompObjStream {
    const NAME: &'static str = "CompObjStream";

    fn read_record(reader: &mut ByteReader<'_>, declared_len: usize) -> Result<Self> {
        Self::read(reader, declared_len)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn ansi(data: &mut Vec<u8>, text: &str) {
        data.extend_from_slice(&(text.len() as u32 + 1).to_le_bytes());
        data.extend_from_slice(text.as_bytes());
        data.push(0);
    }

    fn unicode(data: &mut Vec<u8>, text: &str) {
        let units: Vec<u16> = text.encode_utf16().collect();
        data.extend_from_slice(&(units.len() as u32 * 2 + 2).to_le_bytes());
        for unit in units {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        data.extend_from_slice(&[0, 0]);
    }

    /// Header, user type and clipboard format of a Word document object.
    fn prefix_bytes() -> Vec<u8> {
        let mut data = vec![0x01, 0x00, 0xFE, 0xFF, 0x03, 0x0A, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
        data.extend_from_slice(&[
            0x06, 0x09, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x46,
        ]);
        ansi(&mut data, "Microsoft Word Document");
        ansi(&mut data, "MSWordDoc");
        data
    }

    /// A complete stream with empty Unicode members.
    pub(crate) fn word_compobj_bytes() -> Vec<u8> {
        let mut data = prefix_bytes();
        ansi(&mut data, "Word.Document.8");
        data.extend_from_slice(&COMPOBJ_UNICODE_MARKER.to_le_bytes());
        data.extend_from_slice(&[0u8; 12]);
        data
    }

    #[test]
    fn test_word_compobj() {
        let data = word_compobj_bytes();
        let stream = CompObjStream::parse(&data, data.len()).unwrap();
        assert_eq!(stream.header.reserved1, 0xFFFE_0001);
        assert_eq!(stream.header.version, 0x0A03);
        assert_eq!(
            stream.header.clsid().to_string(),
            "00020906-0000-0000-C000-000000000046"
        );
        assert_eq!(stream.ansi_user_type.as_str(), "Microsoft Word Document");
        assert_eq!(stream.ansi_clipboard_format.format.registered(), Some("MSWordDoc"));
        assert_eq!(stream.prog_id(), Some("Word.Document.8"));
        let legacy = stream.legacy.as_ref().unwrap();
        assert_eq!(legacy.unicode_marker, COMPOBJ_UNICODE_MARKER);
        let unicode_fields = legacy.unicode.as_ref().unwrap();
        assert!(unicode_fields.unicode_clipboard_format.format.is_none());
        assert_eq!(stream.unicode_user_type(), Some(""));
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(std::mem::size_of::<RawCompObjHeader>(), CompObjHeader::SIZE);
    }

    #[test]
    fn test_unicode_members() {
        let mut data = prefix_bytes();
        ansi(&mut data, "Excel.Sheet.8");
        data.extend_from_slice(&COMPOBJ_UNICODE_MARKER.to_le_bytes());
        unicode(&mut data, "Microsoft Excel Worksheet");
        unicode(&mut data, "Biff8");
        unicode(&mut data, "Excel.Sheet.8");
        let stream = CompObjStream::parse(&data, data.len()).unwrap();
        let unicode_fields = stream.legacy.unwrap().unicode.unwrap();
        assert_eq!(unicode_fields.unicode_user_type.as_str(), "Microsoft Excel Worksheet");
        assert_eq!(unicode_fields.unicode_clipboard_format.format.registered(), Some("Biff8"));
        assert_eq!(unicode_fields.unicode_prog_id.as_str(), "Excel.Sheet.8");
    }

    #[test]
    fn test_stops_after_clipboard_format() {
        let data = prefix_bytes();
        let stream = CompObjStream::parse(&data, data.len()).unwrap();
        assert_eq!(stream.legacy, None);
        assert_eq!(stream.prog_id(), None);
    }

    #[test]
    fn test_zero_prog_id_length_closes_chain() {
        let mut data = prefix_bytes();
        data.extend_from_slice(&[0u8; 8]);
        let stream = CompObjStream::parse(&data, data.len()).unwrap();
        assert_eq!(stream.legacy, None);
    }

    #[test]
    fn test_long_prog_id_closes_chain() {
        let mut data = prefix_bytes();
        data.extend_from_slice(&0x29u32.to_le_bytes());
        data.extend_from_slice(&[0xAB; 12]);
        let stream = CompObjStream::parse(&data, data.len()).unwrap();
        assert_eq!(stream.legacy, None);
    }

    #[test]
    fn test_missing_unicode_marker() {
        let mut data = prefix_bytes();
        ansi(&mut data, "Paint.Picture");
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&[0xFF; 6]);
        let stream = CompObjStream::parse(&data, data.len()).unwrap();
        let legacy = stream.legacy.unwrap();
        assert_eq!(legacy.ansi_prog_id.as_str(), "Paint.Picture");
        assert_eq!(legacy.unicode_marker, 0);
        assert_eq!(legacy.unicode, None);
    }

    #[test]
    fn test_declared_length_past_buffer() {
        let data = word_compobj_bytes();
        assert!(CompObjStream::parse(&data, data.len() + 4).is_err());
    }

    #[test]
    fn test_content_longer_than_declared() {
        let data = word_compobj_bytes();
        let err = CompObjStream::parse(&data, data.len() - 4).unwrap_err();
        assert!(matches!(err.reason(), Corruption::LengthMismatch { .. }));
    }

    #[test]
    fn test_clipboard_format_name_limit() {
        let mut data = prefix_bytes();
        let name_start = data.len() - 14;
        data.truncate(name_start);
        let name = vec![b'F'; MAX_COMPOBJ_FORMAT_NAME_LEN as usize];
        data.extend_from_slice(&(name.len() as u32 + 1).to_le_bytes());
        data.extend_from_slice(&name);
        data.push(0);
        let err = CompObjStream::parse(&data, data.len()).unwrap_err();
        assert_eq!(err.offset(), name_start);
    }

    #[test]
    fn test_invalid_unicode_user_type() {
        let mut data = prefix_bytes();
        ansi(&mut data, "X.Y");
        data.extend_from_slice(&COMPOBJ_UNICODE_MARKER.to_le_bytes());
        data.extend_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(&[0x00, 0xDC, 0x00, 0x00]);
        data.extend_from_slice(&[0u8; 8]);
        assert!(matches!(
            CompObjStream::parse(&data, data.len()).unwrap_err().reason(),
            Corruption::InvalidUtf16(_)
        ));
    }
}
