//! Length-prefixed strings and clipboard-format-or-string unions
//! (MS-OLEDS 2.1.4, 2.1.5, 2.3.1, 2.3.2).

use super::consts::{
    CLIPFORMAT_MARKER_NONE, CLIPFORMAT_MARKER_STANDARD, CLIPFORMAT_MARKER_STANDARD_ALT,
};
use crate::common::{ByteReader, Corruption, Error, Result};
use serde::Serialize;

/// 8-bit string prefixed by its length in characters, terminator included.
///
/// A length of zero means the string is absent and no terminator follows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LengthPrefixedAnsiString {
    pub length: u32,
    pub string: String,
}

impl LengthPrefixedAnsiString {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let length = reader.read_u32()?;
        if length == 0 {
            return Ok(Self::default());
        }
        let string = reader.read_ansi(length as usize - 1)?;
        reader.expect_nul_u8("LengthPrefixedAnsiString")?;
        Ok(Self { length, string })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.string
    }

    /// Bytes occupied on disk, including the length field.
    pub fn encoded_len(&self) -> usize {
        4 + self.length as usize
    }
}

/// UTF-16LE string prefixed by its length in bytes, terminator included.
///
/// The length must be even; zero means absent with no terminator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LengthPrefixedUnicodeString {
    pub length: u32,
    pub string: String,
}

impl LengthPrefixedUnicodeString {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.position();
        let length = reader.read_u32()?;
        if length % 2 != 0 {
            return Err(Error::corrupted(
                start,
                Corruption::InvalidValue {
                    field: "LengthPrefixedUnicodeString length",
                    value: u64::from(length),
                },
            ));
        }
        if length == 0 {
            return Ok(Self::default());
        }
        let string = reader.read_utf16(length as usize - 2, "LengthPrefixedUnicodeString")?;
        reader.expect_nul_u16("LengthPrefixedUnicodeString")?;
        Ok(Self { length, string })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.string
    }
}

/// Decoded clipboard format: absent, a standard format id, or a registered
/// format name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ClipboardFormatOrString {
    None,
    Standard(u32),
    Registered(String),
}

impl ClipboardFormatOrString {
    pub fn is_none(&self) -> bool {
        matches!(self, ClipboardFormatOrString::None)
    }

    pub fn standard(&self) -> Option<u32> {
        match self {
            ClipboardFormatOrString::Standard(format) => Some(*format),
            _ => None,
        }
    }

    pub fn registered(&self) -> Option<&str> {
        match self {
            ClipboardFormatOrString::Registered(name) => Some(name),
            _ => None,
        }
    }
}

/// ClipboardFormatOrAnsiString: marker, then a format id or an 8-bit name of
/// `marker` characters including its terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipboardFormatOrAnsiString {
    pub marker_or_length: u32,
    pub format: ClipboardFormatOrString,
}

impl ClipboardFormatOrAnsiString {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let marker_or_length = reader.read_u32()?;
        let format = match marker_or_length {
            CLIPFORMAT_MARKER_NONE => ClipboardFormatOrString::None,
            CLIPFORMAT_MARKER_STANDARD | CLIPFORMAT_MARKER_STANDARD_ALT => {
                ClipboardFormatOrString::Standard(reader.read_u32()?)
            },
            length => {
                let name = reader.read_ansi(length as usize - 1)?;
                reader.expect_nul_u8("ClipboardFormatOrAnsiString")?;
                ClipboardFormatOrString::Registered(name)
            },
        };
        Ok(Self {
            marker_or_length,
            format,
        })
    }
}

/// ClipboardFormatOrUnicodeString: marker, then a format id or a UTF-16 name
/// of `marker` bytes including its terminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipboardFormatOrUnicodeString {
    pub marker_or_length: u32,
    pub format: ClipboardFormatOrString,
}

impl ClipboardFormatOrUnicodeString {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let start = reader.position();
        let marker_or_length = reader.read_u32()?;
        let format = match marker_or_length {
            CLIPFORMAT_MARKER_NONE => ClipboardFormatOrString::None,
            CLIPFORMAT_MARKER_STANDARD | CLIPFORMAT_MARKER_STANDARD_ALT => {
                ClipboardFormatOrString::Standard(reader.read_u32()?)
            },
            length if length % 2 != 0 => {
                return Err(Error::corrupted(
                    start,
                    Corruption::InvalidValue {
                        field: "ClipboardFormatOrUnicodeString length",
                        value: u64::from(length),
                    },
                ));
            },
            length => {
                let name =
                    reader.read_utf16(length as usize - 2, "ClipboardFormatOrUnicodeString")?;
                reader.expect_nul_u16("ClipboardFormatOrUnicodeString")?;
                ClipboardFormatOrString::Registered(name)
            },
        };
        Ok(Self {
            marker_or_length,
            format,
        })
    }
}
