//! Codepage decoding utilities for 8-bit ANSI strings
//!
//! OLEDS stores most names (class names, user types, driver names) as 8-bit
//! ANSI text in the code page of the producing system. This module maps a
//! Windows code page identifier to an `encoding_rs` encoding and converts the
//! bytes to UTF-8.

use encoding_rs::Encoding;

/// Code page used when none is configured or the configured one is unknown.
pub const DEFAULT_ANSI_CODEPAGE: u32 = 1252;

/// Decode 8-bit ANSI bytes using the specified Windows codepage
///
/// Unknown code pages fall back to Windows-1252, so decoding never fails;
/// unmappable bytes become U+FFFD. The bytes must not include the terminator.
///
/// # Examples
///
/// ```
/// use oleds::ole::codepage::decode_ansi;
///
/// assert_eq!(decode_ansi(b"Paint.Picture", 1252), "Paint.Picture");
/// assert_eq!(decode_ansi(b"caf\xE9", 1252), "caf\u{e9}");
/// assert_eq!(decode_ansi(b"caf\xE9", 99999), "caf\u{e9}");
/// ```
#[inline]
pub fn decode_ansi(bytes: &[u8], codepage: u32) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    let encoding = codepage_to_encoding(codepage).unwrap_or(encoding_rs::WINDOWS_1252);
    encoding.decode_without_bom_handling(bytes).0.into_owned()
}

/// Strip everything from the first null byte onwards
///
/// Fixed-size name fields (such as `dmDeviceName`) are null-padded.
#[inline]
pub fn strip_null_terminators(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

/// Map Windows codepage identifier to encoding_rs Encoding
///
/// Returns `None` for identifiers without an `encoding_rs` counterpart.
#[inline]
pub fn codepage_to_encoding(codepage: u32) -> Option<&'static Encoding> {
    match codepage {
        // DOS codepages
        866 => Some(encoding_rs::IBM866), // Cyrillic (DOS)

        // Windows codepages (Western scripts)
        874 => Some(encoding_rs::WINDOWS_874),   // Thai
        1250 => Some(encoding_rs::WINDOWS_1250), // Central European
        1251 => Some(encoding_rs::WINDOWS_1251), // Cyrillic
        1252 => Some(encoding_rs::WINDOWS_1252), // Western European (most common)
        1253 => Some(encoding_rs::WINDOWS_1253), // Greek
        1254 => Some(encoding_rs::WINDOWS_1254), // Turkish
        1255 => Some(encoding_rs::WINDOWS_1255), // Hebrew
        1256 => Some(encoding_rs::WINDOWS_1256), // Arabic
        1257 => Some(encoding_rs::WINDOWS_1257), // Baltic
        1258 => Some(encoding_rs::WINDOWS_1258), // Vietnamese

        // East Asian codepages
        932 => Some(encoding_rs::SHIFT_JIS), // Japanese Shift-JIS
        936 => Some(encoding_rs::GBK),       // Simplified Chinese (GB2312/GBK)
        949 => Some(encoding_rs::EUC_KR),    // Korean
        950 => Some(encoding_rs::BIG5),      // Traditional Chinese (Big5)

        // Macintosh
        10000 => Some(encoding_rs::MACINTOSH), // Macintosh Roman

        65001 => Some(encoding_rs::UTF_8),

        _ => None,
    }
}

/// Decode UTF-16LE bytes to a String, rejecting unpaired surrogates
///
/// The input must have an even length and must not include the terminator.
/// Returns `None` if the text is not valid UTF-16.
///
/// # Examples
///
/// ```
/// use oleds::ole::codepage::decode_utf16le;
///
/// assert_eq!(decode_utf16le(b"H\x00i\x00").as_deref(), Some("Hi"));
/// assert_eq!(decode_utf16le(b"\x00\xD8"), None);
/// ```
pub fn decode_utf16le(bytes: &[u8]) -> Option<String> {
    let units = bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .ok()
}
