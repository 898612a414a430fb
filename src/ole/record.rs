//! Top-level entry point shared by the container records.

use super::options::DecodeOptions;
use crate::common::{ByteReader, Corruption, Result};
use tracing::{debug, trace};

/// A record that occupies a whole stream of known length.
///
/// Implementors provide the cursor-level decoder; the provided `parse`
/// methods create a fresh cursor, run it and check that exactly
/// `declared_len` bytes were consumed.
pub trait StreamRecord: Sized {
    /// Record name used in diagnostics.
    const NAME: &'static str;

    /// Decode the record at the cursor. `declared_len` is the length of the
    /// stream the record fills.
    fn read_record(reader: &mut ByteReader<'_>, declared_len: usize) -> Result<Self>;

    /// Decode `data` with default options.
    ///
    /// # Examples
    ///
    /// ```
    /// use oleds::{OleNativeStream, StreamRecord};
    ///
    /// let data = [0x03, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03];
    /// let native = OleNativeStream::parse(&data, data.len()).unwrap();
    /// assert_eq!(native.native_data, vec![1, 2, 3]);
    /// ```
    fn parse(data: &[u8], declared_len: usize) -> Result<Self> {
        Self::parse_with_options(data, declared_len, &DecodeOptions::default())
    }

    /// Decode `data` with explicit options.
    fn parse_with_options(
        data: &[u8],
        declared_len: usize,
        options: &DecodeOptions,
    ) -> Result<Self> {
        trace!("Decoding {} ({} bytes declared)", Self::NAME, declared_len);
        let mut reader = ByteReader::with_options(data, *options);
        let result = Self::read_record(&mut reader, declared_len).and_then(|record| {
            let consumed = reader.position();
            if consumed != declared_len {
                return Err(reader.corrupted(Corruption::LengthMismatch {
                    record: Self::NAME,
                    declared: declared_len,
                    consumed,
                }));
            }
            Ok(record)
        });
        if let Err(e) = &result {
            debug!("Rejected {}: {}", Self::NAME, e);
        }
        result
    }
}
