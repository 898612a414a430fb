//! OLENativeStream (MS-OLEDS 2.3.6): native data of an OLE 1.0 object
//! converted to a storage.

use super::record::StreamRecord;
use crate::common::{ByteReader, Corruption, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OleNativeStream {
    pub native_data_size: u32,
    pub native_data: Vec<u8>,
}

impl OleNativeStream {
    /// Read a native stream occupying exactly `len` bytes.
    pub fn read(reader: &mut ByteReader<'_>, len: usize) -> Result<Self> {
        if len < 4 {
            return Err(reader.corrupted(Corruption::InvalidValue {
                field: "OLENativeStream length",
                value: len as u64,
            }));
        }
        let start = reader.position();
        let native_data_size = reader.read_u32()?;
        let native_data = reader.read_bytes(native_data_size as usize)?.to_vec();
        let consumed = reader.consumed_since(start);
        if consumed != len {
            return Err(reader.corrupted(Corruption::LengthMismatch {
                record: Self::NAME,
                declared: len,
                consumed,
            }));
        }
        Ok(Self {
            native_data_size,
            native_data,
        })
    }
}

impl StreamRecord for OleNativeStream {
    const NAME: &'static str = "OLENativeStream";

    fn read_record(reader: &mut ByteReader<'_>, declared_len: usize) -> Result<Self> {
        Self::read(reader, declared_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_stream() {
        let data = [0x03, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03];
        let mut reader = ByteReader::new(&data);
        let native = OleNativeStream::read(&mut reader, data.len()).unwrap();
        assert_eq!(native.native_data_size, 3);
        assert_eq!(native.native_data, vec![0x01, 0x02, 0x03]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_native_stream_too_short() {
        let data = [0x00, 0x00, 0x00];
        assert!(OleNativeStream::parse(&data, 3).is_err());
    }

    #[test]
    fn test_native_stream_size_disagrees_with_length() {
        let data = [0x02, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03];
        let err = OleNativeStream::parse(&data, data.len()).unwrap_err();
        assert_eq!(
            err.reason(),
            &Corruption::LengthMismatch {
                record: "OLENativeStream",
                declared: 7,
                consumed: 6
            }
        );
    }

    #[test]
    fn test_native_stream_truncated() {
        let data = [0x03, 0x00, 0x00, 0x00, 0x01, 0x02];
        assert!(OleNativeStream::parse(&data, 7).is_err());
    }

    #[test]
    fn test_native_stream_empty_payload() {
        let native = OleNativeStream::parse(&[0u8; 4], 4).unwrap();
        assert!(native.native_data.is_empty());
    }
}
