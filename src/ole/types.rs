//! Fixed-layout primitives referenced by the OLEDS records: the packetized
//! CLSID (MS-OLEDS 2.1.2) and FILETIME (MS-OLEDS 2.1.3).

use crate::common::{ByteReader, Result};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use zerocopy::{LE, U16, U32};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// On-disk GUID packet (16 bytes)
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawGuid {
    data1: U32<LE>,
    data2: U16<LE>,
    data3: U16<LE>,
    data4: [u8; 8],
}

/// A class identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Clsid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Clsid {
    /// Read a 16-byte CLSID packet.
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let raw: RawGuid = reader.read_value()?;
        Ok(Self {
            data1: raw.data1.get(),
            data2: raw.data2.get(),
            data3: raw.data3.get(),
            data4: raw.data4,
        })
    }

    /// Interpret 16 bytes as a CLSID packet.
    pub fn from_bytes(bytes: &[u8; 16]) -> Self {
        let mut data4 = [0u8; 8];
        data4.copy_from_slice(&bytes[8..16]);
        Self {
            data1: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            data2: u16::from_le_bytes([bytes[4], bytes[5]]),
            data3: u16::from_le_bytes([bytes[6], bytes[7]]),
            data4,
        }
    }

    /// Whether every byte is zero.
    pub fn is_nil(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Clsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl Serialize for Clsid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Seconds between 1601-01-01 and the Unix epoch
const FILETIME_UNIX_EPOCH_SECS: i64 = 11_644_473_600;
/// FILETIME ticks per second (100ns resolution)
const FILETIME_TICKS_PER_SEC: u64 = 10_000_000;

/// A FILETIME: 100-nanosecond intervals since 1601-01-01 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct FileTime {
    pub low_date_time: u32,
    pub high_date_time: u32,
}

impl FileTime {
    /// Read the low then high 32-bit words.
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let low_date_time = reader.read_u32()?;
        let high_date_time = reader.read_u32()?;
        Ok(Self {
            low_date_time,
            high_date_time,
        })
    }

    /// Combined 64-bit tick count.
    pub fn ticks(&self) -> u64 {
        u64::from(self.low_date_time) | (u64::from(self.high_date_time) << 32)
    }

    /// Convert to a UTC timestamp. Zero means "not set" and yields `None`.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let ticks = self.ticks();
        if ticks == 0 {
            return None;
        }
        let secs = (ticks / FILETIME_TICKS_PER_SEC) as i64 - FILETIME_UNIX_EPOCH_SECS;
        let nanos = ((ticks % FILETIME_TICKS_PER_SEC) * 100) as u32;
        DateTime::from_timestamp(secs, nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_clsid_display() {
        let bytes = [
            0x03, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xC0, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x46,
        ];
        let mut reader = ByteReader::new(&bytes);
        let clsid = Clsid::read(&mut reader).unwrap();
        assert_eq!(clsid.to_string(), "00000303-0000-0000-C000-000000000046");
        assert_eq!(clsid, Clsid::from_bytes(&bytes));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_clsid_truncated() {
        let mut reader = ByteReader::new(&[0u8; 15]);
        assert!(Clsid::read(&mut reader).is_err());
    }

    #[test]
    fn test_clsid_nil() {
        assert!(Clsid::from_bytes(&[0u8; 16]).is_nil());
    }

    #[test]
    fn test_filetime_to_datetime() {
        let time = FileTime {
            low_date_time: 0x26444EF0,
            high_date_time: 0x01C8AFC8,
        };
        let dt = time.to_datetime().unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2008, 5, 6));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (22, 25, 55));
    }

    #[test]
    fn test_filetime_zero() {
        assert_eq!(FileTime::default().to_datetime(), None);
    }
}
