//! DVTARGETDEVICE (MS-OLEDS 2.1.6): the device a presentation was rendered
//! for.
//!
//! The record starts with four offsets, relative to the record start, to
//! its variable members. A zero offset means the member is absent. Offsets
//! are untrusted: each is bounds-checked against the offset table, the
//! declared record length and the buffer before the cursor moves there.

use super::consts::TARGET_DEVICE_OFFSET_TABLE_LEN;
use super::devmode::DevModeA;
use crate::common::{ByteReader, Corruption, Error, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DvTargetDevice {
    pub driver_name_offset: u16,
    pub device_name_offset: u16,
    pub port_name_offset: u16,
    pub ext_dev_mode_offset: u16,
    pub driver_name: Option<String>,
    pub device_name: Option<String>,
    pub port_name: Option<String>,
    pub ext_dev_mode: Option<DevModeA>,
}

/// Bounds of one DVTARGETDEVICE record inside the cursor's buffer.
struct RecordBounds {
    start: usize,
    len: usize,
}

impl RecordBounds {
    /// Move the cursor to the member at `offset`, or return `false` when the
    /// offset is zero.
    fn seek_member(
        &self,
        reader: &mut ByteReader<'_>,
        offset: u16,
        field: &'static str,
    ) -> Result<bool> {
        if offset == 0 {
            return Ok(false);
        }
        let target = self.start + usize::from(offset);
        let table_end = self.start + TARGET_DEVICE_OFFSET_TABLE_LEN;
        if target < table_end || target >= self.start + self.len || target >= reader.len() {
            return Err(Error::corrupted(
                reader.position(),
                Corruption::OffsetOutOfBounds {
                    field,
                    offset,
                    record_len: self.len,
                },
            ));
        }
        reader.seek(target)?;
        Ok(true)
    }

    fn read_name(
        &self,
        reader: &mut ByteReader<'_>,
        offset: u16,
        field: &'static str,
    ) -> Result<Option<String>> {
        if self.seek_member(reader, offset, field)? {
            reader.read_ansi_z(field).map(Some)
        } else {
            Ok(None)
        }
    }
}

impl DvTargetDevice {
    /// Read a record occupying exactly `len` bytes.
    pub fn read(reader: &mut ByteReader<'_>, len: usize) -> Result<Self> {
        let bounds = RecordBounds {
            start: reader.position(),
            len,
        };
        let driver_name_offset = reader.read_u16()?;
        let device_name_offset = reader.read_u16()?;
        let port_name_offset = reader.read_u16()?;
        let ext_dev_mode_offset = reader.read_u16()?;

        let driver_name = bounds.read_name(reader, driver_name_offset, "DriverNameOffSet")?;
        let device_name = bounds.read_name(reader, device_name_offset, "DeviceNameOffSet")?;
        let port_name = bounds.read_name(reader, port_name_offset, "PortNameOffSet")?;
        let ext_dev_mode = if bounds.seek_member(reader, ext_dev_mode_offset, "ExtDevModeOffSet")? {
            Some(DevModeA::read(reader)?)
        } else {
            None
        };

        let consumed = reader.consumed_since(bounds.start);
        if consumed != len {
            return Err(reader.corrupted(Corruption::LengthMismatch {
                record: "DVTARGETDEVICE",
                declared: len,
                consumed,
            }));
        }

        Ok(Self {
            driver_name_offset,
            device_name_offset,
            port_name_offset,
            ext_dev_mode_offset,
            driver_name,
            device_name,
            port_name,
            ext_dev_mode,
        })
    }
}
