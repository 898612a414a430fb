//! OLE 1.0 embedded and linked objects (MS-OLEDS 2.2.5, 2.2.6).

use super::header::{ObjectFormat, ObjectHeader};
use super::presentation::PresentationObject;
use super::record::StreamRecord;
use super::strings::LengthPrefixedAnsiString;
use crate::common::{ByteReader, Result};
use serde::Serialize;

/// An object whose native data is stored in the container document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedObject {
    pub header: ObjectHeader,
    pub native_data_size: u32,
    pub native_data: Vec<u8>,
    pub presentation: PresentationObject,
}

impl EmbeddedObject {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let header = ObjectHeader::read_expecting(reader, ObjectFormat::Embedded)?;
        let native_data_size = reader.read_u32()?;
        let native_data = reader.read_bytes(native_data_size as usize)?.to_vec();
        let presentation = PresentationObject::read(reader)?;
        Ok(Self {
            header,
            native_data_size,
            native_data,
            presentation,
        })
    }
}

impl StreamRecord for EmbeddedObject {
    const NAME: &'static str = "EmbeddedObject";

    fn read_record(reader: &mut ByteReader<'_>, _declared_len: usize) -> Result<Self> {
        Self::read(reader)
    }
}

/// An object that references its source by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedObject {
    pub header: ObjectHeader,
    /// UNC form of the topic path when it lives on a remote drive
    pub network_name: LengthPrefixedAnsiString,
    pub link_update_option: u32,
    pub presentation: PresentationObject,
}

impl LinkedObject {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let header = ObjectHeader::read_expecting(reader, ObjectFormat::Linked)?;
        let network_name = LengthPrefixedAnsiString::read(reader)?;
        let link_update_option = reader.read_u32()?;
        let presentation = PresentationObject::read(reader)?;
        Ok(Self {
            header,
            network_name,
            link_update_option,
            presentation,
        })
    }

    /// Path of the linked source file.
    pub fn topic(&self) -> &str {
        self.header.topic_name.as_str()
    }
}

impl StreamRecord for LinkedObject {
    const NAME: &'static str = "LinkedObject";

    fn read_record(reader: &mut ByteReader<'_>, _declared_len: usize) -> Result<Self> {
        Self::read(reader)
    }
}
