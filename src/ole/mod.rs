/// Constants of the OLEDS format
pub mod consts;

/// Code page handling for 8-bit strings
pub mod codepage;

/// Decoder configuration
mod options;

/// Class identifier and file time collaborators
pub mod types;

/// Length-prefixed strings and clipboard format unions
pub mod strings;

/// OLE 1.0 object and presentation headers
pub mod header;

/// OLE 1.0 presentation objects
pub mod presentation;

/// Top-level stream decoding trait
mod record;

/// OLE 1.0 native data stream
pub mod native;

/// OLE 1.0 embedded and linked objects
pub mod object;

/// OLEStream link-tracking record
pub mod ole_stream;

/// DEVMODEA printer settings
pub mod devmode;

/// DVTARGETDEVICE target device record
pub mod target_device;

/// OLEPresentationStream and its table of contents
pub mod presentation_stream;

/// CompObjStream compatibility record
pub mod compobj;

/// Loading every OLEDS stream of an object storage
pub mod storage;

// Re-export public types for convenient access
pub use compobj::{CompObjHeader, CompObjLegacyFields, CompObjStream, CompObjUnicodeFields};
pub use devmode::{
    ColorMode, DevModeA, DevModeFields, DuplexMode, Orientation, PrintQuality, TrueTypeOption,
};
pub use header::{ClipboardFormatHeader, ObjectFormat, ObjectHeader, PresentationObjectHeader};
pub use native::OleNativeStream;
pub use object::{EmbeddedObject, LinkedObject};
pub use ole_stream::{LinkSource, MonikerStream, OleStream, OleStreamFlags};
pub use options::{CollateGate, DecodeOptions};
pub use presentation::{
    BitmapPresentationObject, DibPresentationObject, GenericPresentationObject,
    MetaFilePresentationObject, PresentationObject, RegisteredClipboardFormatPresentationObject,
    StandardClipboardFormatPresentationObject, StandardPresentationObject,
};
pub use presentation_stream::{OlePresentationStream, TocEntry};
pub use record::StreamRecord;
pub use storage::{
    ObjectStorage, StreamSource, parse_presentation_stream_index, presentation_stream_name,
};
pub use strings::{
    ClipboardFormatOrAnsiString, ClipboardFormatOrString, ClipboardFormatOrUnicodeString,
    LengthPrefixedAnsiString, LengthPrefixedUnicodeString,
};
pub use target_device::DvTargetDevice;
pub use types::{Clsid, FileTime};
