//! Constants of the OLEDS record layouts.

// Standard clipboard formats (MS-OLEDS 1.3.5.1, 2.1.1)
/// Bitmap (not allowed as a presentation stream format)
pub const CF_BITMAP: u32 = 0x0000_0002;
/// Windows metafile picture
pub const CF_METAFILEPICT: u32 = 0x0000_0003;
/// Device-independent bitmap
pub const CF_DIB: u32 = 0x0000_0008;
/// Enhanced metafile
pub const CF_ENHMETAFILE: u32 = 0x0000_000E;

// ClipboardFormatOrAnsiString / ClipboardFormatOrUnicodeString markers
/// No clipboard format
pub const CLIPFORMAT_MARKER_NONE: u32 = 0x0000_0000;
/// A standard clipboard format identifier follows
pub const CLIPFORMAT_MARKER_STANDARD: u32 = 0xFFFF_FFFF;
/// A standard clipboard format identifier follows (Macintosh producers)
pub const CLIPFORMAT_MARKER_STANDARD_ALT: u32 = 0xFFFF_FFFE;

/// Longest registered clipboard format name in a presentation stream
pub const MAX_PRESENTATION_FORMAT_NAME_LEN: u32 = 0x0000_0201;
/// Longest registered clipboard format name in a CompObj stream
pub const MAX_COMPOBJ_FORMAT_NAME_LEN: u32 = 0x0000_0190;

// Presentation object class names (MS-OLEDS 2.2.3)
pub const CLASS_NAME_METAFILEPICT: &str = "METAFILEPICT";
pub const CLASS_NAME_BITMAP: &str = "BITMAP";
pub const CLASS_NAME_DIB: &str = "DIB";

/// Class names reserved for the standard presentation objects
pub const STANDARD_PRESENTATION_CLASS_NAMES: [&str; 3] =
    [CLASS_NAME_METAFILEPICT, CLASS_NAME_BITMAP, CLASS_NAME_DIB];

// PresentationObjectHeader.FormatID
pub const PRESENTATION_FORMAT_ID_NO_CLASS: u32 = 0x0000_0000;
pub const PRESENTATION_FORMAT_ID_CLASS: u32 = 0x0000_0005;

// ObjectHeader.FormatID
pub const OBJECT_FORMAT_ID_LINKED: u32 = 0x0000_0001;
pub const OBJECT_FORMAT_ID_EMBEDDED: u32 = 0x0000_0002;

// OLEStream
/// OLEStream.Version
pub const OLE_STREAM_VERSION: u32 = 0x0200_0001;
/// OLEStream.ClsidIndicator
pub const OLE_STREAM_CLSID_INDICATOR: i32 = -1;
/// Smallest MONIKERSTREAM body (its CLSID)
pub const MIN_MONIKER_STREAM_SIZE: usize = 16;

// OLEPresentationStream
/// TocSignature value that introduces TOCENTRY records ("NANI")
pub const TOC_SIGNATURE: u32 = 0x494E_414E;
/// Size of the TargetDeviceSize field itself
pub const TARGET_DEVICE_SIZE_FIELD_LEN: u32 = 4;
/// Size of the Reserved2 block after metafile presentation data
pub const METAFILE_RESERVED2_LEN: usize = 18;

// CompObjStream
/// Size of CompObjHeader
pub const COMPOBJ_HEADER_LEN: usize = 28;
/// Largest Reserved1 length that keeps the legacy fields in play
pub const COMPOBJ_MAX_PROG_ID_LEN: u32 = 0x0000_0028;
/// UnicodeMarker value that introduces the Unicode fields
pub const COMPOBJ_UNICODE_MARKER: u32 = 0x71B2_39F4;

// MetaFilePresentationObject
/// Bytes of PresentationDataSize counted by the four reserved words
pub const METAFILE_RESERVED_LEN: u32 = 8;

// DVTARGETDEVICE
/// Size of the four offset fields
pub const TARGET_DEVICE_OFFSET_TABLE_LEN: usize = 8;

// DEVMODEA
/// Length of dmDeviceName and dmFormName
pub const DEVMODE_NAME_LEN: usize = 32;

// Stream names inside an object storage (MS-OLEDS 1.3.3)
/// OLEStream
pub const OLE_STREAM_NAME: &str = "\u{1}Ole";
/// CompObjStream
pub const COMPOBJ_STREAM_NAME: &str = "\u{1}CompObj";
/// OLENativeStream
pub const NATIVE_STREAM_NAME: &str = "\u{1}Ole10Native";
/// Prefix of OLEPresentationStream names, followed by three digits
pub const PRESENTATION_STREAM_PREFIX: &str = "\u{2}OlePres";
/// Highest presentation stream index
pub const MAX_PRESENTATION_STREAM_INDEX: u16 = 999;
