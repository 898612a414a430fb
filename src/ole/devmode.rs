//! DEVMODEA (MS-OLEDS 2.1.7 / MS-RPRN 2.2.2.1): printer initialization
//! data embedded in a target device record.
//!
//! The `fields` bitmask decides which optional members are present. Absent
//! members occupy no bytes, so every member is read behind an explicit
//! membership test and in the fixed layout order.

use super::codepage::{decode_ansi, strip_null_terminators};
use super::consts::DEVMODE_NAME_LEN;
use super::options::CollateGate;
use crate::common::{ByteReader, Result};
use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// `dmFields`: which optional DEVMODEA members are initialized.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(transparent)]
    pub struct DevModeFields: u32 {
        /// dmICMIntent
        const ICM_INTENT = 1 << 0;
        /// dmMediaType
        const MEDIA_TYPE = 1 << 1;
        /// dmDitherType
        const DITHER_TYPE = 1 << 2;
        /// dmFormName
        const FORM_NAME = 1 << 8;
        /// dmICMMethod
        const ICM_METHOD = 1 << 15;
        /// dmCopies
        const COPIES = 1 << 16;
        /// dmDefaultSource
        const DEFAULT_SOURCE = 1 << 17;
        /// dmPrintQuality
        const PRINT_QUALITY = 1 << 18;
        /// dmColor
        const COLOR = 1 << 19;
        /// dmDuplex
        const DUPLEX = 1 << 20;
        /// dmYResolution
        const Y_RESOLUTION = 1 << 21;
        /// dmTTOption
        const TT_OPTION = 1 << 22;
        /// dmCollate
        const COLLATE = 1 << 23;
        /// dmOrientation
        const ORIENTATION = 1 << 24;
        /// dmPaperSize
        const PAPER_SIZE = 1 << 25;
        /// dmPaperLength
        const PAPER_LENGTH = 1 << 26;
        /// dmPaperWidth
        const PAPER_WIDTH = 1 << 27;
        /// dmScale
        const SCALE = 1 << 28;
        /// dmNup
        const NUP = 1 << 30;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorMode {
    Monochrome,
    Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DuplexMode {
    Simplex,
    Vertical,
    Horizontal,
}

/// Device-independent print quality levels (negative DPI values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrintQuality {
    High,
    Medium,
    Low,
    Draft,
}

/// How TrueType fonts are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrueTypeOption {
    Bitmap,
    Download,
    Subdevice,
    DownloadOutline,
}

/// DEVMODEA structure. Optional members are `None` when their `fields` bit
/// is clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevModeA {
    pub device_name: String,
    pub form_name: String,
    pub spec_version: u16,
    pub driver_version: u16,
    pub size: u16,
    pub driver_extra: u16,
    pub fields: DevModeFields,
    pub orientation: Option<u16>,
    pub paper_size: Option<u16>,
    pub paper_length: Option<u16>,
    pub paper_width: Option<u16>,
    pub scale: Option<u16>,
    pub copies: Option<u16>,
    pub default_source: Option<u16>,
    pub print_quality: Option<u16>,
    pub color: Option<u16>,
    pub duplex: Option<u16>,
    pub y_resolution: Option<u16>,
    pub tt_option: Option<u16>,
    pub collate: Option<u16>,
    pub reserved0: u16,
    pub reserved1: u32,
    pub reserved2: u32,
    pub reserved3: u32,
    pub nup: Option<u32>,
    pub reserved4: u32,
    pub icm_method: Option<u32>,
    pub icm_intent: Option<u32>,
    pub media_type: Option<u32>,
    pub dither_type: Option<u32>,
    pub reserved5: u32,
    pub reserved6: u32,
    pub reserved7: u32,
    pub reserved8: u32,
}

/// Read a fixed-width, null-padded name field.
fn read_name(reader: &mut ByteReader<'_>) -> Result<String> {
    let codepage = reader.options().ansi_codepage;
    let raw = reader.read_bytes(DEVMODE_NAME_LEN)?;
    Ok(decode_ansi(strip_null_terminators(raw), codepage))
}

fn read_u16_if(reader: &mut ByteReader<'_>, present: bool) -> Result<Option<u16>> {
    if present { reader.read_u16().map(Some) } else { Ok(None) }
}

fn read_u32_if(reader: &mut ByteReader<'_>, present: bool) -> Result<Option<u32>> {
    if present { reader.read_u32().map(Some) } else { Ok(None) }
}

impl DevModeA {
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        let device_name = read_name(reader)?;
        let form_name = read_name(reader)?;
        let spec_version = reader.read_u16()?;
        let driver_version = reader.read_u16()?;
        let size = reader.read_u16()?;
        let driver_extra = reader.read_u16()?;
        let fields = DevModeFields::from_bits_retain(reader.read_u32()?);
        let has = |flag: DevModeFields| fields.contains(flag);

        let collate_flag = match reader.options().collate_gate {
            CollateGate::Collate => DevModeFields::COLLATE,
            CollateGate::TrueTypeOption => DevModeFields::TT_OPTION,
        };

        let orientation = read_u16_if(reader, has(DevModeFields::ORIENTATION))?;
        let paper_size = read_u16_if(reader, has(DevModeFields::PAPER_SIZE))?;
        let paper_length = read_u16_if(reader, has(DevModeFields::PAPER_LENGTH))?;
        let paper_width = read_u16_if(reader, has(DevModeFields::PAPER_WIDTH))?;
        let scale = read_u16_if(reader, has(DevModeFields::SCALE))?;
        let copies = read_u16_if(reader, has(DevModeFields::COPIES))?;
        let default_source = read_u16_if(reader, has(DevModeFields::DEFAULT_SOURCE))?;
        let print_quality = read_u16_if(reader, has(DevModeFields::PRINT_QUALITY))?;
        let color = read_u16_if(reader, has(DevModeFields::COLOR))?;
        let duplex = read_u16_if(reader, has(DevModeFields::DUPLEX))?;
        let y_resolution = read_u16_if(reader, has(DevModeFields::Y_RESOLUTION))?;
        let tt_option = read_u16_if(reader, has(DevModeFields::TT_OPTION))?;
        let collate = read_u16_if(reader, has(collate_flag))?;
        let reserved0 = reader.read_u16()?;
        let reserved1 = reader.read_u32()?;
        let reserved2 = reader.read_u32()?;
        let reserved3 = reader.read_u32()?;
        let nup = read_u32_if(reader, has(DevModeFields::NUP))?;
        let reserved4 = reader.read_u32()?;
        let icm_method = read_u32_if(reader, has(DevModeFields::ICM_METHOD))?;
        let icm_intent = read_u32_if(reader, has(DevModeFields::ICM_INTENT))?;
        let media_type = read_u32_if(reader, has(DevModeFields::MEDIA_TYPE))?;
        let dither_type = read_u32_if(reader, has(DevModeFields::DITHER_TYPE))?;

        Ok(Self {
            device_name,
            form_name,
            spec_version,
            driver_version,
            size,
            driver_extra,
            fields,
            orientation,
            paper_size,
            paper_length,
            paper_width,
            scale,
            copies,
            default_source,
            print_quality,
            color,
            duplex,
            y_resolution,
            tt_option,
            collate,
            reserved0,
            reserved1,
            reserved2,
            reserved3,
            nup,
            reserved4,
            icm_method,
            icm_intent,
            media_type,
            dither_type,
            reserved5: reader.read_u32()?,
            reserved6: reader.read_u32()?,
            reserved7: reader.read_u32()?,
            reserved8: reader.read_u32()?,
        })
    }

    pub fn orientation_mode(&self) -> Option<Orientation> {
        match self.orientation? {
            1 => Some(Orientation::Portrait),
            2 => Some(Orientation::Landscape),
            _ => None,
        }
    }

    pub fn color_mode(&self) -> Option<ColorMode> {
        match self.color? {
            1 => Some(ColorMode::Monochrome),
            2 => Some(ColorMode::Color),
            _ => None,
        }
    }

    pub fn duplex_mode(&self) -> Option<DuplexMode> {
        match self.duplex? {
            1 => Some(DuplexMode::Simplex),
            2 => Some(DuplexMode::Vertical),
            3 => Some(DuplexMode::Horizontal),
            _ => None,
        }
    }

    /// Print quality level, or `None` when the value is a positive DPI.
    pub fn print_quality_level(&self) -> Option<PrintQuality> {
        match self.print_quality? {
            0xFFFC => Some(PrintQuality::High),
            0xFFFD => Some(PrintQuality::Medium),
            0xFFFE => Some(PrintQuality::Low),
            0xFFFF => Some(PrintQuality::Draft),
            _ => None,
        }
    }

    pub fn true_type_option(&self) -> Option<TrueTypeOption> {
        match self.tt_option? {
            1 => Some(TrueTypeOption::Bitmap),
            2 => Some(TrueTypeOption::Download),
            3 => Some(TrueTypeOption::Subdevice),
            4 => Some(TrueTypeOption::DownloadOutline),
            _ => None,
        }
    }

    pub fn collates(&self) -> Option<bool> {
        match self.collate? {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ole::options::DecodeOptions;

    fn name_field(name: &str) -> Vec<u8> {
        let mut field = name.as_bytes().to_vec();
        field.resize(DEVMODE_NAME_LEN, 0);
        field
    }

    /// Encode a DEVMODEA with the given fields. Every present u16 member is
    /// `0x0100 + index`, every present u32 member `0x0001_0000 + index`.
    pub(crate) fn devmode_bytes(fields: DevModeFields) -> Vec<u8> {
        let mut data = name_field("HP LaserJet");
        data.extend_from_slice(&name_field("A4"));
        data.extend_from_slice(&0x0401u16.to_le_bytes());
        data.extend_from_slice(&0x0600u16.to_le_bytes());
        data.extend_from_slice(&0x009Cu16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&fields.bits().to_le_bytes());
        let short_members = [
            DevModeFields::ORIENTATION,
            DevModeFields::PAPER_SIZE,
            DevModeFields::PAPER_LENGTH,
            DevModeFields::PAPER_WIDTH,
            DevModeFields::SCALE,
            DevModeFields::COPIES,
            DevModeFields::DEFAULT_SOURCE,
            DevModeFields::PRINT_QUALITY,
            DevModeFields::COLOR,
            DevModeFields::DUPLEX,
            DevModeFields::Y_RESOLUTION,
            DevModeFields::TT_OPTION,
            DevModeFields::COLLATE,
        ];
        for (i, flag) in short_members.into_iter().enumerate() {
            if fields.contains(flag) {
                data.extend_from_slice(&(0x0100 + i as u16).to_le_bytes());
            }
        }
        data.extend_from_slice(&[0u8; 14]);
        if fields.contains(DevModeFields::NUP) {
            data.extend_from_slice(&0x0001_0000u32.to_le_bytes());
        }
        data.extend_from_slice(&[0u8; 4]);
        let long_members = [
            DevModeFields::ICM_METHOD,
            DevModeFields::ICM_INTENT,
            DevModeFields::MEDIA_TYPE,
            DevModeFields::DITHER_TYPE,
        ];
        for (i, flag) in long_members.into_iter().enumerate() {
            if fields.contains(flag) {
                data.extend_from_slice(&(0x0001_0001 + i as u32).to_le_bytes());
            }
        }
        data.extend_from_slice(&[0u8; 16]);
        data
    }

    #[test]
    fn test_no_optional_fields() {
        let data = devmode_bytes(DevModeFields::empty());
        let mut reader = ByteReader::new(&data);
        let devmode = DevModeA::read(&mut reader).unwrap();
        assert_eq!(devmode.device_name, "HP LaserJet");
        assert_eq!(devmode.form_name, "A4");
        assert_eq!(devmode.spec_version, 0x0401);
        assert_eq!(devmode.size, 0x009C);
        assert_eq!(devmode.orientation, None);
        assert_eq!(devmode.nup, None);
        assert_eq!(devmode.dither_type, None);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(data.len(), 32 + 32 + 8 + 4 + 14 + 4 + 16);
    }

    #[test]
    fn test_all_optional_fields_in_order() {
        let data = devmode_bytes(DevModeFields::all());
        let mut reader = ByteReader::new(&data);
        let devmode = DevModeA::read(&mut reader).unwrap();
        assert_eq!(devmode.orientation, Some(0x0100));
        assert_eq!(devmode.paper_size, Some(0x0101));
        assert_eq!(devmode.scale, Some(0x0104));
        assert_eq!(devmode.y_resolution, Some(0x010A));
        assert_eq!(devmode.tt_option, Some(0x010B));
        assert_eq!(devmode.collate, Some(0x010C));
        assert_eq!(devmode.nup, Some(0x0001_0000));
        assert_eq!(devmode.icm_method, Some(0x0001_0001));
        assert_eq!(devmode.dither_type, Some(0x0001_0004));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_sparse_fields_shift_following_members() {
        let fields = DevModeFields::ORIENTATION | DevModeFields::DUPLEX | DevModeFields::MEDIA_TYPE;
        let data = devmode_bytes(fields);
        let mut reader = ByteReader::new(&data);
        let devmode = DevModeA::read(&mut reader).unwrap();
        assert_eq!(devmode.orientation, Some(0x0100));
        assert_eq!(devmode.paper_size, None);
        assert_eq!(devmode.duplex, Some(0x0109));
        assert_eq!(devmode.media_type, Some(0x0001_0003));
        assert_eq!(devmode.icm_intent, None);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_collate_follows_configured_gate() {
        let data = devmode_bytes(DevModeFields::TT_OPTION | DevModeFields::COLLATE);
        let devmode = DevModeA::read(&mut ByteReader::new(&data)).unwrap();
        assert_eq!(devmode.collate, Some(0x010C));

        // Collate bit without TrueType option
        let mut data = devmode_bytes(DevModeFields::COLLATE);
        let devmode = DevModeA::read(&mut ByteReader::new(&data)).unwrap();
        assert_eq!(devmode.collate, Some(0x010C));
        let options = DecodeOptions::default().with_collate_gate(CollateGate::TrueTypeOption);
        let legacy = DevModeA::read(&mut ByteReader::with_options(&data, options)).unwrap();
        assert_eq!(legacy.collate, None);
        assert_eq!(legacy.reserved0, 0x010C);

        // TrueType option without collate bit
        data = devmode_bytes(DevModeFields::TT_OPTION);
        data.extend_from_slice(&[0u8; 2]);
        let legacy = DevModeA::read(&mut ByteReader::with_options(&data, options)).unwrap();
        assert_eq!(legacy.collate, Some(0));
    }

    #[test]
    fn test_value_helpers() {
        let data = devmode_bytes(DevModeFields::empty());
        let mut devmode = DevModeA::read(&mut ByteReader::new(&data)).unwrap();
        assert_eq!(devmode.orientation_mode(), None);
        devmode.orientation = Some(2);
        devmode.color = Some(1);
        devmode.duplex = Some(3);
        devmode.print_quality = Some(0xFFFD);
        devmode.tt_option = Some(4);
        devmode.collate = Some(1);
        assert_eq!(devmode.orientation_mode(), Some(Orientation::Landscape));
        assert_eq!(devmode.color_mode(), Some(ColorMode::Monochrome));
        assert_eq!(devmode.duplex_mode(), Some(DuplexMode::Horizontal));
        assert_eq!(devmode.print_quality_level(), Some(PrintQuality::Medium));
        assert_eq!(devmode.true_type_option(), Some(TrueTypeOption::DownloadOutline));
        assert_eq!(devmode.collates(), Some(true));
        devmode.print_quality = Some(600);
        assert_eq!(devmode.print_quality_level(), None);
    }

    #[test]
    fn test_truncated() {
        let data = devmode_bytes(DevModeFields::all());
        let mut reader = ByteReader::new(&data[..data.len() - 1]);
        assert!(DevModeA::read(&mut reader).is_err());
    }
}
