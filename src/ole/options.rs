//! Decoder configuration.

use super::codepage::DEFAULT_ANSI_CODEPAGE;

/// Which `dmFields` bit controls the presence of `dmCollate` in a DEVMODEA
/// record.
///
/// The DEVMODE layout assigns collate its own bit (`DM_COLLATE`). Some
/// producers read it behind the TrueType-option bit instead; choose
/// [`CollateGate::TrueTypeOption`] to stay byte-compatible with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollateGate {
    /// Read `dmCollate` when `DM_COLLATE` is set
    #[default]
    Collate,
    /// Read `dmCollate` when `DM_TTOPTION` is set
    TrueTypeOption,
}

/// Options shared by every decoder in one decode call tree.
///
/// # Examples
///
/// ```
/// use oleds::ole::{CollateGate, DecodeOptions};
///
/// let options = DecodeOptions::default()
///     .with_ansi_codepage(1251)
///     .with_collate_gate(CollateGate::TrueTypeOption);
/// assert_eq!(options.ansi_codepage, 1251);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Windows code page of 8-bit ANSI strings
    pub ansi_codepage: u32,
    /// Gate for the DEVMODEA collate field
    pub collate_gate: CollateGate,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            ansi_codepage: DEFAULT_ANSI_CODEPAGE,
            collate_gate: CollateGate::default(),
        }
    }
}

impl DecodeOptions {
    /// Set the code page used for ANSI strings.
    pub fn with_ansi_codepage(mut self, codepage: u32) -> Self {
        self.ansi_codepage = codepage;
        self
    }

    /// Set the DEVMODEA collate gate.
    pub fn with_collate_gate(mut self, gate: CollateGate) -> Self {
        self.collate_gate = gate;
        self
    }
}
