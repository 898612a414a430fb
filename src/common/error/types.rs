//! Unified error types for the OLEDS decoders.
//!
//! Every structural violation is reported through the single
//! [`Error::Corrupted`] kind. The attached [`Corruption`] explains what was
//! wrong and is meant for diagnostics only; callers should discard the whole
//! record on any failure.
use thiserror::Error;

/// Main error type for OLEDS decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The bytes do not conform to the object-embedding format
    #[error("Corrupted OLE data at offset {offset:#x}: {reason}")]
    Corrupted {
        /// Cursor position at which the violation was detected
        offset: usize,
        /// What was wrong
        reason: Corruption,
    },
}

impl Error {
    /// Shorthand used by the decoders.
    #[inline]
    pub(crate) fn corrupted(offset: usize, reason: Corruption) -> Self {
        Error::Corrupted { offset, reason }
    }

    /// Offset at which decoding stopped.
    pub fn offset(&self) -> usize {
        match self {
            Error::Corrupted { offset, .. } => *offset,
        }
    }

    /// Detailed cause of the failure.
    pub fn reason(&self) -> &Corruption {
        match self {
            Error::Corrupted { reason, .. } => reason,
        }
    }
}

/// Cause of a [`Error::Corrupted`] failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Corruption {
    /// A read needed more bytes than remain in the buffer
    #[error("unexpected end of data: needed {needed} bytes, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// An absolute seek targeted a position outside the buffer
    #[error("seek to {target} outside buffer of {len} bytes")]
    SeekOutOfBounds { target: usize, len: usize },

    /// A version, magic, sentinel or discriminant field holds a bad value
    #[error("invalid {field}: {value:#x}")]
    InvalidValue { field: &'static str, value: u64 },

    /// Consumed byte count disagrees with a declared length
    #[error("length mismatch in {record}: declared {declared} bytes, consumed {consumed}")]
    LengthMismatch {
        record: &'static str,
        declared: usize,
        consumed: usize,
    },

    /// A string was not followed by its null terminator
    #[error("missing null terminator in {0}")]
    MissingTerminator(&'static str),

    /// A UTF-16 string contained an unpaired surrogate
    #[error("invalid UTF-16 text in {0}")]
    InvalidUtf16(&'static str),

    /// The class name does not fit the selected presentation object
    #[error("unexpected class name {0:?}")]
    UnexpectedClassName(String),

    /// A field offset points outside the record that contains it
    #[error("{field} offset {offset:#x} outside record of {record_len} bytes")]
    OffsetOutOfBounds {
        field: &'static str,
        offset: u16,
        record_len: usize,
    },

    /// A clipboard format is not allowed in this position
    #[error("clipboard format not allowed in {0}")]
    InvalidClipboardFormat(&'static str),
}

/// Result type for OLEDS operations.
pub type Result<T> = std::result::Result<T, Error>;
