//! Bounds-checked binary cursor shared by all record decoders.
//!
//! Every read is little-endian and checked against the end of the buffer
//! before any byte is consumed, so a failed read leaves the position where it
//! was. The cursor also carries the [`DecodeOptions`] of the current decode
//! call tree.

use crate::common::error::{Corruption, Error, Result};
use crate::ole::codepage::{decode_ansi, decode_utf16le};
use crate::ole::DecodeOptions;
use zerocopy::{FromBytes, I16, I32, LE, U16, U32, U64};

/// Positional reader over an immutable byte buffer.
///
/// Invariant: `0 <= position <= data.len()`.
///
/// # Examples
///
/// ```
/// use oleds::common::ByteReader;
///
/// let data = [0x78, 0x56, 0x34, 0x12, 0xFF];
/// let mut reader = ByteReader::new(&data);
/// assert_eq!(reader.peek_u32().unwrap(), 0x12345678);
/// assert_eq!(reader.read_u32().unwrap(), 0x12345678);
/// assert_eq!(reader.remaining(), 1);
/// assert!(reader.read_u16().is_err());
/// assert_eq!(reader.position(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
    options: DecodeOptions,
}

impl<'a> ByteReader<'a> {
    /// Create a cursor at the start of `data` with default options.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    /// Create a cursor at the start of `data`.
    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            data,
            position: 0,
            options,
        }
    }

    /// Options of the current decode.
    #[inline]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Current absolute position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the position and the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Bytes consumed since `start`, an earlier position.
    #[inline]
    pub fn consumed_since(&self, start: usize) -> usize {
        self.position.saturating_sub(start)
    }

    /// Build a corruption error located at the current position.
    #[inline]
    pub fn corrupted(&self, reason: Corruption) -> Error {
        Error::corrupted(self.position, reason)
    }

    /// Move to an absolute position in `[0, len]`.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(self.corrupted(Corruption::SeekOutOfBounds {
                target: position,
                len: self.data.len(),
            }));
        }
        self.position = position;
        Ok(())
    }

    /// Run `decode` from the current position, then restore the position.
    ///
    /// Used to inspect a discriminating header before handing the same
    /// bytes to the concrete decoder it selects.
    pub fn lookahead<T>(&mut self, decode: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.position;
        let result = decode(self);
        self.position = start;
        result
    }

    /// Advance over `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read_bytes(count).map(|_| ())
    }

    /// Borrow the next `count` bytes without consuming them.
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(self.corrupted(Corruption::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            }));
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Consume the next `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Consume the next `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Decode a zerocopy value from the next bytes without consuming them.
    fn peek_value<T: FromBytes>(&self) -> Result<T> {
        let bytes = self.peek_bytes(size_of::<T>())?;
        T::read_from_bytes(bytes).map_err(|_| {
            self.corrupted(Corruption::UnexpectedEof {
                needed: size_of::<T>(),
                available: bytes.len(),
            })
        })
    }

    /// Decode a zerocopy value and consume its bytes.
    ///
    /// Used for fixed-layout prefixes declared with `#[derive(FromBytes)]`.
    pub fn read_value<T: FromBytes>(&mut self) -> Result<T> {
        let value = self.peek_value::<T>()?;
        self.position += size_of::<T>();
        Ok(value)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_value::<U16<LE>>().map(|v| v.get())
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_value::<I16<LE>>().map(|v| v.get())
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_value::<U32<LE>>().map(|v| v.get())
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_value::<I32<LE>>().map(|v| v.get())
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_value::<U64<LE>>().map(|v| v.get())
    }

    /// Read a u32 without advancing.
    #[inline]
    pub fn peek_u32(&self) -> Result<u32> {
        self.peek_value::<U32<LE>>().map(|v| v.get())
    }

    /// Read exactly `count` bytes of 8-bit text in the configured code page.
    pub fn read_ansi(&mut self, count: usize) -> Result<String> {
        let bytes = self.read_bytes(count)?;
        Ok(decode_ansi(bytes, self.options.ansi_codepage))
    }

    /// Read 8-bit text up to and including a null terminator.
    ///
    /// Fails if the buffer ends before a terminator is found.
    pub fn read_ansi_z(&mut self, field: &'static str) -> Result<String> {
        let rest = &self.data[self.position..];
        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return Err(self.corrupted(Corruption::MissingTerminator(field)));
        };
        let text = self.read_ansi(len)?;
        self.position += 1;
        Ok(text)
    }

    /// Read `byte_count` bytes of UTF-16LE text.
    pub fn read_utf16(&mut self, byte_count: usize, field: &'static str) -> Result<String> {
        let start = self.position;
        let bytes = self.read_bytes(byte_count)?;
        decode_utf16le(bytes)
            .ok_or_else(|| Error::corrupted(start, Corruption::InvalidUtf16(field)))
    }

    /// Consume a single zero byte.
    pub fn expect_nul_u8(&mut self, field: &'static str) -> Result<()> {
        if self.read_u8()? != 0 {
            return Err(Error::corrupted(
                self.position - 1,
                Corruption::MissingTerminator(field),
            ));
        }
        Ok(())
    }

    /// Consume a single zero UTF-16 code unit.
    pub fn expect_nul_u16(&mut self, field: &'static str) -> Result<()> {
        if self.read_u16()? != 0 {
            return Err(Error::corrupted(
                self.position - 2,
                Corruption::MissingTerminator(field),
            ));
        }
        Ok(())
    }
}
