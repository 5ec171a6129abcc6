//! Little-endian field decoding over a [`ReadAt`] source.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Result, ZipError};
use crate::io::ReadAt;

/// Sequential field decoder with its own position over a positioned source.
///
/// Integers are always little-endian, whatever the host order. Strings map
/// each byte to the character with the same code point, so no byte sequence
/// can fail to decode.
pub struct FieldReader<'a, R: ReadAt + ?Sized> {
    source: &'a R,
    position: u64,
    size: u64,
}

impl<'a, R: ReadAt + ?Sized> FieldReader<'a, R> {
    pub fn new(source: &'a R) -> Self {
        Self::at(source, 0)
    }

    pub fn at(source: &'a R, position: u64) -> Self {
        Self {
            source,
            position,
            size: source.size(),
        }
    }

    /// Current absolute offset in the source.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes left between the position and the end of the source.
    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.position)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_u16(&buf))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_u32(&buf))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.check_fixed(len as u64)?;
        let mut buf = vec![0u8; len];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read `len` bytes as a string of the characters U+0000..=U+00FF.
    pub fn read_string(&mut self, len: usize) -> Result<String> {
        Ok(self.read_bytes(len)?.into_iter().map(char::from).collect())
    }

    /// Read `len` bytes as one little-endian number, rendered as exactly
    /// `2 * len` lowercase hex digits.
    pub fn read_hex(&mut self, len: usize) -> Result<String> {
        let bytes = self.read_bytes(len)?;
        Ok(bytes.iter().rev().map(|b| format!("{b:02x}")).collect())
    }

    /// Fail with [`ZipError::InvalidFieldLength`] unless `len` more bytes exist.
    ///
    /// Used for lengths declared inside a record, as opposed to the fixed
    /// layout of the record itself.
    pub fn ensure_available(&self, len: u64) -> Result<()> {
        if len > self.remaining() {
            return Err(ZipError::InvalidFieldLength {
                offset: self.position,
                length: len,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Move forward `len` bytes without reading them.
    pub fn skip(&mut self, len: u64) -> Result<()> {
        self.ensure_available(len)?;
        self.position += len;
        Ok(())
    }

    fn check_fixed(&self, needed: u64) -> Result<()> {
        if needed > self.remaining() {
            return Err(ZipError::TruncatedInput {
                offset: self.position,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.check_fixed(buf.len() as u64)?;
        self.source
            .read_exact_at(self.position, buf)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::UnexpectedEof => ZipError::TruncatedInput {
                    offset: self.position,
                    needed: buf.len() as u64,
                    available: self.remaining(),
                },
                _ => ZipError::Io(e),
            })?;
        self.position += buf.len() as u64;
        Ok(())
    }
}
