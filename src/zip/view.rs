use std::io::{ErrorKind, Read};

use crate::io::ReadAt;

/// Bounded, single-pass reader over `[offset, offset + len)` of a source.
///
/// Reads go through [`ReadAt`] at the view's own position, so views over the
/// same source never disturb each other. Once `len` bytes have been handed
/// out every further read returns `Ok(0)`.
pub struct SubRangeView<'a, R: ReadAt + ?Sized> {
    source: &'a R,
    position: u64,
    remaining: u64,
}

impl<'a, R: ReadAt + ?Sized> SubRangeView<'a, R> {
    pub fn new(source: &'a R, offset: u64, len: u64) -> Self {
        Self {
            source,
            position: offset,
            remaining: len,
        }
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl<R: ReadAt + ?Sized> Read for SubRangeView<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let max = buf.len().min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        let n = self.source.read_at(self.position, &mut buf[..max])?;
        if n == 0 {
            return Err(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("source ended with {} bytes of the range unread", self.remaining),
            ));
        }

        self.position += n as u64;
        self.remaining -= n as u64;
        Ok(n)
    }
}
