use super::ReadAt;
use std::io::{Read, Seek, SeekFrom};
use std::sync::{Mutex, MutexGuard};

/// Adapts any `Read + Seek` stream into a [`ReadAt`] source.
///
/// The stream's cursor is moved for every read, so access goes through a
/// mutex. Reads from several extraction views are serialized rather than
/// interleaved mid-seek.
pub struct SeekReader<R> {
    inner: Mutex<R>,
    size: u64,
}

impl<R: Read + Seek> SeekReader<R> {
    /// Wrap `inner`, measuring its length by seeking to the end.
    pub fn new(mut inner: R) -> std::io::Result<Self> {
        let size = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self::with_size(inner, size))
    }
}

impl<R> SeekReader<R> {
    pub(crate) fn with_size(inner: R, size: u64) -> Self {
        Self {
            inner: Mutex::new(inner),
            size,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, R> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<R> ReadAt for SeekReader<R>
where
    R: Read + Seek + Send,
{
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut inner = self.lock();
        inner.seek(SeekFrom::Start(offset))?;
        inner.read(buf)
    }

    fn size(&self) -> u64 {
        self.size
    }
}
