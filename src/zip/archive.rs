use std::io::Read;

use tracing::debug;

use crate::error::Result;
use crate::io::ReadAt;

use super::extractor::EntryReader;
use super::scanner::RecordScanner;
use super::structures::*;

/// Upper bound on the buffer reserved up front by [`Archive::extract_to_vec`].
const MAX_PREALLOCATION: usize = 64 * 1024;

/// Settings used when opening an archive.
///
/// ```no_run
/// use scanzip::ArchiveOptions;
///
/// let data = std::fs::read("archive.zip")?;
/// let archive = ArchiveOptions::new()
///     .verify_crc(true)
///     .max_records(10_000)
///     .open(data)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    verify_crc: bool,
    max_records: Option<usize>,
}

impl ArchiveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every extracted entry's CRC-32 and length at end of stream.
    pub fn verify_crc(mut self, verify: bool) -> Self {
        self.verify_crc = verify;
        self
    }

    /// Give up on archives with more than `limit` records of any kind.
    pub fn max_records(mut self, limit: usize) -> Self {
        self.max_records = Some(limit);
        self
    }

    /// Scan `source` and build the entry catalog.
    ///
    /// Fails without returning a partial archive if any record can't be
    /// decoded.
    pub fn open<R: ReadAt>(&self, source: R) -> Result<Archive<R>> {
        let catalog = RecordScanner::new(&source)
            .with_max_records(self.max_records)
            .scan()?;

        debug!(
            entries = catalog.entries.len(),
            central_directory = catalog.central_directory.len(),
            "opened archive"
        );

        Ok(Archive {
            source,
            entries: catalog.entries,
            central_directory: catalog.central_directory,
            end: catalog.end,
            verify_crc: self.verify_crc,
        })
    }
}

/// Scan `source` with default [`ArchiveOptions`].
pub fn open<R: ReadAt>(source: R) -> Result<Archive<R>> {
    ArchiveOptions::default().open(source)
}

/// An opened archive: the source plus the entries found in it.
pub struct Archive<R: ReadAt> {
    source: R,
    entries: Vec<LocalFileHeader>,
    central_directory: Vec<CentralDirectoryRecord>,
    end: EndOfCentralDirectoryRecord,
    verify_crc: bool,
}

impl<R: ReadAt> Archive<R> {
    /// Entries in the order their local headers appear in the file.
    pub fn entries(&self) -> &[LocalFileHeader] {
        &self.entries
    }

    /// First entry called `name`.
    pub fn entry(&self, name: &str) -> Option<&LocalFileHeader> {
        self.entries.iter().find(|e| e.file_name == name)
    }

    /// Central directory records, as decoded. Not used for extraction.
    pub fn central_directory(&self) -> &[CentralDirectoryRecord] {
        &self.central_directory
    }

    pub fn end_of_central_directory(&self) -> &EndOfCentralDirectoryRecord {
        &self.end
    }

    /// Stream the decoded contents of `entry`.
    ///
    /// Readers borrow the archive and use positioned reads, so several can be
    /// open and read in any order.
    pub fn extract(&self, entry: &LocalFileHeader) -> Result<EntryReader<'_, R>> {
        EntryReader::new(&self.source, entry, self.verify_crc)
    }

    /// Extract file data to memory
    pub fn extract_to_vec(&self, entry: &LocalFileHeader) -> Result<Vec<u8>> {
        // The header size is only a hint; the buffer grows as data arrives.
        let hint = (entry.uncompressed_size as usize).min(MAX_PREALLOCATION);
        let mut buf = Vec::with_capacity(hint);
        self.extract(entry)?.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Release the archive and its source.
    pub fn close(self) {
        drop(self.source);
    }

    /// Release the archive, handing the source back.
    pub fn into_inner(self) -> R {
        self.source
    }
}
