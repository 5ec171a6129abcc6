//! Forward record scanner.
//!
//! The archive is read front to back: every record starts with a 4-byte
//! signature that selects how the rest of it is decoded. Local file headers
//! are followed by their payload, which is skipped by seeking past
//! `compressed_size` bytes, so scanning needs constant memory no matter how
//! large the entries are. The end of central directory record ends the scan.

use tracing::{debug, trace, warn};

use crate::error::{Result, ZipError};
use crate::io::ReadAt;

use super::field::FieldReader;
use super::structures::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    Done,
}

/// Everything the scan collects, in file order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub entries: Vec<LocalFileHeader>,
    pub central_directory: Vec<CentralDirectoryRecord>,
    pub end: EndOfCentralDirectoryRecord,
}

/// Signature-dispatch loop over the records of an archive.
///
/// Yields one [`Record`] per call to [`next_record`](Self::next_record) until
/// the end of central directory record has been returned.
pub struct RecordScanner<'a, R: ReadAt + ?Sized> {
    reader: FieldReader<'a, R>,
    state: ScanState,
    max_records: Option<usize>,
    decoded: usize,
}

impl<'a, R: ReadAt + ?Sized> RecordScanner<'a, R> {
    pub fn new(source: &'a R) -> Self {
        Self {
            reader: FieldReader::new(source),
            state: ScanState::Scanning,
            max_records: None,
            decoded: 0,
        }
    }

    /// Fail with [`ZipError::TooManyRecords`] once more than `limit` records
    /// have been decoded.
    pub fn with_max_records(mut self, limit: Option<usize>) -> Self {
        self.max_records = limit;
        self
    }

    /// Decode the next record, or `None` once the scan is done.
    ///
    /// After an error the scan is over and later calls return `None`.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if self.state == ScanState::Done {
            return Ok(None);
        }
        match self.decode() {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                // The reader may be mid-record; nothing after this is trustworthy.
                self.state = ScanState::Done;
                Err(err)
            }
        }
    }

    /// Run the scan to completion.
    pub fn scan(mut self) -> Result<Catalog> {
        let mut entries = Vec::new();
        let mut central_directory = Vec::new();

        loop {
            match self.decode()? {
                Record::LocalFileHeader(header) => entries.push(header),
                Record::CentralDirectory(record) => central_directory.push(record),
                Record::EndOfCentralDirectory(end) => {
                    return Ok(Catalog {
                        entries,
                        central_directory,
                        end,
                    });
                }
            }
        }
    }

    fn decode(&mut self) -> Result<Record> {
        if let Some(limit) = self.max_records {
            if self.decoded >= limit {
                return Err(ZipError::TooManyRecords(limit));
            }
        }

        let offset = self.reader.position();
        let signature = self.reader.read_u32()?;

        let record = match signature {
            LOCAL_FILE_HEADER_SIGNATURE => {
                let header = self.local_file_header(offset)?;
                debug!(
                    offset,
                    name = %header.file_name,
                    method = header.compression_method.as_u16(),
                    compressed_size = header.compressed_size,
                    "local file header"
                );

                trace!(from = header.data_offset, len = header.compressed_size, "skipping payload");
                self.reader.skip(header.compressed_size as u64)?;
                Record::LocalFileHeader(header)
            }
            CENTRAL_DIRECTORY_SIGNATURE => {
                let record = self.central_directory_record()?;
                debug!(offset, name = %record.file_name, "central directory record");
                Record::CentralDirectory(record)
            }
            END_OF_CENTRAL_DIRECTORY_SIGNATURE => {
                let record = self.end_of_central_directory_record()?;
                debug!(
                    offset,
                    total_records = record.total_records,
                    "end of central directory"
                );
                self.state = ScanState::Done;
                Record::EndOfCentralDirectory(record)
            }
            _ => {
                warn!(offset, signature = %format!("{signature:#010x}"), "unknown signature");
                return Err(ZipError::MalformedArchive { offset, signature });
            }
        };

        self.decoded += 1;
        Ok(record)
    }

    fn local_file_header(&mut self, header_offset: u64) -> Result<LocalFileHeader> {
        let r = &mut self.reader;

        let version = r.read_u16()?;
        let general_purpose_flags = r.read_u16()?;
        let compression_method = CompressionMethod::from_u16(r.read_u16()?);
        let last_mod_time = r.read_u16()?;
        let last_mod_date = r.read_u16()?;
        let crc32 = r.read_u32()?;
        let compressed_size = r.read_u32()?;
        let uncompressed_size = r.read_u32()?;
        let file_name_length = r.read_u16()?;
        let extra_length = r.read_u16()?;

        r.ensure_available(file_name_length as u64 + extra_length as u64)?;
        let file_name = r.read_string(file_name_length as usize)?;
        let extra = r.read_bytes(extra_length as usize)?;

        Ok(LocalFileHeader {
            version,
            general_purpose_flags,
            compression_method,
            last_mod_time,
            last_mod_date,
            crc32,
            compressed_size,
            uncompressed_size,
            file_name_length,
            extra_length,
            file_name,
            extra,
            header_offset,
            data_offset: r.position(),
        })
    }

    fn central_directory_record(&mut self) -> Result<CentralDirectoryRecord> {
        let r = &mut self.reader;

        let version_created = r.read_u16()?;
        let version_needed = r.read_u16()?;
        let general_purpose_flags = r.read_u16()?;
        let compression_method = CompressionMethod::from_u16(r.read_u16()?);
        let last_mod_time = r.read_u16()?;
        let last_mod_date = r.read_u16()?;
        let crc32 = r.read_u32()?;
        let compressed_size = r.read_u32()?;
        let uncompressed_size = r.read_u32()?;
        let file_name_length = r.read_u16()?;
        let extra_length = r.read_u16()?;
        let file_comment_length = r.read_u16()?;
        let disk_number = r.read_u16()?;
        let internal_attributes = r.read_u16()?;
        let external_attributes = r.read_u32()?;
        let local_header_offset = r.read_u32()?;

        r.ensure_available(
            file_name_length as u64 + extra_length as u64 + file_comment_length as u64,
        )?;
        let file_name = r.read_string(file_name_length as usize)?;
        let extra = r.read_bytes(extra_length as usize)?;
        let comment = r.read_string(file_comment_length as usize)?;

        Ok(CentralDirectoryRecord {
            version_created,
            version_needed,
            general_purpose_flags,
            compression_method,
            last_mod_time,
            last_mod_date,
            crc32,
            compressed_size,
            uncompressed_size,
            file_name_length,
            extra_length,
            file_comment_length,
            disk_number,
            internal_attributes,
            external_attributes,
            local_header_offset,
            file_name,
            extra,
            comment,
        })
    }

    fn end_of_central_directory_record(&mut self) -> Result<EndOfCentralDirectoryRecord> {
        let r = &mut self.reader;

        let number_of_disks = r.read_u16()?;
        let central_directory_start_disk = r.read_u16()?;
        let records_on_this_disk = r.read_u16()?;
        let total_records = r.read_u16()?;
        let central_directory_size = r.read_u32()?;
        let central_directory_offset = r.read_u32()?;
        let comment_length = r.read_u16()?;

        r.ensure_available(comment_length as u64)?;
        let comment = r.read_string(comment_length as usize)?;

        Ok(EndOfCentralDirectoryRecord {
            number_of_disks,
            central_directory_start_disk,
            records_on_this_disk,
            total_records,
            central_directory_size,
            central_directory_offset,
            comment_length,
            comment,
        })
    }
}
