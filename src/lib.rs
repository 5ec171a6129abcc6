//! # scanzip
//!
//! A ZIP reader that walks an archive front to back and streams entries out
//! of it on demand.
//!
//! Opening an archive decodes every record in file order until the end of
//! central directory record, skipping over entry payloads without reading
//! them. Extraction hands back a [`std::io::Read`] over one entry: stored
//! entries come straight from the source, deflated ones are inflated as they
//! are read.
//!
//! ## Features
//!
//! - Any positioned byte source: memory, local files, or `Read + Seek` streams
//! - Support for STORED (uncompressed) and DEFLATE compression methods
//! - Constant memory while scanning, whatever the entry sizes
//! - Independent entry readers that can be used side by side
//!
//! ## Example
//!
//! ```no_run
//! use std::io::Read;
//! use std::path::Path;
//! use scanzip::LocalFileReader;
//!
//! fn main() -> anyhow::Result<()> {
//!     let reader = LocalFileReader::new(Path::new("archive.zip"))?;
//!     let archive = scanzip::open(reader)?;
//!
//!     for entry in archive.entries() {
//!         if entry.is_dir() {
//!             continue;
//!         }
//!         let mut contents = Vec::new();
//!         archive.extract(entry)?.read_to_end(&mut contents)?;
//!         println!("{}: {} bytes", entry.file_name, contents.len());
//!     }
//!
//!     archive.close();
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod io;
pub mod zip;

pub use crate::error::{Result, ZipError};
pub use crate::io::{LocalFileReader, ReadAt, SeekReader};
pub use crate::zip::{Archive, ArchiveOptions, EntryReader, LocalFileHeader, open};
