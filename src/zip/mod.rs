//! ZIP archive scanning and extraction.
//!
//! ## Architecture
//!
//! - [`structures`]: record types and signatures (local file header, central
//!   directory record, end of central directory)
//! - [`field`]: little-endian field decoding over a positioned source
//! - [`scanner`]: the forward, signature-driven record scanner
//! - [`view`]: bounded readers over a byte range of the source
//! - [`extractor`]: per-entry decoding (stored or raw deflate)
//! - [`archive`]: the opened archive and its options
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! This implementation walks the file from the start, one record at a time,
//! and takes its catalog from the local file headers. The central directory
//! is decoded and kept but never consulted; the EOCD record ends the walk.
//!
//! ## Supported Features
//!
//! - STORED (no compression) method
//! - DEFLATE compression method
//! - Optional CRC-32 and length verification
//!
//! ## Limitations
//!
//! - No ZIP64 extensions
//! - No encryption support
//! - No multi-disk archive support (disk counters are only reported)
//! - No data descriptors: local headers must carry the real sizes

mod archive;
mod extractor;
mod field;
mod scanner;
mod structures;
mod view;


pub use archive::{Archive, ArchiveOptions, open};
pub use extractor::EntryReader;
pub use field::FieldReader;
pub use scanner::{Catalog, RecordScanner};
pub use structures::*;
pub use view::SubRangeView;
