//! Error types returned while scanning and extracting archives.

use thiserror::Error;

/// Result alias over [`ZipError`].
pub type Result<T> = std::result::Result<T, ZipError>;

/// Everything that can go wrong while opening or extracting an archive.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ZipError {
    /// The source ended inside a fixed-width field.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// A record started with a signature that is none of the three known ones.
    #[error("malformed archive: unknown record signature {signature:#010x} at offset {offset}")]
    MalformedArchive { offset: u64, signature: u32 },

    /// The entry uses a method other than stored (0) or deflate (8).
    #[error("unsupported compression method: {0}")]
    UnsupportedCompressionMethod(u16),

    /// A declared length points past the end of the source.
    #[error(
        "invalid field length at offset {offset}: {length} bytes declared, {available} available"
    )]
    InvalidFieldLength {
        offset: u64,
        length: u64,
        available: u64,
    },

    /// A stored entry whose compressed and uncompressed sizes differ.
    #[error("stored entry sizes disagree (compressed: {compressed}, uncompressed: {uncompressed})")]
    StoredSizeMismatch { compressed: u64, uncompressed: u64 },

    /// The scan hit the configured record limit.
    #[error("archive holds more than {0} records")]
    TooManyRecords(usize),

    /// The extracted bytes hash to a different CRC-32 than the header declares.
    #[error("crc32 mismatch (expected: {expected:#010x}, actual: {actual:#010x})")]
    Crc32Mismatch { expected: u32, actual: u32 },

    /// The extracted byte count differs from the declared uncompressed size.
    #[error("extracted length mismatch (expected: {expected}, actual: {actual})")]
    LengthMismatch { expected: u64, actual: u64 },

    /// The underlying source failed.
    #[error("an upstream reader returned an error: {0}")]
    Io(#[source] std::io::Error),
}

impl From<std::io::Error> for ZipError {
    /// Unwraps errors that were raised as [`ZipError`]s inside a reader.
    fn from(err: std::io::Error) -> Self {
        if !err.get_ref().is_some_and(|inner| inner.is::<ZipError>()) {
            return ZipError::Io(err);
        }

        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<ZipError>()) {
            Some(Ok(zip)) => *zip,
            Some(Err(other)) => ZipError::Io(std::io::Error::new(kind, other)),
            None => ZipError::Io(kind.into()),
        }
    }
}

impl From<ZipError> for std::io::Error {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(inner) => inner,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}
