use std::io::Read;

use flate2::read::DeflateDecoder;
use tracing::{debug, warn};

use crate::error::{Result, ZipError};
use crate::io::ReadAt;

use super::structures::{CompressionMethod, LocalFileHeader};
use super::view::SubRangeView;

enum Decoder<'a, R: ReadAt + ?Sized> {
    Stored(SubRangeView<'a, R>),
    Deflate(DeflateDecoder<SubRangeView<'a, R>>),
}

/// Expected checksum and length, compared once the stream ends.
struct Verifier {
    hasher: crc32fast::Hasher,
    expected_crc32: u32,
    expected_len: u64,
    len: u64,
}

/// Decoded contents of one archive entry.
///
/// Returned by [`Archive::extract`](crate::Archive::extract). Stored entries
/// are passed through; deflated entries are inflated lazily as the caller
/// reads.
pub struct EntryReader<'a, R: ReadAt + ?Sized> {
    decoder: Decoder<'a, R>,
    verifier: Option<Verifier>,
}

impl<'a, R: ReadAt + ?Sized> EntryReader<'a, R> {
    /// Pick a decoder for `entry` over its payload in `source`.
    pub(crate) fn new(source: &'a R, entry: &LocalFileHeader, verify: bool) -> Result<Self> {
        let view = SubRangeView::new(source, entry.data_offset, entry.compressed_size as u64);

        let decoder = match entry.compression_method {
            CompressionMethod::Stored => {
                if entry.compressed_size != entry.uncompressed_size {
                    return Err(ZipError::StoredSizeMismatch {
                        compressed: entry.compressed_size as u64,
                        uncompressed: entry.uncompressed_size as u64,
                    });
                }
                Decoder::Stored(view)
            }
            CompressionMethod::Deflate => Decoder::Deflate(DeflateDecoder::new(view)),
            CompressionMethod::Unknown(method) => {
                return Err(ZipError::UnsupportedCompressionMethod(method));
            }
        };

        debug!(
            name = %entry.file_name,
            method = entry.compression_method.as_u16(),
            offset = entry.data_offset,
            len = entry.compressed_size,
            "extracting entry"
        );

        let verifier = verify.then(|| Verifier {
            hasher: crc32fast::Hasher::new(),
            expected_crc32: entry.crc32,
            expected_len: entry.uncompressed_size as u64,
            len: 0,
        });

        Ok(Self { decoder, verifier })
    }

    /// Whether the payload is inflated on the way out.
    pub fn is_compressed(&self) -> bool {
        matches!(self.decoder, Decoder::Deflate(_))
    }

    fn finish(&mut self) -> std::io::Result<()> {
        let Some(verifier) = self.verifier.take() else {
            return Ok(());
        };

        if verifier.len != verifier.expected_len {
            warn!(expected = verifier.expected_len, actual = verifier.len, "length mismatch");
            return Err(ZipError::LengthMismatch {
                expected: verifier.expected_len,
                actual: verifier.len,
            }
            .into());
        }

        let actual = verifier.hasher.finalize();
        if actual != verifier.expected_crc32 {
            warn!(expected = verifier.expected_crc32, actual, "crc32 mismatch");
            return Err(ZipError::Crc32Mismatch {
                expected: verifier.expected_crc32,
                actual,
            }
            .into());
        }

        Ok(())
    }
}

impl<R: ReadAt + ?Sized> Read for EntryReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = match &mut self.decoder {
            Decoder::Stored(view) => view.read(buf)?,
            Decoder::Deflate(inflater) => inflater.read(buf)?,
        };

        if n == 0 && !buf.is_empty() {
            self.finish()?;
        } else if let Some(verifier) = &mut self.verifier {
            verifier.hasher.update(&buf[..n]);
            verifier.len += n as u64;
        }

        Ok(n)
    }
}
