use super::ReadAt;
use std::fs::File;
use std::path::Path;

/// Local file reader with random access support
pub struct LocalFileReader {
    #[cfg(unix)]
    file: File,
    #[cfg(not(unix))]
    file: super::SeekReader<File>,
    size: u64,
}

impl LocalFileReader {
    pub fn new(path: &Path) -> std::io::Result<Self> {
        Self::from_file(File::open(path)?)
    }

    pub fn from_file(file: File) -> std::io::Result<Self> {
        let size = file.metadata()?.len();

        #[cfg(not(unix))]
        let file = super::SeekReader::with_size(file, size);

        Ok(Self { file, size })
    }
}

impl ReadAt for LocalFileReader {
    #[cfg(unix)]
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
        use std::os::unix::fs::FileExt;
        FileExt::read_at(&self.file, buf, offset)
    }

    // No pread here; fall back to seek + read under a lock.
    #[cfg(not(unix))]
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read_at(offset, buf)
    }

    fn size(&self) -> u64 {
        self.size
    }
}
