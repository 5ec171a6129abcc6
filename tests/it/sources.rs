use std::io::{Cursor, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use scanzip::{LocalFileReader, ReadAt, SeekReader};

use crate::minimal_archive;

fn read_only_entry<R: ReadAt>(source: R) -> anyhow::Result<Vec<u8>> {
    let archive = scanzip::open(source)?;
    let entry = archive.entry("a.txt").expect("entry exists");

    let mut out = Vec::new();
    archive.extract(entry)?.read_to_end(&mut out)?;
    Ok(out)
}

struct TempFile(PathBuf);

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn from_slice() -> anyhow::Result<()> {
    let data = minimal_archive();
    assert_eq!(read_only_entry(data.as_slice())?, b"hello");
    Ok(())
}

#[test]
fn from_shared_buffer() -> anyhow::Result<()> {
    let data = Arc::new(minimal_archive());
    assert_eq!(read_only_entry(Arc::clone(&data))?, b"hello");
    Ok(())
}

#[test]
fn from_cursor() -> anyhow::Result<()> {
    assert_eq!(read_only_entry(Cursor::new(minimal_archive()))?, b"hello");
    Ok(())
}

#[test]
fn from_seekable_stream() -> anyhow::Result<()> {
    let reader = SeekReader::new(Cursor::new(minimal_archive()))?;
    assert_eq!(read_only_entry(reader)?, b"hello");
    Ok(())
}

#[test]
fn from_local_file() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("scanzip-it-{}.zip", std::process::id()));
    let _guard = TempFile(path.clone());
    std::fs::File::create(&path)?.write_all(&minimal_archive())?;

    let reader = LocalFileReader::new(&path)?;
    assert_eq!(reader.size(), minimal_archive().len() as u64);
    assert_eq!(read_only_entry(reader)?, b"hello");
    Ok(())
}
