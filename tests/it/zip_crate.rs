//! Archives written by the `zip` crate, read back through scanzip.

use std::io::{Cursor, Read, Write};

use rstest::rstest;
use scanzip::zip::CompressionMethod;
use zip::write::SimpleFileOptions;

fn lorem(len: usize) -> Vec<u8> {
    b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn write_archive(files: &[(&str, &[u8])], method: zip::CompressionMethod) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(method);

    for (name, data) in files {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

#[rstest]
#[case::stored(zip::CompressionMethod::Stored, CompressionMethod::Stored)]
#[case::deflated(zip::CompressionMethod::Deflated, CompressionMethod::Deflate)]
fn reads_back_every_entry(
    #[case] written: zip::CompressionMethod,
    #[case] expected: CompressionMethod,
    #[values(0, 1, 100, 70_000)] len: usize,
) -> anyhow::Result<()> {
    let big = lorem(len);
    let files = [
        ("docs/", b"".as_slice()),
        ("docs/lorem.txt", big.as_slice()),
        ("tail.bin", b"\x00\xff\x10".as_slice()),
    ];
    let data = write_archive(&files, written);

    let archive = scanzip::ArchiveOptions::new().verify_crc(true).open(data)?;
    let files: Vec<_> = archive.entries().iter().filter(|e| !e.is_dir()).collect();
    assert_eq!(files.len(), 2);
    assert_eq!(archive.entries().len(), 3);
    assert_eq!(archive.central_directory().len(), 3);

    let entry = archive.entry("docs/lorem.txt").expect("entry exists");
    assert_eq!(entry.compression_method, expected);
    assert_eq!(entry.uncompressed_size as usize, len);

    let contents = archive.extract_to_vec(entry)?;
    assert_eq!(contents.len() as u32, entry.uncompressed_size);
    assert_eq!(contents, big);

    let tail = archive.entry("tail.bin").expect("entry exists");
    assert_eq!(archive.extract_to_vec(tail)?, b"\x00\xff\x10");
    Ok(())
}

#[test]
fn sequential_extractions_are_independent() -> anyhow::Result<()> {
    let first = lorem(5_000);
    let second = b"second entry".repeat(300);
    let data = write_archive(
        &[("first.txt", first.as_slice()), ("second.txt", second.as_slice())],
        zip::CompressionMethod::Deflated,
    );
    let archive = scanzip::open(data)?;

    let mut out = Vec::new();
    archive.extract(&archive.entries()[0])?.read_to_end(&mut out)?;
    assert_eq!(out, first);

    out.clear();
    archive.extract(&archive.entries()[1])?.read_to_end(&mut out)?;
    assert_eq!(out, second);
    Ok(())
}

#[test]
fn interleaved_extractions_are_independent() -> anyhow::Result<()> {
    let first = lorem(20_000);
    let second = b"0123456789".repeat(2_000);
    let data = write_archive(
        &[("first.txt", first.as_slice()), ("second.txt", second.as_slice())],
        zip::CompressionMethod::Deflated,
    );
    let archive = scanzip::open(data)?;

    let mut a = archive.extract(&archive.entries()[0])?;
    let mut b = archive.extract(&archive.entries()[1])?;
    let (mut out_a, mut out_b) = (Vec::new(), Vec::new());
    let mut buf = [0u8; 333];

    loop {
        let n = a.read(&mut buf)?;
        out_a.extend_from_slice(&buf[..n]);
        let m = b.read(&mut buf)?;
        out_b.extend_from_slice(&buf[..m]);
        if n == 0 && m == 0 {
            break;
        }
    }

    assert_eq!(out_a, first);
    assert_eq!(out_b, second);
    Ok(())
}
