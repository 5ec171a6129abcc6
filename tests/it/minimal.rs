use std::io::Read;

use scanzip::zip::CompressionMethod;

use crate::minimal_archive;

#[test]
fn minimal_archive_has_one_entry() -> anyhow::Result<()> {
    let archive = scanzip::open(minimal_archive())?;

    assert_eq!(archive.entries().len(), 1);
    let entry = &archive.entries()[0];
    assert_eq!(entry.file_name, "a.txt");
    assert_eq!(entry.compressed_size, 5);
    assert_eq!(entry.uncompressed_size, 5);
    assert_eq!(entry.compression_method, CompressionMethod::Stored);
    assert_eq!(entry.data_offset, 35);
    assert_eq!(entry.mod_date(), (1980, 1, 1));

    let mut contents = Vec::new();
    archive.extract(entry)?.read_to_end(&mut contents)?;
    assert_eq!(contents, b"hello");

    let cdr = &archive.central_directory()[0];
    assert_eq!(cdr.file_name, "a.txt");
    assert_eq!(cdr.local_header_offset, 0);
    assert_eq!(cdr.version_created, 0x031e);

    let end = archive.end_of_central_directory();
    assert_eq!(end.total_records, 1);
    assert_eq!(end.records_on_this_disk, 1);
    assert_eq!(end.central_directory_offset, 40);
    assert_eq!(end.central_directory_size, 51);
    assert_eq!(end.comment, "");

    archive.close();
    Ok(())
}

#[test]
fn stored_read_totals_compressed_size() -> anyhow::Result<()> {
    let archive = scanzip::open(minimal_archive())?;
    let entry = &archive.entries()[0];

    let mut reader = archive.extract(entry)?;
    let mut total = 0;
    let mut buf = [0u8; 2];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        total += n;
    }

    assert_eq!(total as u32, entry.compressed_size);
    assert_eq!(entry.compressed_size, entry.uncompressed_size);

    // Exhausted streams stay exhausted.
    for _ in 0..3 {
        assert_eq!(reader.read(&mut buf)?, 0);
    }
    Ok(())
}

#[test]
fn crc_verification_accepts_intact_archive() -> anyhow::Result<()> {
    let archive = scanzip::ArchiveOptions::new()
        .verify_crc(true)
        .open(minimal_archive())?;
    let entry = archive.entry("a.txt").expect("entry exists");

    assert_eq!(archive.extract_to_vec(entry)?, b"hello");
    Ok(())
}
