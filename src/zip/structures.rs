/// Signature of a local file header (`PK\x03\x04`).
pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x04034b50;

/// Signature of a central directory record (`PK\x01\x02`).
pub const CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x02014b50;

/// Signature of the end of central directory record (`PK\x05\x06`).
pub const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x06054b50;

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Unknown(v) => *v,
        }
    }
}

/// Local File Header (LFH) - 30 bytes plus name and extra field.
///
/// One of these precedes every entry's payload. The archive catalog is built
/// from these, in the order they appear in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFileHeader {
    pub version: u16,
    pub general_purpose_flags: u16,
    pub compression_method: CompressionMethod,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_length: u16,
    pub file_name: String,
    pub extra: Vec<u8>,
    /// Offset of the header's signature in the archive.
    pub header_offset: u64,
    /// Offset of the first payload byte, right after the extra field.
    pub data_offset: u64,
}

impl LocalFileHeader {
    /// Directory entries end with '/'
    pub fn is_dir(&self) -> bool {
        self.file_name.ends_with('/')
    }

    /// Parse modification date to (year, month, day)
    pub fn mod_date(&self) -> (u16, u8, u8) {
        let day = (self.last_mod_date & 0x1F) as u8;
        let month = ((self.last_mod_date >> 5) & 0x0F) as u8;
        let year = ((self.last_mod_date >> 9) & 0x7F) + 1980;
        (year, month, day)
    }

    /// Parse modification time to (hour, minute, second)
    pub fn mod_time(&self) -> (u8, u8, u8) {
        let second = ((self.last_mod_time & 0x1F) * 2) as u8;
        let minute = ((self.last_mod_time >> 5) & 0x3F) as u8;
        let hour = ((self.last_mod_time >> 11) & 0x1F) as u8;
        (hour, minute, second)
    }
}

/// Central Directory File Header (CDFH) - 46 bytes plus variable fields.
///
/// Kept for inspection only; extraction never consults it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CentralDirectoryRecord {
    pub version_created: u16,
    pub version_needed: u16,
    pub general_purpose_flags: u16,
    pub compression_method: CompressionMethod,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_length: u16,
    pub file_comment_length: u16,
    pub disk_number: u16,
    pub internal_attributes: u16,
    pub external_attributes: u32,
    pub local_header_offset: u32,
    pub file_name: String,
    pub extra: Vec<u8>,
    pub comment: String,
}

/// End of Central Directory (EOCD) - 22 bytes plus comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndOfCentralDirectoryRecord {
    pub number_of_disks: u16,
    pub central_directory_start_disk: u16,
    pub records_on_this_disk: u16,
    pub total_records: u16,
    pub central_directory_size: u32,
    pub central_directory_offset: u32,
    pub comment_length: u16,
    pub comment: String,
}

/// One decoded record, tagged by the signature that introduced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    LocalFileHeader(LocalFileHeader),
    CentralDirectory(CentralDirectoryRecord),
    EndOfCentralDirectory(EndOfCentralDirectoryRecord),
}
