use binrw::BinRead;
use std::fmt;

/// MFT 레코드 고정 크기 (부트 섹터의 `clusters_per_mft_record`는 참조하지 않음)
pub const MFT_RECORD_SIZE: usize = 1024;

/// "FILE" (리틀 엔디안 u32)
pub const FILE_SIGNATURE: u32 = 0x454C_4946;

/// 앞의 16개 레코드는 메타데이터 파일용으로 예약됨
pub const SYSTEM_RECORD_COUNT: usize = 16;

pub const FLAG_IN_USE: u16 = 0x01;
pub const FLAG_DIRECTORY: u16 = 0x02;

const RECORD_NUMBER_MASK: u64 = 0x0000_FFFF_FFFF_FFFF;

/// NTFS MFT File Record Header
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little, import(record_offset: u64))]
pub struct FileRecordHeader {
    #[br(calc = record_offset)]
    pub record_offset: u64,

    pub signature: u32,
    pub usa_offset: u16,
    pub usa_count: u16,
    pub lsn: u64,
    pub sequence_number: u16,
    pub link_count: u16,
    pub attr_offset: u16,
    pub flags: u16,
    pub bytes_in_use: u32,
    pub bytes_allocated: u32,
    pub base_file_record: u64,
    pub next_attr_id: u16,
    /// 각 섹터 마지막 2바이트를 대체하는 Update Sequence 값 (Fixup은 적용하지 않음)
    pub update_sequence: u16,
}

impl FileRecordHeader {
    pub fn has_file_signature(&self) -> bool {
        self.signature == FILE_SIGNATURE
    }

    pub fn signature_str(&self) -> String {
        String::from_utf8_lossy(&self.signature.to_le_bytes()).into_owned()
    }

    pub fn is_in_use(&self) -> bool {
        self.flags & FLAG_IN_USE != 0
    }

    pub fn is_directory(&self) -> bool {
        self.flags & FLAG_DIRECTORY != 0
    }

    /// Base 파일 참조의 하위 48비트 (레코드 번호)
    pub fn base_record_number(&self) -> u64 {
        self.base_file_record & RECORD_NUMBER_MASK
    }

    /// Base 파일 참조의 상위 16비트 (시퀀스 번호)
    pub fn base_sequence_number(&self) -> u16 {
        (self.base_file_record >> 48) as u16
    }
}

impl fmt::Display for FileRecordHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Signature: {:?}", self.signature_str())?;
        writeln!(f, "Fixup array: offset {:#x}, {} entries", self.usa_offset, self.usa_count)?;
        writeln!(f, "LSN: {}", self.lsn)?;
        writeln!(f, "Sequence number: {}", self.sequence_number)?;
        writeln!(f, "Hard links: {}", self.link_count)?;
        writeln!(f, "First attribute offset: {:#x}", self.attr_offset)?;
        writeln!(
            f,
            "Flags: {:#06x} (in use: {}, directory: {})",
            self.flags,
            self.is_in_use(),
            self.is_directory()
        )?;
        writeln!(f, "Bytes in use / allocated: {} / {}", self.bytes_in_use, self.bytes_allocated)?;
        writeln!(
            f,
            "Base record: {} (seq {})",
            self.base_record_number(),
            self.base_sequence_number()
        )?;
        writeln!(f, "Next attribute id: {}", self.next_attr_id)?;
        writeln!(f, "Update sequence: {:#06x}", self.update_sequence)
    }
}

/// MFT 0~15번 레코드를 차지하는 시스템 메타데이터 파일
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemFile {
    MFT,
    MFTMirr,
    LogFile,
    Volume,
    AttrDef,
    RootDirectory,
    Bitmap,
    Boot,
    BadClus,
    Secure,
    UpCase,
    Extend,
    Reserved(u8),
}

impl SystemFile {
    pub fn from_index(index: u64) -> Option<Self> {
        let file = match index {
            0 => Self::MFT,
            1 => Self::MFTMirr,
            2 => Self::LogFile,
            3 => Self::Volume,
            4 => Self::AttrDef,
            5 => Self::RootDirectory,
            6 => Self::Bitmap,
            7 => Self::Boot,
            8 => Self::BadClus,
            9 => Self::Secure,
            10 => Self::UpCase,
            11 => Self::Extend,
            12..=15 => Self::Reserved(index as u8),
            _ => return None,
        };
        Some(file)
    }

    pub fn index(&self) -> u64 {
        match self {
            Self::MFT => 0,
            Self::MFTMirr => 1,
            Self::LogFile => 2,
            Self::Volume => 3,
            Self::AttrDef => 4,
            Self::RootDirectory => 5,
            Self::Bitmap => 6,
            Self::Boot => 7,
            Self::BadClus => 8,
            Self::Secure => 9,
            Self::UpCase => 10,
            Self::Extend => 11,
            Self::Reserved(index) => *index as u64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MFT => "$MFT",
            Self::MFTMirr => "$MFTMirr",
            Self::LogFile => "$LogFile",
            Self::Volume => "$Volume",
            Self::AttrDef => "$AttrDef",
            Self::RootDirectory => ".",
            Self::Bitmap => "$Bitmap",
            Self::Boot => "$Boot",
            Self::BadClus => "$BadClus",
            Self::Secure => "$Secure",
            Self::UpCase => "$UpCase",
            Self::Extend => "$Extend",
            Self::Reserved(_) => "<reserved>",
        }
    }
}

impl fmt::Display for SystemFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index(), self.name())
    }
}
