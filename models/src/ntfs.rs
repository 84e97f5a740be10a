use binrw::BinRead;
use std::fmt;

pub const BOOT_SECTOR_SIZE: usize = 512;
pub const NTFS_OEM_ID: &[u8; 8] = b"NTFS    ";
pub const END_OF_SECTOR_MARKER: u16 = 0xAA55;

/// NTFS Volume Boot Record (파티션의 첫 512바이트)
/// `partition_offset`은 디스크에 없는 값이다. 읽기 인자로 받아 $MFT 절대 위치 계산에 쓴다.
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little, import(partition_offset: u64))]
pub struct BootSector {
    #[br(calc = partition_offset)]
    pub partition_offset: u64,

    pub jump_instruction: [u8; 3],
    pub oem_id: [u8; 8],

    // 0x0B: BPB (BIOS Parameter Block) 시작
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,

    #[br(pad_before = 5)] // NTFS에서는 항상 0
    pub media_descriptor: u8,

    #[br(pad_before = 2)]
    pub sectors_per_track: u16,
    pub heads: u16,
    pub hidden_sectors: u32,

    // 0x28: 확장 BPB
    #[br(pad_before = 8)]
    pub total_sectors: u64,
    pub mft_lcn: u64,
    pub mft_mirr_lcn: u64,
    pub clusters_per_mft_record: u32,
    pub clusters_per_index_record: u32,
    pub volume_serial_number: u64,
    pub checksum: u32,

    // 부트스트랩 코드(426바이트) 건너뜀
    #[br(pad_before = 426)]
    pub end_marker: u16,
}

impl BootSector {
    /// 클러스터 크기(Byte 단위)를 반환
    pub fn cluster_size(&self) -> u64 {
        self.bytes_per_sector as u64 * self.sectors_per_cluster as u64
    }

    /// $MFT가 위치한 실제 바이트 오프셋 계산 (64비트를 넘으면 None)
    pub fn mft_offset(&self) -> Option<u64> {
        self.cluster_size()
            .checked_mul(self.mft_lcn)?
            .checked_add(self.partition_offset)
    }

    pub fn oem_id_str(&self) -> String {
        String::from_utf8_lossy(&self.oem_id).into_owned()
    }

    pub fn has_ntfs_signature(&self) -> bool {
        &self.oem_id == NTFS_OEM_ID
    }

    /// 0x1FE의 섹터 종료 마커(0x55 0xAA) 확인. 검증에는 쓰지 않고 표시만 한다.
    pub fn has_end_marker(&self) -> bool {
        self.end_marker == END_OF_SECTOR_MARKER
    }
}

impl fmt::Display for BootSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OEM ID: {:?}", self.oem_id_str())?;
        writeln!(f, "Bytes per sector: {}", self.bytes_per_sector)?;
        writeln!(f, "Sectors per cluster: {}", self.sectors_per_cluster)?;
        writeln!(f, "Cluster size: {} bytes", self.cluster_size())?;
        writeln!(f, "Media descriptor: {:#04x}", self.media_descriptor)?;
        writeln!(f, "Total sectors: {}", self.total_sectors)?;
        writeln!(f, "MFT LCN: {}", self.mft_lcn)?;
        writeln!(f, "MFTMirr LCN: {}", self.mft_mirr_lcn)?;
        writeln!(f, "Clusters per MFT record: {:#x}", self.clusters_per_mft_record)?;
        writeln!(f, "Clusters per index record: {:#x}", self.clusters_per_index_record)?;
        writeln!(f, "Volume serial number: {:016X}", self.volume_serial_number)?;
        writeln!(
            f,
            "End marker: {:#06x}{}",
            self.end_marker,
            if self.has_end_marker() { "" } else { " (unexpected)" }
        )?;
        match self.mft_offset() {
            Some(offset) => writeln!(f, "MFT offset: {:#x}", offset),
            None => writeln!(f, "MFT offset: <overflow>"),
        }
    }
}
