use binrw::binread;
use std::fmt;

pub const SECTOR_SIZE: usize = 512;

/// 첫 섹터 안의 MBR 파티션 테이블 위치
pub const PARTITION_TABLE_OFFSET: usize = 0x1BE;
pub const PARTITION_ENTRY_SIZE: usize = 16;
pub const PARTITION_SLOTS: usize = 4;

pub const BOOTABLE: u8 = 0x80;
pub const NTFS_PARTITION_TYPE: u8 = 0x70;

/// 패킹된 CHS 값의 하위 10비트가 실린더
pub const CYLINDER_MASK: u16 = 0x03FF;

/// MBR 파티션 테이블 엔트리 (16바이트)
#[binread]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct PartitionEntry {
    pub boot_indicator: u8, // 0x80 = 부팅 가능
    pub start_head: u8,

    #[br(temp)]
    start_chs: u16,
    #[br(calc = ((start_chs & 0xFF) as u8) >> 2)]
    pub start_sector: u8,
    #[br(calc = start_chs & CYLINDER_MASK)]
    pub start_cylinder: u16,

    pub partition_type: u8,
    pub end_head: u8,

    #[br(temp)]
    end_chs: u16,
    #[br(calc = ((end_chs & 0xFF) as u8) >> 2)]
    pub end_sector: u8,
    #[br(calc = end_chs & CYLINDER_MASK)]
    pub end_cylinder_sector: u16,

    pub relative_sectors: u32, // 첫 섹터의 LBA
    pub total_sectors: u32,
}

impl PartitionEntry {
    /// MBR 섹터 안에서 `index`번 슬롯의 바이트 오프셋
    pub const fn slot_offset(index: usize) -> usize {
        PARTITION_TABLE_OFFSET + index * PARTITION_ENTRY_SIZE
    }

    pub fn is_bootable(&self) -> bool {
        self.boot_indicator == BOOTABLE
    }

    /// 파티션 부트 섹터의 절대 바이트 오프셋
    pub fn boot_offset(&self) -> u64 {
        self.relative_sectors as u64 * SECTOR_SIZE as u64
    }
}

impl fmt::Display for PartitionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Boot indicator: {:#04x}", self.boot_indicator)?;
        writeln!(f, "Partition type: {:#04x}", self.partition_type)?;
        writeln!(
            f,
            "Start CHS: {}/{}/{}",
            self.start_cylinder, self.start_head, self.start_sector
        )?;
        writeln!(
            f,
            "End CHS: {}/{}/{}",
            self.end_cylinder_sector, self.end_head, self.end_sector
        )?;
        writeln!(f, "Relative sectors: {}", self.relative_sectors)?;
        writeln!(f, "Total sectors: {}", self.total_sectors)?;
        writeln!(f, "Boot offset: {:#x}", self.boot_offset())
    }
}
