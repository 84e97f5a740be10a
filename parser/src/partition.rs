use binrw::BinReaderExt;
use models::partition::{
    PartitionEntry, BOOTABLE, NTFS_PARTITION_TYPE, PARTITION_SLOTS, SECTOR_SIZE,
};
use models::ScopeError;
use std::io::Cursor;

/// 512바이트 MBR의 4개 슬롯을 순서대로 검사해 첫 번째 부팅 가능한 NTFS 엔트리를 반환한다.
pub fn parse_partition_table(sector: &[u8]) -> Result<PartitionEntry, ScopeError> {
    ScopeError::ensure_len("MBR Partition Table", sector, SECTOR_SIZE)?;

    let slot = (0..PARTITION_SLOTS)
        .map(PartitionEntry::slot_offset)
        .find(|&base| sector[base] == BOOTABLE && sector[base + 4] == NTFS_PARTITION_TYPE)
        .ok_or(ScopeError::NoBootablePartition {
            slots: PARTITION_SLOTS,
        })?;

    let mut reader = Cursor::new(sector);
    reader.set_position(slot as u64);

    let entry: PartitionEntry = reader.read_le().map_err(|e| ScopeError::ParseError {
        structure: "MBR Partition Entry",
        details: e.to_string(),
    })?;

    Ok(entry)
}
