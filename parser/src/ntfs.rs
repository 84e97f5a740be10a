use binrw::BinReaderExt;
use models::ntfs::{BootSector, BOOT_SECTOR_SIZE, NTFS_OEM_ID};
use models::{DecodeOptions, ScopeError};
use std::io::Cursor;

/// `partition_offset`에서 읽은 512바이트 Raw Data를 NTFS BootSector 구조체로 변환한다.
pub fn parse_boot_sector(
    data: &[u8],
    partition_offset: u64,
    options: &DecodeOptions,
) -> Result<BootSector, ScopeError> {
    ScopeError::ensure_len("NTFS Boot Sector", data, BOOT_SECTOR_SIZE)?;

    let mut reader = Cursor::new(data);
    let boot_sector: BootSector = reader
        .read_le_args((partition_offset,))
        .map_err(|e| ScopeError::ParseError {
            structure: "NTFS Boot Sector",
            details: e.to_string(),
        })?;

    if options.strict && !boot_sector.has_ntfs_signature() {
        return Err(ScopeError::SignatureMismatch {
            structure: "NTFS Boot Sector",
            expected: String::from_utf8_lossy(NTFS_OEM_ID).into_owned(),
            found: boot_sector.oem_id_str(),
        });
    }

    Ok(boot_sector)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTITION_OFFSET: u64 = 1_048_576;

    fn boot_sector(oem: &[u8; 8], sectors_per_cluster: u8, mft_lcn: u64) -> Vec<u8> {
        let mut data = vec![0u8; BOOT_SECTOR_SIZE];
        data[0..3].copy_from_slice(&[0xEB, 0x52, 0x90]);
        data[3..11].copy_from_slice(oem);
        data[0x0B..0x0D].copy_from_slice(&512u16.to_le_bytes());
        data[0x0D] = sectors_per_cluster;
        data[0x0E..0x10].copy_from_slice(&0u16.to_le_bytes());
        data[0x15] = 0xF8;
        data[0x18..0x1A].copy_from_slice(&63u16.to_le_bytes());
        data[0x1A..0x1C].copy_from_slice(&255u16.to_le_bytes());
        data[0x1C..0x20].copy_from_slice(&2048u32.to_le_bytes());
        data[0x28..0x30].copy_from_slice(&209_715_199u64.to_le_bytes());
        data[0x30..0x38].copy_from_slice(&mft_lcn.to_le_bytes());
        data[0x38..0x40].copy_from_slice(&2u64.to_le_bytes());
        data[0x40..0x44].copy_from_slice(&0xF6u32.to_le_bytes());
        data[0x44..0x48].copy_from_slice(&0x01u32.to_le_bytes());
        data[0x48..0x50].copy_from_slice(&0x1234_5678_9ABC_DEF0u64.to_le_bytes());
        data[0x50..0x54].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        data[0x1FE] = 0x55;
        data[0x1FF] = 0xAA;
        data
    }

    #[test]
    fn mft_offset_follows_cluster_geometry() {
        let data = boot_sector(NTFS_OEM_ID, 8, 786_432);
        let vbr = parse_boot_sector(&data, PARTITION_OFFSET, &DecodeOptions::default()).unwrap();

        assert_eq!(vbr.cluster_size(), 4096);
        assert_eq!(vbr.mft_offset(), Some(1_048_576 + 8 * 512 * 786_432));
        assert_eq!(vbr.mft_offset(), Some(3_222_274_048));
    }

    #[test]
    fn every_field_decodes_at_its_offset() {
        let data = boot_sector(NTFS_OEM_ID, 8, 786_432);
        let vbr = parse_boot_sector(&data, PARTITION_OFFSET, &DecodeOptions::default()).unwrap();

        assert_eq!(vbr.partition_offset, PARTITION_OFFSET);
        assert_eq!(vbr.jump_instruction, [0xEB, 0x52, 0x90]);
        assert_eq!(vbr.oem_id_str(), "NTFS    ");
        assert_eq!(vbr.bytes_per_sector, 512);
        assert_eq!(vbr.sectors_per_cluster, 8);
        assert_eq!(vbr.reserved_sectors, 0);
        assert_eq!(vbr.media_descriptor, 0xF8);
        assert_eq!(vbr.sectors_per_track, 63);
        assert_eq!(vbr.heads, 255);
        assert_eq!(vbr.hidden_sectors, 2048);
        assert_eq!(vbr.total_sectors, 209_715_199);
        assert_eq!(vbr.mft_lcn, 786_432);
        assert_eq!(vbr.mft_mirr_lcn, 2);
        assert_eq!(vbr.clusters_per_mft_record, 0xF6);
        assert_eq!(vbr.clusters_per_index_record, 0x01);
        assert_eq!(vbr.volume_serial_number, 0x1234_5678_9ABC_DEF0);
        assert_eq!(vbr.checksum, 0xDEAD_BEEF);
        assert_eq!(vbr.end_marker, 0xAA55);
        assert!(vbr.has_end_marker());
    }

    #[test]
    fn missing_end_marker_is_reported_but_not_rejected() {
        let mut data = boot_sector(NTFS_OEM_ID, 8, 4);
        data[0x1FE] = 0;
        data[0x1FF] = 0;

        let vbr = parse_boot_sector(&data, 0, &DecodeOptions::strict()).unwrap();
        assert!(!vbr.has_end_marker());
        assert!(vbr.to_string().contains("End marker: 0x0000 (unexpected)"));

        data[0x1FE] = 0x55;
        data[0x1FF] = 0xAA;
        let vbr = parse_boot_sector(&data, 0, &DecodeOptions::default()).unwrap();
        assert!(vbr.to_string().contains("End marker: 0xaa55\n"));
    }

    #[test]
    fn foreign_oem_id_is_accepted_unless_strict() {
        let data = boot_sector(b"MSDOS5.0", 8, 4);

        let vbr = parse_boot_sector(&data, 0, &DecodeOptions::default()).unwrap();
        assert!(!vbr.has_ntfs_signature());

        let err = parse_boot_sector(&data, 0, &DecodeOptions::strict()).unwrap_err();
        match err {
            ScopeError::SignatureMismatch { expected, found, .. } => {
                assert_eq!(expected, "NTFS    ");
                assert_eq!(found, "MSDOS5.0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_mode_accepts_ntfs_oem_id() {
        let data = boot_sector(NTFS_OEM_ID, 8, 4);
        assert!(parse_boot_sector(&data, 0, &DecodeOptions::strict()).is_ok());
    }

    #[test]
    fn overflowing_geometry_still_decodes() {
        let data = boot_sector(NTFS_OEM_ID, 8, u64::MAX);
        let vbr = parse_boot_sector(&data, 0, &DecodeOptions::default()).unwrap();

        assert_eq!(vbr.mft_lcn, u64::MAX);
        assert_eq!(vbr.mft_offset(), None);
    }

    #[test]
    fn sector_length_boundary() {
        let data = boot_sector(NTFS_OEM_ID, 8, 4);
        assert!(parse_boot_sector(&data, 0, &DecodeOptions::default()).is_ok());

        let err = parse_boot_sector(&data[..BOOT_SECTOR_SIZE - 1], 0, &DecodeOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ScopeError::TruncatedBuffer { expected: 512, actual: 511, .. }
        ));
    }
}
