use crate::source::ByteSource;
use anyhow::{Context, Result};
use models::hexdump::{HexDump, DEFAULT_WIDTH};
use models::mft::{FileRecordHeader, SystemFile, MFT_RECORD_SIZE, SYSTEM_RECORD_COUNT};
use models::ntfs::{BootSector, BOOT_SECTOR_SIZE};
use models::partition::{PartitionEntry, SECTOR_SIZE};
use models::{DecodeOptions, ScopeError};
use parser::{parse_boot_sector, parse_file_record_header, parse_partition_table};
use std::fmt;
use std::ops::Deref;

/// A decoded structure together with the raw bytes it was decoded from.
#[derive(Debug, Clone)]
pub struct Block<T> {
    /// Absolute disk offset of `raw`
    pub offset: u64,
    pub raw: Vec<u8>,
    pub value: T,
}

impl<T> Block<T> {
    pub fn hexdump(&self, width: usize) -> HexDump<'_> {
        HexDump::new(&self.raw, width, self.offset)
    }
}

impl<T> Deref for Block<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> fmt::Display for Block<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.hexdump(DEFAULT_WIDTH), f)
    }
}

/// Walks MBR -> NTFS boot sector -> $MFT, each stage handing the next one its absolute offset.
pub struct VolumeScanner<S> {
    source: S,
    options: DecodeOptions,
}

impl<S: ByteSource> VolumeScanner<S> {
    pub fn new(source: S, options: DecodeOptions) -> Self {
        Self { source, options }
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn read(&mut self, offset: u64, length: usize) -> Result<Vec<u8>, ScopeError> {
        Ok(self.source.read_at(offset, length)?)
    }

    pub fn read_partition_table(&mut self) -> Result<Block<PartitionEntry>> {
        let raw = self.read(0, SECTOR_SIZE).context("Failed to read MBR")?;
        let entry = parse_partition_table(&raw).context("Failed to parse MBR partition table")?;

        tracing::info!(
            "Bootable NTFS partition at sector {} (byte offset {:#x})",
            entry.relative_sectors,
            entry.boot_offset()
        );

        Ok(Block {
            offset: 0,
            raw,
            value: entry,
        })
    }

    pub fn read_boot_sector(&mut self, partition: &PartitionEntry) -> Result<Block<BootSector>> {
        let offset = partition.boot_offset();
        let raw = self
            .read(offset, BOOT_SECTOR_SIZE)
            .with_context(|| format!("Failed to read VBR at {:#x}", offset))?;
        let vbr = parse_boot_sector(&raw, offset, &self.options).context("Failed to parse VBR")?;

        if !vbr.has_ntfs_signature() {
            tracing::warn!("Unexpected OEM ID {:?} at {:#x}", vbr.oem_id_str(), offset);
        }
        tracing::info!(
            cluster_size = vbr.cluster_size(),
            mft_lcn = vbr.mft_lcn,
            "Decoded NTFS boot sector"
        );

        Ok(Block {
            offset,
            raw,
            value: vbr,
        })
    }

    pub fn read_record(&mut self, offset: u64) -> Result<Block<FileRecordHeader>> {
        let raw = self
            .read(offset, MFT_RECORD_SIZE)
            .with_context(|| format!("Failed to read MFT record at {:#x}", offset))?;
        let header = parse_file_record_header(&raw, offset, &self.options)
            .with_context(|| format!("Failed to parse MFT record at {:#x}", offset))?;

        Ok(Block {
            offset,
            raw,
            value: header,
        })
    }

    /// Iterates over the 16 reserved metadata records at the start of $MFT.
    pub fn system_records(&mut self, vbr: &BootSector) -> Result<SystemRecords<'_, S>> {
        let mft_offset = vbr.mft_offset().ok_or(ScopeError::GeometryOverflow {
            mft_lcn: vbr.mft_lcn,
        })?;
        tracing::info!("$MFT starts at {:#x}", mft_offset);

        Ok(SystemRecords {
            scanner: self,
            index: 0,
            offset: mft_offset,
            failed: false,
        })
    }
}

/// Fixed-stride walk over MFT records 0-15.
///
/// Yields at most [`SYSTEM_RECORD_COUNT`] items and stops after the first error.
pub struct SystemRecords<'a, S> {
    scanner: &'a mut VolumeScanner<S>,
    index: u64,
    offset: u64,
    failed: bool,
}

impl<S: ByteSource> Iterator for SystemRecords<'_, S> {
    type Item = Result<(SystemFile, Block<FileRecordHeader>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let file = SystemFile::from_index(self.index)?;

        let offset = self.offset;
        self.index += 1;
        self.offset = self.offset.saturating_add(MFT_RECORD_SIZE as u64);

        let result = self
            .scanner
            .read_record(offset)
            .with_context(|| format!("Failed to collect {}", file.name()));
        match &result {
            Ok(block) => tracing::debug!(
                "{} at {:#x}: signature {:?}, flags {:#06x}",
                file,
                offset,
                block.signature_str(),
                block.flags
            ),
            Err(_) => self.failed = true,
        }

        Some(result.map(|block| (file, block)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = SYSTEM_RECORD_COUNT.saturating_sub(self.index as usize);
        (0, Some(remaining))
    }
}
