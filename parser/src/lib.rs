pub mod mft;
pub mod ntfs;
pub mod partition;

pub use mft::parse_file_record_header;
pub use ntfs::parse_boot_sector;
pub use partition::parse_partition_table;
