pub mod scan;
pub mod source;

pub use models::{DecodeOptions, ScopeError};
pub use scan::{Block, SystemRecords, VolumeScanner};
pub use source::{open_device, ByteSource};
