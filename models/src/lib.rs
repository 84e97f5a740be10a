pub mod error;
pub mod hexdump;
pub mod mft;
pub mod ntfs;
pub mod options;
pub mod partition;

pub use error::ScopeError;
pub use options::DecodeOptions;
