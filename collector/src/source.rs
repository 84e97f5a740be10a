use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Positioned read access to a disk, partition image or any other byte range.
pub trait ByteSource {
    /// Reads exactly `length` bytes at absolute `offset`.
    /// A short read fails with [`io::ErrorKind::UnexpectedEof`].
    fn read_at(&mut self, offset: u64, length: usize) -> io::Result<Vec<u8>>;
}

impl<T: Read + Seek> ByteSource for T {
    fn read_at(&mut self, offset: u64, length: usize) -> io::Result<Vec<u8>> {
        self.seek(SeekFrom::Start(offset))?;
        let mut buffer = vec![0u8; length];
        self.read_exact(&mut buffer)?;
        Ok(buffer)
    }
}

/// Opens a raw device (e.g. `\\.\PhysicalDrive0`) read-only.
///
/// The device is shared for reading and writing so a mounted volume can be inspected.
#[cfg(windows)]
pub fn open_device(path: &Path) -> io::Result<File> {
    use std::os::windows::ffi::OsStrExt;
    use std::os::windows::io::FromRawHandle;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::HANDLE;
    use windows::Win32::Storage::FileSystem::{
        CreateFileW, FILE_ATTRIBUTE_NORMAL, FILE_GENERIC_READ, FILE_SHARE_READ, FILE_SHARE_WRITE,
        OPEN_EXISTING,
    };

    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();

    unsafe {
        let handle: HANDLE = CreateFileW(
            PCWSTR(wide.as_ptr()),
            FILE_GENERIC_READ.0,
            FILE_SHARE_READ | FILE_SHARE_WRITE,
            None,
            OPEN_EXISTING,
            FILE_ATTRIBUTE_NORMAL,
            HANDLE::default(),
        )?;

        Ok(File::from_raw_handle(handle.0 as _))
    }
}

/// Opens a block device (e.g. `/dev/sda`) or disk image read-only.
#[cfg(not(windows))]
pub fn open_device(path: &Path) -> io::Result<File> {
    File::open(path)
}
