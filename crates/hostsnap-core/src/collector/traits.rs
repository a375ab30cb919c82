//! Abstractions for host access to enable testing and mocking.
//!
//! The `FileSystem` trait allows the collector to work with both the real
//! `/proc` filesystem and `statvfs(3)` on Linux, and with mock implementations
//! for testing on macOS or in CI.

use std::io;
use std::path::Path;

/// Filesystem capacity figures as reported by `statvfs(3)`.
///
/// Block counts are expressed in units of `block_size`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FsStat {
    /// Size of one block in bytes (the fragment size, `f_frsize`).
    pub block_size: u64,
    /// Total number of blocks on the filesystem.
    pub blocks: u64,
    /// Number of free blocks, including the ones reserved for root.
    pub blocks_free: u64,
    /// Total number of inodes.
    pub files: u64,
    /// Number of free inodes.
    pub files_free: u64,
}

/// Abstraction for the host interfaces the collector reads.
///
/// This trait allows collectors to read from the real system or from
/// a mock implementation for testing purposes.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    ///
    /// # Arguments
    /// * `path` - Path to the file to read
    ///
    /// # Returns
    /// The file contents as a string, or an I/O error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Queries capacity and inode counts of the filesystem containing `path`.
    fn statvfs(&self, path: &Path) -> io::Result<FsStat>;

    /// Returns the host name of the machine.
    fn hostname(&self) -> io::Result<String> {
        hostname::get().map(|h| h.to_string_lossy().into_owned())
    }
}

/// Real host implementation that delegates to `std::fs` and `statvfs(3)`.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    #[cfg(unix)]
    #[allow(clippy::unnecessary_cast)]
    fn statvfs(&self, path: &Path) -> io::Result<FsStat> {
        let st = nix::sys::statvfs::statvfs(path).map_err(io::Error::from)?;
        Ok(FsStat {
            block_size: st.fragment_size() as u64,
            blocks: st.blocks() as u64,
            blocks_free: st.blocks_free() as u64,
            files: st.files() as u64,
            files_free: st.files_free() as u64,
        })
    }

    #[cfg(not(unix))]
    fn statvfs(&self, _path: &Path) -> io::Result<FsStat> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "statvfs is not available on this platform",
        ))
    }
}
