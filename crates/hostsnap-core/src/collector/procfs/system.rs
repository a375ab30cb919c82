//! System collector for gathering host metrics from `/proc/` and `statvfs(3)`.

use std::path::Path;

use thiserror::Error;

use crate::collector::procfs::parser::{
    CpuInfo, MemInfo, ParseError, parse_cpuinfo, parse_diskstats, parse_loadavg, parse_meminfo,
};
use crate::collector::traits::FileSystem;
use crate::model::{DiskStats, TablespaceUsage};

/// Error returned by a single reader of the system collector.
#[derive(Debug, Error)]
pub enum CollectError {
    /// I/O error reading a source file or querying the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Source file content could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Tablespace has no filesystem location to query.
    #[error("empty filesystem location")]
    EmptyLocation,
}

/// Collects host-wide metrics from `/proc/`.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Returns the underlying filesystem implementation.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    fn read_proc_file(&self, name: &str) -> Result<String, CollectError> {
        let path = format!("{}/{}", self.proc_path, name);
        Ok(self.fs.read_to_string(Path::new(&path))?)
    }

    /// Collects CPU model and logical core count from `/proc/cpuinfo`.
    pub fn collect_cpuinfo(&self) -> Result<CpuInfo, CollectError> {
        let content = self.read_proc_file("cpuinfo")?;
        Ok(parse_cpuinfo(&content))
    }

    /// Collects the 1-minute load average from `/proc/loadavg`.
    pub fn collect_loadavg(&self) -> Result<f64, CollectError> {
        let content = self.read_proc_file("loadavg")?;
        Ok(parse_loadavg(&content)?)
    }

    /// Collects memory information from `/proc/meminfo`.
    pub fn collect_meminfo(&self) -> Result<MemInfo, CollectError> {
        let content = self.read_proc_file("meminfo")?;
        Ok(parse_meminfo(&content)?)
    }

    /// Collects disk I/O statistics from `/proc/diskstats`.
    ///
    /// Pseudo devices (loop, ram, legacy CD-ROM) are excluded.
    pub fn collect_diskstats(&self) -> Result<Vec<DiskStats>, CollectError> {
        let content = self.read_proc_file("diskstats")?;
        Ok(parse_diskstats(&content))
    }

    /// Collects capacity and inode usage of the filesystem holding `location`.
    pub fn collect_tablespace_usage(
        &self,
        location: &str,
    ) -> Result<TablespaceUsage, CollectError> {
        if location.is_empty() {
            return Err(CollectError::EmptyLocation);
        }
        let st = self.fs.statvfs(Path::new(location))?;

        Ok(TablespaceUsage {
            disk_used: st
                .block_size
                .saturating_mul(st.blocks.saturating_sub(st.blocks_free)),
            disk_total: st.block_size.saturating_mul(st.blocks),
            inodes_used: st.files.saturating_sub(st.files_free),
            inodes_total: st.files,
        })
    }
}
