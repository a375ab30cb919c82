//! Host-wide metrics collected from the /proc filesystem.
//!
//! These structures hold the normalized result of one collection pass:
//! CPU identity, load, memory and swap usage, and per-device I/O counters.

use serde::{Deserialize, Serialize};

/// Block device I/O counters from /proc/diskstats.
///
/// Source: `/proc/diskstats`
///
/// One record per physical block device. Counters are cumulative since boot.
/// Discard and flush counters were added in later kernels (4.18 and 5.5)
/// and are zero when the running kernel does not report them.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct DiskStats {
    /// Block device major number.
    /// Source: `/proc/diskstats` column 1
    pub major: u32,

    /// Block device minor number.
    /// Source: `/proc/diskstats` column 2
    pub minor: u32,

    /// Device name (sda, nvme0n1, dm-0, ...).
    /// Source: `/proc/diskstats` column 3
    pub device_name: String,

    /// Reads completed successfully.
    /// Source: `/proc/diskstats` column 4
    pub reads_completed: u64,

    /// Adjacent reads merged into one request.
    /// Source: `/proc/diskstats` column 5
    pub reads_merged: u64,

    /// Sectors read (512-byte units).
    /// Source: `/proc/diskstats` column 6
    pub sectors_read: u64,

    /// Time spent reading (ms).
    /// Source: `/proc/diskstats` column 7
    pub read_time: u64,

    /// Writes completed successfully.
    /// Source: `/proc/diskstats` column 8
    pub writes_completed: u64,

    /// Adjacent writes merged into one request.
    /// Source: `/proc/diskstats` column 9
    pub writes_merged: u64,

    /// Sectors written (512-byte units).
    /// Source: `/proc/diskstats` column 10
    pub sectors_written: u64,

    /// Time spent writing (ms).
    /// Source: `/proc/diskstats` column 11
    pub write_time: u64,

    /// I/Os currently in progress.
    /// Source: `/proc/diskstats` column 12
    pub io_in_progress: u64,

    /// Time spent doing I/Os (ms).
    /// Source: `/proc/diskstats` column 13
    pub io_time: u64,

    /// Weighted time spent doing I/Os (ms).
    /// Source: `/proc/diskstats` column 14
    pub weighted_io_time: u64,

    /// Discards completed successfully.
    /// Source: `/proc/diskstats` column 15 (kernel 4.18+)
    pub discards_completed: u64,

    /// Adjacent discards merged.
    /// Source: `/proc/diskstats` column 16 (kernel 4.18+)
    pub discards_merged: u64,

    /// Sectors discarded.
    /// Source: `/proc/diskstats` column 17 (kernel 4.18+)
    pub sectors_discarded: u64,

    /// Time spent discarding (ms).
    /// Source: `/proc/diskstats` column 18 (kernel 4.18+)
    pub discard_time: u64,

    /// Flush requests completed successfully.
    /// Source: `/proc/diskstats` column 19 (kernel 5.5+)
    pub flush_completed: u64,

    /// Time spent flushing (ms).
    /// Source: `/proc/diskstats` column 20 (kernel 5.5+)
    pub flush_time: u64,
}

/// Snapshot of host resource metrics for one collection pass.
///
/// Memory and swap values are in bytes and signed: `mem_used` is derived
/// by subtraction and is kept as-is when the kernel reports inconsistent
/// totals (e.g. inside some containers).
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct SystemSnapshot {
    /// Host name as reported by the OS, empty if unavailable.
    pub hostname: String,

    /// CPU model string.
    /// Source: last `model name` line in `/proc/cpuinfo`
    pub cpu_model: String,

    /// Number of logical processors.
    /// Source: count of `model name` lines in `/proc/cpuinfo`
    pub num_cores: u32,

    /// 1-minute load average.
    /// Source: `/proc/loadavg` field 1
    pub load_avg: f64,

    /// Used memory: MemTotal - MemFree - Buffers - Cached - Slab.
    pub mem_used: i64,

    /// Source: `MemFree` in `/proc/meminfo`
    pub mem_free: i64,

    /// Source: `Buffers` in `/proc/meminfo`
    pub mem_buffers: i64,

    /// Source: `Cached` in `/proc/meminfo`
    pub mem_cached: i64,

    /// Source: `Slab` in `/proc/meminfo`
    pub mem_slab: i64,

    /// Used swap: SwapTotal - SwapFree. Zero when no swap is configured.
    pub swap_used: i64,

    /// Source: `SwapFree` in `/proc/meminfo`
    pub swap_free: i64,

    /// Physical block devices, in `/proc/diskstats` order.
    pub disk_stats: Vec<DiskStats>,
}
