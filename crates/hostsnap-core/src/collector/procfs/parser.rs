//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of various `/proc` files
//! into structured data. They are designed to be easily testable with string inputs.

use std::collections::HashMap;

use thiserror::Error;
use tracing::trace;

use crate::model::DiskStats;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

// ============ CPU Info Parser ============

/// Processor identity from `/proc/cpuinfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuInfo {
    /// Model string of the last processor entry.
    pub model: String,
    /// Number of logical processors (one per `model name` line).
    pub num_cores: u32,
}

/// Parses `/proc/cpuinfo` content.
///
/// Every line starting with `model name` counts as one logical processor.
/// The model is taken from the text after the first colon; later entries
/// overwrite earlier ones.
pub fn parse_cpuinfo(content: &str) -> CpuInfo {
    let mut info = CpuInfo::default();

    for line in content.lines() {
        if line.starts_with("model name") {
            if let Some((_, model)) = line.split_once(':') {
                info.model = model.trim().to_string();
            }
            info.num_cores += 1;
        }
    }

    info
}

// ============ Load Average Parser ============

/// Parses the 1-minute load average from `/proc/loadavg`.
///
/// Format: `load1 load5 load15 running/total last_pid`. Anything other than
/// exactly five fields is rejected.
pub fn parse_loadavg(content: &str) -> Result<f64, ParseError> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() != 5 {
        return Err(ParseError::new(format!(
            "invalid loadavg format: expected 5 fields, got {}",
            parts.len()
        )));
    }

    parts[0]
        .parse()
        .map_err(|_| ParseError::new(format!("invalid load1: {:?}", parts[0])))
}

// ============ Memory Info Parser ============

const MEM_TOTAL: &str = "MemTotal:";
const MEM_FREE: &str = "MemFree:";
const BUFFERS: &str = "Buffers:";
const CACHED: &str = "Cached:";
const SLAB: &str = "Slab:";
const SWAP_TOTAL: &str = "SwapTotal:";
const SWAP_FREE: &str = "SwapFree:";

/// Parsed `/proc/meminfo` as a lookup table of byte values.
///
/// Keys keep their trailing colon (`"MemTotal:"`), exactly as they appear
/// in the file. Only `<key> <value> kB` lines are recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemInfo {
    values: HashMap<String, i64>,
}

/// Swap usage derived from `/proc/meminfo`, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapUsage {
    pub used: i64,
    pub free: i64,
}

impl MemInfo {
    /// Returns the value for `key` in bytes, if present.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    /// Returns the value for `key` in bytes, or zero if absent.
    pub fn value(&self, key: &str) -> i64 {
        self.get(key).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mem_free(&self) -> i64 {
        self.value(MEM_FREE)
    }

    pub fn buffers(&self) -> i64 {
        self.value(BUFFERS)
    }

    pub fn cached(&self) -> i64 {
        self.value(CACHED)
    }

    pub fn slab(&self) -> i64 {
        self.value(SLAB)
    }

    /// MemTotal - MemFree - Buffers - Cached - Slab.
    ///
    /// Not clamped: inconsistent sources yield a negative value.
    pub fn mem_used(&self) -> i64 {
        self.value(MEM_TOTAL)
            .saturating_sub(self.mem_free())
            .saturating_sub(self.buffers())
            .saturating_sub(self.cached())
            .saturating_sub(self.slab())
    }

    /// Swap usage, if the kernel reports a swap subsystem.
    ///
    /// Returns `None` when either `SwapTotal` or `SwapFree` is missing, and
    /// when both are zero. The file format does not distinguish "no swap
    /// configured" from "zero-sized swap", so both map to `None`.
    pub fn swap(&self) -> Option<SwapUsage> {
        let total = self.get(SWAP_TOTAL)?;
        let free = self.get(SWAP_FREE)?;
        if total == 0 && free == 0 {
            return None;
        }
        Some(SwapUsage {
            used: total.saturating_sub(free),
            free,
        })
    }
}

/// Parses `/proc/meminfo` content.
///
/// Values are converted from kB to bytes. A `kB` line whose value is not an
/// integer aborts the whole parse.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();

    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 || fields[2] != "kB" {
            continue;
        }
        let kb: i64 = fields[1].parse().map_err(|_| {
            ParseError::new(format!("invalid value for {}: {:?}", fields[0], fields[1]))
        })?;
        info.values
            .insert(fields[0].to_string(), kb.saturating_mul(1024));
    }

    Ok(info)
}

// ============ Disk Stats Parser ============

/// Major numbers of block devices not backed by physical storage.
///
/// 1 is RAM disk, 7 is loopback, 11 is the legacy SCSI CD-ROM class.
pub const PSEUDO_DEVICE_MAJORS: [u32; 3] = [1, 7, 11];

/// Returns true if `major` belongs to a pseudo block device class.
pub fn is_pseudo_device(major: u32) -> bool {
    PSEUDO_DEVICE_MAJORS.contains(&major)
}

/// Number of columns present on every supported kernel.
const DISKSTATS_MANDATORY_FIELDS: usize = 14;

/// A group of trailing `/proc/diskstats` columns added by a newer kernel.
struct OptionalColumns {
    /// Minimum number of fields on the line for this group to be present.
    min_fields: usize,
    apply: fn(&mut DiskStats, &[&str]),
}

/// Optional column groups, oldest first.
const DISKSTATS_OPTIONAL_COLUMNS: [OptionalColumns; 2] = [
    // discards, kernel 4.18
    OptionalColumns {
        min_fields: 18,
        apply: apply_discard_columns,
    },
    // flushes, kernel 5.5
    OptionalColumns {
        min_fields: 20,
        apply: apply_flush_columns,
    },
];

fn optional_counter(parts: &[&str], idx: usize) -> u64 {
    parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0)
}

fn apply_discard_columns(disk: &mut DiskStats, parts: &[&str]) {
    disk.discards_completed = optional_counter(parts, 14);
    disk.discards_merged = optional_counter(parts, 15);
    disk.sectors_discarded = optional_counter(parts, 16);
    disk.discard_time = optional_counter(parts, 17);
}

fn apply_flush_columns(disk: &mut DiskStats, parts: &[&str]) {
    disk.flush_completed = optional_counter(parts, 18);
    disk.flush_time = optional_counter(parts, 19);
}

/// Parses a single `/proc/diskstats` line.
///
/// Returns `None` if the line has fewer than 14 fields or any of the first
/// 14 fields is malformed. Optional discard/flush fields that fail to parse
/// are set to zero. Pseudo devices are not filtered here.
pub fn parse_diskstats_line(line: &str) -> Option<DiskStats> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < DISKSTATS_MANDATORY_FIELDS {
        return None;
    }

    let counter = |idx: usize| parts[idx].parse::<u64>().ok();

    let mut disk = DiskStats {
        major: parts[0].parse().ok()?,
        minor: parts[1].parse().ok()?,
        device_name: parts[2].to_string(),
        reads_completed: counter(3)?,
        reads_merged: counter(4)?,
        sectors_read: counter(5)?,
        read_time: counter(6)?,
        writes_completed: counter(7)?,
        writes_merged: counter(8)?,
        sectors_written: counter(9)?,
        write_time: counter(10)?,
        io_in_progress: counter(11)?,
        io_time: counter(12)?,
        weighted_io_time: counter(13)?,
        ..Default::default()
    };

    for columns in &DISKSTATS_OPTIONAL_COLUMNS {
        if parts.len() >= columns.min_fields {
            (columns.apply)(&mut disk, &parts);
        }
    }

    Some(disk)
}

/// Parses `/proc/diskstats` content.
///
/// Format: major minor name reads r_merged r_sectors r_time writes w_merged w_sectors w_time
/// io_pending io_time w_io_time [discards d_merged d_sectors d_time [flushes f_time]]
///
/// Malformed lines and pseudo devices (see [`PSEUDO_DEVICE_MAJORS`]) are
/// skipped; the remaining devices keep their file order.
pub fn parse_diskstats(content: &str) -> Vec<DiskStats> {
    let mut disks = Vec::new();

    for line in content.lines() {
        let Some(disk) = parse_diskstats_line(line) else {
            if !line.trim().is_empty() {
                trace!(line, "skipping malformed diskstats line");
            }
            continue;
        };
        if is_pseudo_device(disk.major) {
            continue;
        }
        disks.push(disk);
    }

    disks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cpuinfo() {
        let content = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz
cpu MHz\t\t: 2400.000

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz
cpu MHz\t\t: 2400.000
";
        let info = parse_cpuinfo(content);

        assert_eq!(info.num_cores, 2);
        assert_eq!(info.model, "Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz");
    }

    #[test]
    fn test_parse_cpuinfo_last_model_wins() {
        let content = "\
model name\t: First CPU
model name\t: Second CPU
model name\t:   Third CPU
";
        let info = parse_cpuinfo(content);

        assert_eq!(info.num_cores, 3);
        assert_eq!(info.model, "Third CPU");
    }

    #[test]
    fn test_parse_cpuinfo_prefix_is_exact() {
        // Different case and leading whitespace do not match.
        let content = "Model Name\t: Upper\n model name\t: Indented\nmodel name\t: Real\n";
        let info = parse_cpuinfo(content);

        assert_eq!(info.num_cores, 1);
        assert_eq!(info.model, "Real");
    }

    #[test]
    fn test_parse_cpuinfo_without_colon_still_counts() {
        let content = "model name\t: Real CPU\nmodel name broken line\n";
        let info = parse_cpuinfo(content);

        assert_eq!(info.num_cores, 2);
        assert_eq!(info.model, "Real CPU");
    }

    #[test]
    fn test_parse_cpuinfo_arm_without_model_name() {
        let content = "processor\t: 0\nBogoMIPS\t: 48.00\nCPU implementer\t: 0x41\n";
        let info = parse_cpuinfo(content);

        assert_eq!(info, CpuInfo::default());
    }

    #[test]
    fn test_parse_loadavg() {
        let load = parse_loadavg("0.15 0.10 0.05 1/150 1234\n").unwrap();
        assert!((load - 0.15).abs() < 0.001);
    }

    #[test]
    fn test_parse_loadavg_wrong_field_count() {
        assert!(parse_loadavg("0.15 0.10 0.05 1/150").is_err());
        assert!(parse_loadavg("0.15 0.10 0.05 1/150 1234 extra").is_err());
        assert!(parse_loadavg("").is_err());
    }

    #[test]
    fn test_parse_loadavg_invalid_number() {
        assert!(parse_loadavg("high 0.10 0.05 1/150 1234").is_err());
    }

    #[test]
    fn test_parse_meminfo() {
        let content = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
Slab:             512000 kB
HugePages_Total:       0
";
        let info = parse_meminfo(content).unwrap();

        assert_eq!(info.len(), 8);
        assert_eq!(info.get("MemTotal:"), Some(16384000 * 1024));
        assert_eq!(info.mem_free(), 8192000 * 1024);
        assert_eq!(info.buffers(), 512000 * 1024);
        assert_eq!(info.cached(), 2048000 * 1024);
        assert_eq!(info.slab(), 512000 * 1024);
        // Lines without a kB unit are not recorded.
        assert_eq!(info.get("HugePages_Total:"), None);
    }

    #[test]
    fn test_meminfo_mem_used() {
        let content = "\
MemTotal:       16000000 kB
MemFree:         1000000 kB
Buffers:          500000 kB
Cached:          2000000 kB
Slab:             300000 kB
";
        let info = parse_meminfo(content).unwrap();

        assert_eq!(
            info.mem_used(),
            (16000000 - 1000000 - 500000 - 2000000 - 300000) * 1024
        );
    }

    #[test]
    fn test_meminfo_mem_used_not_clamped() {
        let content = "\
MemTotal:        1000000 kB
MemFree:          800000 kB
Cached:           400000 kB
";
        let info = parse_meminfo(content).unwrap();

        assert_eq!(info.mem_used(), -200000 * 1024);
    }

    #[test]
    fn test_meminfo_invalid_value_aborts() {
        let content = "MemTotal:       16000000 kB\nMemFree:        lots kB\n";
        let err = parse_meminfo(content).unwrap_err();
        assert!(err.message.contains("MemFree:"));
    }

    #[test]
    fn test_meminfo_swap_in_use() {
        let info = parse_meminfo("SwapTotal: 4096000 kB\nSwapFree: 1024000 kB\n").unwrap();
        assert_eq!(
            info.swap(),
            Some(SwapUsage {
                used: 3072000 * 1024,
                free: 1024000 * 1024,
            })
        );
    }

    #[test]
    fn test_meminfo_swap_absent() {
        let info = parse_meminfo("MemTotal: 4096000 kB\n").unwrap();
        assert_eq!(info.swap(), None);

        let only_total = parse_meminfo("SwapTotal: 4096000 kB\n").unwrap();
        assert_eq!(only_total.swap(), None);
    }

    #[test]
    fn test_meminfo_swap_all_zero() {
        let info = parse_meminfo("SwapTotal: 0 kB\nSwapFree: 0 kB\n").unwrap();
        assert_eq!(info.swap(), None);
    }

    #[test]
    fn test_meminfo_swap_one_side_nonzero() {
        // Fully used swap: free is zero but total is not.
        let info = parse_meminfo("SwapTotal: 2048 kB\nSwapFree: 0 kB\n").unwrap();
        assert_eq!(
            info.swap(),
            Some(SwapUsage {
                used: 2048 * 1024,
                free: 0,
            })
        );
    }

    #[test]
    fn test_parse_diskstats() {
        let content = "\
   8       0 sda 1234 0 56789 100 5678 0 98765 200 0 150 300 0 0 0 0
   8       1 sda1 1000 0 50000 80 5000 0 90000 180 0 130 260 0 0 0 0
 259       0 nvme0n1 9999 0 123456 500 8888 0 654321 400 5 1000 2000 0 0 0 0 7 3
";
        let disks = parse_diskstats(content);

        assert_eq!(disks.len(), 3);

        assert_eq!(disks[0].major, 8);
        assert_eq!(disks[0].minor, 0);
        assert_eq!(disks[0].device_name, "sda");
        assert_eq!(disks[0].reads_completed, 1234);
        assert_eq!(disks[0].sectors_read, 56789);
        assert_eq!(disks[0].writes_completed, 5678);
        assert_eq!(disks[0].sectors_written, 98765);
        assert_eq!(disks[0].io_time, 150);
        assert_eq!(disks[0].weighted_io_time, 300);

        assert_eq!(disks[2].major, 259);
        assert_eq!(disks[2].minor, 0);
        assert_eq!(disks[2].device_name, "nvme0n1");
        assert_eq!(disks[2].reads_completed, 9999);
        assert_eq!(disks[2].io_in_progress, 5);
        assert_eq!(disks[2].flush_completed, 7);
        assert_eq!(disks[2].flush_time, 3);
    }

    #[test]
    fn test_parse_diskstats_13_fields_dropped() {
        let line = "8 0 sda 1234 0 56789 100 5678 0 98765 200 0 150";
        assert_eq!(parse_diskstats_line(line), None);
        assert!(parse_diskstats(line).is_empty());
    }

    #[test]
    fn test_parse_diskstats_14_fields() {
        let disk = parse_diskstats_line("8 16 sdb 1 2 3 4 5 6 7 8 9 10 11").unwrap();

        assert_eq!(disk.device_name, "sdb");
        assert_eq!(disk.minor, 16);
        assert_eq!(disk.reads_completed, 1);
        assert_eq!(disk.reads_merged, 2);
        assert_eq!(disk.sectors_read, 3);
        assert_eq!(disk.read_time, 4);
        assert_eq!(disk.writes_completed, 5);
        assert_eq!(disk.writes_merged, 6);
        assert_eq!(disk.sectors_written, 7);
        assert_eq!(disk.write_time, 8);
        assert_eq!(disk.io_in_progress, 9);
        assert_eq!(disk.io_time, 10);
        assert_eq!(disk.weighted_io_time, 11);
        assert_eq!(disk.discards_completed, 0);
        assert_eq!(disk.flush_time, 0);
    }

    #[test]
    fn test_parse_diskstats_loop_device_excluded() {
        let line = "7 0 loop0 100 0 200 10 0 0 0 0 0 20 10";

        // Parses fine on its own...
        let disk = parse_diskstats_line(line).unwrap();
        assert_eq!(disk.major, 7);
        assert_eq!(disk.device_name, "loop0");

        // ...but never reaches the output.
        assert!(parse_diskstats(line).is_empty());
    }

    #[test]
    fn test_parse_diskstats_pseudo_devices_excluded() {
        let content = "\
   1       0 ram0 0 0 0 0 0 0 0 0 0 0 0
   7       1 loop1 5 0 10 0 0 0 0 0 0 4 0
  11       0 sr0 3 0 24 1 0 0 0 0 0 2 1
   8       0 sda 1234 0 56789 100 5678 0 98765 200 0 150 300
";
        let disks = parse_diskstats(content);

        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].device_name, "sda");
    }

    #[test]
    fn test_is_pseudo_device() {
        for major in PSEUDO_DEVICE_MAJORS {
            assert!(is_pseudo_device(major));
        }
        assert!(!is_pseudo_device(8));
        assert!(!is_pseudo_device(253));
        assert!(!is_pseudo_device(259));
    }

    #[test]
    fn test_parse_diskstats_bad_discard_field_zeroed() {
        let line = "8 0 sda 1 2 3 4 5 6 7 8 9 10 11 12 13 bogus 15";
        let disk = parse_diskstats_line(line).unwrap();

        assert_eq!(disk.sectors_discarded, 0);
        assert_eq!(disk.discards_completed, 12);
        assert_eq!(disk.discards_merged, 13);
        assert_eq!(disk.discard_time, 15);
        assert_eq!(disk.weighted_io_time, 11);
        assert_eq!(parse_diskstats(line).len(), 1);
    }

    #[test]
    fn test_parse_diskstats_bad_flush_field_zeroed() {
        let line = "8 0 sda 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 x 17";
        let disk = parse_diskstats_line(line).unwrap();

        assert_eq!(disk.discard_time, 15);
        assert_eq!(disk.flush_completed, 0);
        assert_eq!(disk.flush_time, 17);
    }

    #[test]
    fn test_parse_diskstats_partial_flush_group_ignored() {
        // 19 fields: discard group present, flush group incomplete.
        let line = "8 0 sda 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16";
        let disk = parse_diskstats_line(line).unwrap();

        assert_eq!(disk.discard_time, 15);
        assert_eq!(disk.flush_completed, 0);
        assert_eq!(disk.flush_time, 0);
    }

    #[test]
    fn test_parse_diskstats_bad_mandatory_field_drops_line() {
        let content = "\
   8       0 sda 1234 0 56789 100 5678 0 98765 -1 0 150 300
   x       1 sda1 1000 0 50000 80 5000 0 90000 180 0 130 260
   8       2 sda2 1000 0 50000 80 5000 0 90000 180 0 130 260
";
        let disks = parse_diskstats(content);

        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].device_name, "sda2");
    }

    #[test]
    fn test_parse_diskstats_skips_blank_lines() {
        let content = "\n   8       0 sda 1 2 3 4 5 6 7 8 9 10 11\n\n";
        assert_eq!(parse_diskstats(content).len(), 1);
    }
}
