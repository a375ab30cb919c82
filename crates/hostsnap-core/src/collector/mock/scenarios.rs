//! Pre-built mock host scenarios for testing.
//!
//! These scenarios provide realistic `/proc` filesystem states
//! for testing various system conditions.

use super::filesystem::MockFs;
use crate::collector::traits::FsStat;

/// Data directory mounted in every scenario that carries tablespaces.
pub const PGDATA_PATH: &str = "/var/lib/postgresql/16/main";
/// Second tablespace location of [`MockFs::typical_system`].
pub const FAST_SSD_PATH: &str = "/mnt/fast_ssd";

fn cpuinfo(model: &str, cores: u32) -> String {
    let mut content = String::new();
    for cpu in 0..cores {
        content.push_str(&format!(
            "processor\t: {cpu}\n\
             vendor_id\t: GenuineIntel\n\
             cpu family\t: 6\n\
             model\t\t: 85\n\
             model name\t: {model}\n\
             cpu MHz\t\t: 2500.000\n\
             cache size\t: 28160 KB\n\n"
        ));
    }
    content
}

impl MockFs {
    /// Creates a typical modern host: 4 cores, swap in use, kernel 5.5+
    /// diskstats with discard and flush columns, two tablespaces.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.set_hostname("db-primary");
        fs.add_file(
            "/proc/cpuinfo",
            cpuinfo("Intel(R) Xeon(R) Gold 6248 CPU @ 2.50GHz", 4),
        );
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        3072000 kB
Dirty:              1024 kB
Writeback:             0 kB
Slab:             512000 kB
SReclaimable:     256000 kB
HugePages_Total:       0
HugePages_Free:        0
Hugepagesize:       2048 kB
",
        );
        fs.add_file(
            "/proc/diskstats",
            "\
   7       0 loop0 52 0 2134 11 0 0 0 0 0 28 11 0 0 0 0 0 0
   8       0 sda 12345 100 987654 5000 6789 50 456789 3000 0 4000 8000 120 0 40960 30 600 90
   8       1 sda1 10000 80 800000 4000 5000 40 400000 2500 0 3500 6500 100 0 32768 25 0 0
   1       0 ram0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0
 259       0 nvme0n1 50000 200 2000000 10000 30000 150 1500000 8000 5 15000 18000 0 0 0 0 1200 300
",
        );

        fs.add_statvfs(
            PGDATA_PATH,
            FsStat {
                block_size: 4096,
                blocks: 26214400,
                blocks_free: 13107200,
                files: 6553600,
                files_free: 6500000,
            },
        );
        fs.add_statvfs(
            FAST_SSD_PATH,
            FsStat {
                block_size: 4096,
                blocks: 52428800,
                blocks_free: 52000000,
                files: 13107200,
                files_free: 13107000,
            },
        );

        fs
    }

    /// Creates a host running an old kernel: 14-column diskstats and no
    /// swap keys at all in `/proc/meminfo`.
    pub fn legacy_kernel() -> Self {
        let mut fs = Self::new();

        fs.set_hostname("legacy-db");
        fs.add_file("/proc/cpuinfo", cpuinfo("Intel(R) Xeon(R) CPU E5-2670 0 @ 2.60GHz", 2));
        fs.add_file("/proc/loadavg", "1.20 0.80 0.40 2/310 27001\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:        8192000 kB
MemFree:         1024000 kB
Buffers:          256000 kB
Cached:          4096000 kB
Slab:             128000 kB
",
        );
        fs.add_file(
            "/proc/diskstats",
            "\
   8       0 sda 4000 10 320000 700 2000 30 160000 400 0 900 1100
   7       0 loop0 10 0 80 1 0 0 0 0 0 1 1
   8      16 sdb 3000 5 240000 500 1000 20 80000 300 1 600 900
",
        );
        fs.add_statvfs(
            PGDATA_PATH,
            FsStat {
                block_size: 1024,
                blocks: 1000000,
                blocks_free: 400000,
                files: 250000,
                files_free: 200000,
            },
        );

        fs
    }

    /// Creates a host with swap keys present but no swap configured.
    pub fn no_swap() -> Self {
        let mut fs = Self::typical_system();

        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:        4096000 kB
MemFree:         1024000 kB
Buffers:          128000 kB
Cached:          1024000 kB
SwapTotal:             0 kB
SwapFree:              0 kB
Slab:              64000 kB
",
        );

        fs
    }

    /// Creates a host where most sources are broken: no cpuinfo, a truncated
    /// loadavg, a non-numeric meminfo value, damaged diskstats lines and
    /// no readable hostname or tablespace filesystem.
    pub fn corrupted_sources() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         garbage kB
Buffers:          512000 kB
",
        );
        fs.add_file(
            "/proc/diskstats",
            "\
   8       0 sda 12345 100 987654 5000 6789 50 456789 3000 0 4000
   8       1 sda1 10000 80 800000 4000 5000 40 400000 2500 0 3500 6500 x y z w
   8       2 sda2 ten 80 800000 4000 5000 40 400000 2500 0 3500 6500
",
        );

        fs
    }
}
