//! Main collector that runs every reader once and assembles a snapshot.
//!
//! The `Collector` struct provides a unified interface for collecting
//! all host metrics into a `SystemSnapshot`.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::collector::procfs::SystemCollector;
use crate::collector::traits::FileSystem;
use crate::model::{SystemSnapshot, Tablespace, TablespaceUsage};

/// Timing information for each collector phase.
///
/// Used for debugging and performance monitoring. Kept outside the
/// snapshot so repeated passes over the same host compare equal.
#[derive(Debug, Clone, Default)]
pub struct CollectorTiming {
    /// Total snapshot collection time.
    pub total: Duration,
    /// Time to query filesystem capacity of all tablespaces.
    pub tablespaces: Duration,
    /// Time to collect CPU identity.
    pub cpuinfo: Duration,
    /// Time to collect load average.
    pub loadavg: Duration,
    /// Time to collect memory info.
    pub meminfo: Duration,
    /// Time to query the host name.
    pub hostname: Duration,
    /// Time to collect disk statistics.
    pub diskstats: Duration,
}

/// Main collector that gathers all host metrics.
///
/// Every reader is best-effort: a missing, unreadable or malformed source
/// leaves its fields at their zero value and the pass carries on.
pub struct Collector<F: FileSystem> {
    system_collector: SystemCollector<F>,
    /// Timing information from the last collect_snapshot call.
    last_timing: Option<CollectorTiming>,
}

impl<F: FileSystem> Collector<F> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            system_collector: SystemCollector::new(fs, proc_path),
            last_timing: None,
        }
    }

    /// Returns timing information from the last collect_snapshot call.
    pub fn last_timing(&self) -> Option<&CollectorTiming> {
        self.last_timing.as_ref()
    }

    /// Collects a complete host snapshot.
    ///
    /// This gathers:
    /// - Filesystem capacity for every tablespace (written into `tablespaces`)
    /// - CPU model and logical core count
    /// - Load average
    /// - Memory and swap usage
    /// - Host name
    /// - Disk I/O statistics for physical block devices
    ///
    /// Also records timing information accessible via `last_timing()`.
    pub fn collect_snapshot(&mut self, tablespaces: &mut [Tablespace]) -> SystemSnapshot {
        let total_start = Instant::now();
        let mut timing = CollectorTiming::default();
        let mut snapshot = SystemSnapshot::default();

        // Disk space for each tablespace
        let start = Instant::now();
        for tablespace in tablespaces.iter_mut() {
            tablespace.usage = match self
                .system_collector
                .collect_tablespace_usage(&tablespace.location)
            {
                Ok(usage) => usage,
                Err(e) => {
                    debug!(
                        tablespace = %tablespace.name,
                        location = %tablespace.location,
                        "filesystem capacity unavailable: {}",
                        e
                    );
                    TablespaceUsage::default()
                }
            };
        }
        timing.tablespaces = start.elapsed();

        // CPU model, core count
        let start = Instant::now();
        match self.system_collector.collect_cpuinfo() {
            Ok(cpu) => {
                snapshot.cpu_model = cpu.model;
                snapshot.num_cores = cpu.num_cores;
            }
            Err(e) => debug!("cpuinfo unavailable: {}", e),
        }
        timing.cpuinfo = start.elapsed();

        // Load average
        let start = Instant::now();
        match self.system_collector.collect_loadavg() {
            Ok(load) => snapshot.load_avg = load,
            Err(e) => debug!("loadavg unavailable: {}", e),
        }
        timing.loadavg = start.elapsed();

        // Memory: used, free, buffers, cached, slab; swap used/free
        let start = Instant::now();
        match self.system_collector.collect_meminfo() {
            Ok(mem) => {
                snapshot.mem_free = mem.mem_free();
                snapshot.mem_buffers = mem.buffers();
                snapshot.mem_cached = mem.cached();
                snapshot.mem_slab = mem.slab();
                snapshot.mem_used = mem.mem_used();
                if let Some(swap) = mem.swap() {
                    snapshot.swap_used = swap.used;
                    snapshot.swap_free = swap.free;
                }
            }
            Err(e) => debug!("meminfo unavailable: {}", e),
        }
        timing.meminfo = start.elapsed();

        let start = Instant::now();
        match self.system_collector.fs().hostname() {
            Ok(hostname) => snapshot.hostname = hostname,
            Err(e) => debug!("hostname unavailable: {}", e),
        }
        timing.hostname = start.elapsed();

        // Disk I/O statistics
        let start = Instant::now();
        match self.system_collector.collect_diskstats() {
            Ok(disks) => snapshot.disk_stats = disks,
            Err(e) => debug!("diskstats unavailable: {}", e),
        }
        timing.diskstats = start.elapsed();

        timing.total = total_start.elapsed();
        self.last_timing = Some(timing);

        snapshot
    }
}
