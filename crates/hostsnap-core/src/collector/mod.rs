//! Host metrics collector for Linux.
//!
//! This module provides infrastructure for collecting one-shot host metrics
//! from the Linux `/proc` filesystem and `statvfs(3)`, with support for
//! mocking for testing on macOS.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Collector                         │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                 SystemCollector                    │  │
//! │  │  - /proc/cpuinfo     - /proc/meminfo               │  │
//! │  │  - /proc/loadavg     - /proc/diskstats             │  │
//! │  │  - statvfs(tablespace location)                    │  │
//! │  └─────────────────────────┬──────────────────────────┘  │
//! │                            │                             │
//! │                     ┌──────▼──────┐                      │
//! │                     │  FileSystem │ (trait)              │
//! │                     └──────┬──────┘                      │
//! └────────────────────────────┼─────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              │               │               │
//!       ┌──────▼──────┐ ┌──────▼──────┐ ┌──────▼──────┐
//!       │   RealFs    │ │   MockFs    │ │  Scenarios  │
//!       │ (Linux)     │ │ (Testing)   │ │ (Fixtures)  │
//!       └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use hostsnap_core::collector::{Collector, RealFs};
//! use hostsnap_core::model::Tablespace;
//!
//! let mut tablespaces = vec![Tablespace::new("pg_default", "/var/lib/postgresql/16/main")];
//! let mut collector = Collector::new(RealFs::new(), "/proc");
//! let snapshot = collector.collect_snapshot(&mut tablespaces);
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use hostsnap_core::collector::{Collector, MockFs};
//!
//! let fs = MockFs::typical_system();
//! let mut collector = Collector::new(fs, "/proc");
//! let snapshot = collector.collect_snapshot(&mut []);
//! assert!(!snapshot.disk_stats.is_empty());
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use collector::{Collector, CollectorTiming};
pub use mock::MockFs;
pub use procfs::{CollectError, SystemCollector};
pub use traits::{FileSystem, FsStat, RealFs};
