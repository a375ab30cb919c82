//! Collectors for Linux `/proc` filesystem.
//!
//! This module provides parsers and collectors for reading host-wide
//! information from the `/proc` virtual filesystem.

pub mod parser;
pub mod system;

pub use parser::{CpuInfo, MemInfo, ParseError, SwapUsage};
pub use system::{CollectError, SystemCollector};
