//! hostsnap-core: one-shot host resource metrics for diagnostic reports.
//!
//! Provides:
//! - `collector` — readers for `/proc` and `statvfs(3)`, the `Collector`
//!   orchestrator, and a mock host for tests
//! - `model` — the snapshot and tablespace structures a pass produces
//! - `fmt` — shared formatting helpers (bytes, percentages)
//!
//! Every reader is best-effort: a missing or malformed source leaves its
//! fields at zero and never aborts the pass.

pub mod collector;
pub mod fmt;
pub mod model;
