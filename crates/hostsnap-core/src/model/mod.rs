//! Data models produced by a collection pass.
//!
//! - [`system`]: host-wide metrics from the `/proc/` filesystem
//! - [`tablespace`]: per-location filesystem capacity
//!
//! Every structure here is built fresh for one pass and not mutated
//! afterwards. All of them derive `Serialize`/`Deserialize` so report
//! assemblers can emit them in whatever format they use.

mod system;
mod tablespace;

pub use system::*;
pub use tablespace::*;
