use serde::{Deserialize, Serialize};

/// A named storage location and its filesystem capacity.
///
/// `name` and `location` come from the caller (normally a catalog lookup) and
/// are never changed by the collector. The four capacity counters are filled
/// by a collection pass and stay zero when `statvfs` fails.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct Tablespace {
    pub name: String,
    pub location: String,
    #[serde(flatten)]
    pub usage: TablespaceUsage,
}

impl Tablespace {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            usage: TablespaceUsage::default(),
        }
    }
}

/// Capacity of the filesystem backing a tablespace.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct TablespaceUsage {
    /// Bytes in use: block size * (total blocks - free blocks).
    pub disk_used: u64,
    /// Filesystem size in bytes.
    pub disk_total: u64,
    pub inodes_used: u64,
    pub inodes_total: u64,
}
