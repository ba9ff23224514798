//! Access to the host being inspected.
//!
//! Gatherers never touch the system directly. They go through the traits
//! in this module, which [`LocalHost`] implements for the real machine and
//! [`FakeHost`] implements from canned data for tests.
//!
//! # Modules
//!
//! - [`local`] - Real implementations backed by std, libc and sysinfo
//! - [`fake`] - In-memory host for tests

pub mod fake;
pub mod local;

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::shell::CommandRunner;

pub use fake::FakeHost;
pub use local::LocalHost;

/// Filesystem capacity as reported by `statvfs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FsStats {
    /// Fundamental block size in bytes.
    pub block_size: u64,
    /// Total blocks.
    pub total_blocks: u64,
    /// Free blocks (including those reserved for root).
    pub free_blocks: u64,
}

impl FsStats {
    /// Free bytes.
    pub fn free_bytes(&self) -> u64 {
        self.free_blocks.saturating_mul(self.block_size)
    }

    /// Total bytes.
    pub fn total_bytes(&self) -> u64 {
        self.total_blocks.saturating_mul(self.block_size)
    }
}

/// Reads configuration and pseudo files.
pub trait FileReader: Send + Sync {
    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Whether a regular file exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;
}

/// Mount point and capacity queries.
pub trait FilesystemProbe: Send + Sync {
    /// Whether `path` is a mount point.
    fn is_mount(&self, path: &Path) -> bool;

    /// Capacity of the filesystem containing `path`.
    fn stats(&self, path: &Path) -> Result<FsStats>;
}

/// Running process lookup.
pub trait ProcessTable: Send + Sync {
    /// Every process id visible at the time of the call.
    fn pids(&self) -> Vec<u32>;

    /// Name of a process, or `None` if it exited since `pids` was taken.
    fn process_name(&self, pid: u32) -> Option<String>;
}

/// TCP reachability probe.
pub trait PortProbe: Send + Sync {
    /// Whether a TCP connect to `addr` succeeds within `timeout`.
    fn is_open(&self, addr: SocketAddr, timeout: Duration) -> bool;
}

/// Everything a gatherer may ask of the host.
pub trait Host: CommandRunner + FileReader + FilesystemProbe + ProcessTable + PortProbe {}

impl<T> Host for T where T: CommandRunner + FileReader + FilesystemProbe + ProcessTable + PortProbe {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_stats_byte_counts() {
        let stats = FsStats {
            block_size: 4096,
            total_blocks: 100,
            free_blocks: 25,
        };
        assert_eq!(stats.free_bytes(), 102_400);
        assert_eq!(stats.total_bytes(), 409_600);
    }

    #[test]
    fn fs_stats_saturate_instead_of_overflowing() {
        let stats = FsStats {
            block_size: u64::MAX,
            total_blocks: 2,
            free_blocks: 2,
        };
        assert_eq!(stats.free_bytes(), u64::MAX);
    }
}
