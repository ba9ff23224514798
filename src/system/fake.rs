//! In-memory host for tests.
//!
//! ```
//! use ae_preflight::system::{FakeHost, FileReader};
//! use std::path::Path;
//!
//! let host = FakeHost::new().with_file("/etc/resolv.conf", "search corp.example\n");
//! assert!(host.file_exists(Path::new("/etc/resolv.conf")));
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PreflightError, Result};
use crate::shell::{display_command, CommandOutput, CommandRunner};

use super::{FileReader, FilesystemProbe, FsStats, PortProbe, ProcessTable};

/// A host assembled from canned files, commands, mounts and processes.
///
/// Anything not registered behaves as missing: files fail to read,
/// commands fail to start, paths are not mount points and ports are closed.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    files: HashMap<PathBuf, String>,
    commands: HashMap<String, CommandOutput>,
    mounts: HashMap<PathBuf, FsStats>,
    processes: BTreeMap<u32, Option<String>>,
    open_ports: HashSet<SocketAddr>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register file contents.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Register a command line (program and args joined by spaces) that succeeds.
    pub fn with_command(mut self, command_line: &str, stdout: impl Into<String>) -> Self {
        self.commands
            .insert(command_line.to_string(), CommandOutput::success(stdout));
        self
    }

    /// Register a command line that exits with `code`.
    pub fn with_failing_command(mut self, command_line: &str, code: i32) -> Self {
        self.commands.insert(
            command_line.to_string(),
            CommandOutput::failure(Some(code), "command failed"),
        );
        self
    }

    /// Register a mount point with its capacity.
    pub fn with_mount(mut self, path: impl Into<PathBuf>, stats: FsStats) -> Self {
        self.mounts.insert(path.into(), stats);
        self
    }

    /// Register a running process.
    pub fn with_process(mut self, pid: u32, name: impl Into<String>) -> Self {
        self.processes.insert(pid, Some(name.into()));
        self
    }

    /// Register a pid that is listed but exits before its name is read.
    pub fn with_vanished_process(mut self, pid: u32) -> Self {
        self.processes.insert(pid, None);
        self
    }

    /// Register a listening TCP endpoint.
    pub fn with_open_port(mut self, addr: SocketAddr) -> Self {
        self.open_ports.insert(addr);
        self
    }

    /// Capacity helper: a filesystem with `total_gb` of which `free_gb` is free.
    pub fn gib(total_gb: u64, free_gb: u64) -> FsStats {
        const BLOCK: u64 = 4096;
        const BLOCKS_PER_GIB: u64 = 1024 * 1024 * 1024 / BLOCK;
        FsStats {
            block_size: BLOCK,
            total_blocks: total_gb * BLOCKS_PER_GIB,
            free_blocks: free_gb * BLOCKS_PER_GIB,
        }
    }
}

impl CommandRunner for FakeHost {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command_line = display_command(program, args);
        self.commands
            .get(&command_line)
            .cloned()
            .ok_or(PreflightError::CommandFailed {
                command: command_line,
                code: None,
            })
    }
}

impl FileReader for FakeHost {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
            .into()
        })
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

impl FilesystemProbe for FakeHost {
    fn is_mount(&self, path: &Path) -> bool {
        self.mounts.contains_key(path)
    }

    fn stats(&self, path: &Path) -> Result<FsStats> {
        path.ancestors()
            .find_map(|p| self.mounts.get(p).copied())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no filesystem for {}", path.display()),
                )
                .into()
            })
    }
}

impl ProcessTable for FakeHost {
    fn pids(&self) -> Vec<u32> {
        self.processes.keys().copied().collect()
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        self.processes.get(&pid).cloned().flatten()
    }
}

impl PortProbe for FakeHost {
    fn is_open(&self, addr: SocketAddr, _timeout: Duration) -> bool {
        self.open_ports.contains(&addr)
    }
}
