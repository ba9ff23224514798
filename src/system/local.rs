//! The real host.

use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::error::Result;
use crate::shell::{CommandOutput, CommandRunner, SystemCommandRunner};

use super::{FileReader, FilesystemProbe, FsStats, PortProbe, ProcessTable};

/// The machine the binary is running on.
pub struct LocalHost {
    commands: SystemCommandRunner,
    processes: OnceLock<System>,
}

impl LocalHost {
    /// Create a host whose commands are killed after `command_timeout`.
    pub fn new(command_timeout: Duration) -> Self {
        Self {
            commands: SystemCommandRunner::new(command_timeout),
            processes: OnceLock::new(),
        }
    }

    /// Process snapshot, taken on first use.
    fn system(&self) -> &System {
        self.processes.get_or_init(|| {
            let mut system = System::new();
            system.refresh_processes(ProcessesToUpdate::All, true);
            system
        })
    }
}

impl CommandRunner for LocalHost {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.commands.run(program, args)
    }
}

impl FileReader for LocalHost {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl FilesystemProbe for LocalHost {
    fn is_mount(&self, path: &Path) -> bool {
        is_mount_point(path)
    }

    fn stats(&self, path: &Path) -> Result<FsStats> {
        statvfs(path)
    }
}

impl ProcessTable for LocalHost {
    fn pids(&self) -> Vec<u32> {
        let mut pids: Vec<u32> = self
            .system()
            .processes()
            .keys()
            .map(|pid| pid.as_u32())
            .collect();
        pids.sort_unstable();
        pids
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        self.system()
            .process(Pid::from_u32(pid))
            .map(|process| process.name().to_string_lossy().into_owned())
    }
}

impl PortProbe for LocalHost {
    fn is_open(&self, addr: SocketAddr, timeout: Duration) -> bool {
        TcpStream::connect_timeout(&addr, timeout).is_ok()
    }
}

/// Whether `path` is a mount point.
///
/// A path is a mount point when it lives on a different device than its
/// parent, or when it is its own parent (`/`). Symlinks never are.
#[cfg(unix)]
pub fn is_mount_point(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return false;
    };
    if meta.file_type().is_symlink() {
        return false;
    }
    let Ok(parent) = std::fs::metadata(path.join("..")) else {
        return false;
    };

    meta.dev() != parent.dev() || meta.ino() == parent.ino()
}

#[cfg(not(unix))]
pub fn is_mount_point(_path: &Path) -> bool {
    false
}

/// Query filesystem capacity for `path`.
///
/// `sysinfo::Disks` only exposes available space, and free space here is
/// `f_bfree`, so this calls `statvfs` directly.
#[cfg(unix)]
pub fn statvfs(path: &Path) -> Result<FsStats> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // SAFETY: statvfs is a plain value struct, so all-zero is a valid value
    // for the kernel to overwrite.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is a valid NUL-terminated string and stat points to
    // writable memory of the right type for the duration of the call.
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    #[allow(clippy::unnecessary_cast)]
    Ok(FsStats {
        block_size: stat.f_frsize as u64,
        total_blocks: stat.f_blocks as u64,
        free_blocks: stat.f_bfree as u64,
    })
}

#[cfg(not(unix))]
pub fn statvfs(path: &Path) -> Result<FsStats> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        format!("statvfs is not available for {}", path.display()),
    )
    .into())
}
