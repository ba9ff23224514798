//! Mount resolution and free space.
//!
//! Each install path resolves to the mount point that actually holds it.
//! `/` is always checked and must provide the full root amount on its own.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::config::MountSettings;
use crate::error::{PreflightError, Result};
use crate::facts::{bytes_to_gib, MountFact, MountsFact};
use crate::shell::CommandRunner;
use crate::system::{FileReader, FilesystemProbe, Host};

use super::Gatherer;

const MOUNT_TABLE: &str = "/proc/self/mounts";

static XFS_FTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ftype=(\d)").expect("XFS_FTYPE must compile"));

/// One line of the kernel mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: PathBuf,
    pub fs_type: String,
    pub options: String,
}

/// Parse `/proc/self/mounts`.
///
/// Octal escapes (`\040` for a space) in mount points are decoded.
pub fn parse_mount_table(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount_point = fields.next()?;
            let fs_type = fields.next()?;
            let options = fields.next()?;
            Some(MountEntry {
                device: device.to_string(),
                mount_point: PathBuf::from(unescape_octal(mount_point)),
                fs_type: fs_type.to_string(),
                options: options.to_string(),
            })
        })
        .collect()
}

fn unescape_octal(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            if let Some(value) = field
                .get(i + 1..i + 4)
                .and_then(|digits| u8::from_str_radix(digits, 8).ok())
            {
                out.push(value);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// The mount point holding `candidate`: itself, or its nearest ancestor
/// mount below `/`.
pub fn resolve_mount(candidate: &Path, is_mount: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    candidate
        .ancestors()
        .filter(|p| p.parent().is_some())
        .find(|p| is_mount(p))
        .map(Path::to_path_buf)
}

/// Resolve every candidate and dedupe, with `/` first.
pub fn resolve_mounts(candidates: &[PathBuf], is_mount: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut resolved = vec![PathBuf::from("/")];
    for candidate in candidates {
        match resolve_mount(candidate, &is_mount) {
            Some(mount) if !resolved.contains(&mount) => {
                tracing::debug!("{} resolves to mount {}", candidate.display(), mount.display());
                resolved.push(mount);
            }
            Some(_) => {}
            None => tracing::debug!("{} lives on /", candidate.display()),
        }
    }
    resolved
}

/// Recommended free space for a non-root mount: the first rule whose prefix
/// the path starts with, else the full root amount.
pub fn recommended_for(path: &Path, settings: &MountSettings) -> f64 {
    let path = path.to_string_lossy();
    settings
        .rules
        .iter()
        .find(|rule| path.starts_with(rule.prefix.as_str()))
        .map(|rule| rule.recommended_gb)
        .unwrap_or(settings.root_recommended_gb)
}

/// Recommended free space for each resolved mount, in the same order.
pub fn recommendations(mounts: &[PathBuf], settings: &MountSettings) -> Vec<f64> {
    mounts
        .iter()
        .map(|m| {
            if m == Path::new("/") {
                settings.root_recommended_gb
            } else {
                recommended_for(m, settings)
            }
        })
        .collect()
}

/// Extract the `ftype` value from `xfs_info` output.
pub fn parse_xfs_ftype(output: &str) -> Option<u8> {
    XFS_FTYPE
        .captures(output)
        .and_then(|caps| caps[1].parse().ok())
}

/// Resolves install paths to mounts and measures their free space.
pub struct MountGatherer<'a> {
    settings: &'a MountSettings,
}

impl<'a> MountGatherer<'a> {
    pub fn new(settings: &'a MountSettings) -> Self {
        Self { settings }
    }
}

impl Gatherer for MountGatherer<'_> {
    type Fact = MountsFact;

    fn name(&self) -> &'static str {
        "mounts"
    }

    fn gather(&self, host: &dyn Host) -> Result<MountsFact> {
        let resolved = resolve_mounts(&self.settings.candidates, |p| host.is_mount(p));
        let recommended = recommendations(&resolved, self.settings);

        let table = match host.read_to_string(Path::new(MOUNT_TABLE)) {
            Ok(content) => parse_mount_table(&content),
            Err(e) => {
                tracing::warn!("Unable to read {}: {}", MOUNT_TABLE, e);
                Vec::new()
            }
        };

        let mut mounts = Vec::with_capacity(resolved.len());
        for (path, recommended_gb) in resolved.into_iter().zip(recommended) {
            let stats = match host.stats(&path) {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::warn!("Skipping mount {}: {}", path.display(), e);
                    continue;
                }
            };
            // Later entries shadow earlier ones mounted on the same point.
            let entry = table.iter().rev().find(|e| e.mount_point == path);
            let xfs_ftype = match entry {
                Some(e) if e.fs_type == "xfs" => xfs_ftype(host, &path),
                _ => None,
            };

            mounts.push(MountFact {
                free_gb: bytes_to_gib(stats.free_bytes()),
                total_gb: bytes_to_gib(stats.total_bytes()),
                recommended_gb,
                filesystem: entry.map(|e| e.fs_type.clone()),
                options: entry.map(|e| e.options.clone()),
                xfs_ftype,
                path,
            });
        }

        if mounts.is_empty() {
            return Err(PreflightError::unparseable(
                "statvfs",
                "no mount could be measured",
            ));
        }
        Ok(MountsFact { mounts })
    }
}

fn xfs_ftype(host: &dyn Host, path: &Path) -> Option<u8> {
    let path = path.to_string_lossy();
    match host.stdout("xfs_info", &[path.as_ref()]) {
        Ok(output) => parse_xfs_ftype(&output),
        Err(e) => {
            tracing::debug!("xfs_info unavailable for {}: {}", path, e);
            None
        }
    }
}
