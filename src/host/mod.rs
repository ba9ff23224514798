//! Host identity detection.
//!
//! The [`HostProfile`] is built once at startup and drives every
//! family-conditional decision afterwards.

pub mod os_release;

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::system::FileReader;

pub use os_release::OsRelease;

const OS_RELEASE: &str = "/etc/os-release";
const REDHAT_RELEASE: &str = "/etc/redhat-release";
const DEBIAN_VERSION: &str = "/etc/debian_version";
const SUSE_RELEASE: &str = "/etc/SuSE-release";

static RELEASE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"release\s+(\d+(?:\.\d+)*)").expect("RELEASE_NUMBER must compile")
});

static SUSE_SERVICE_PACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)-SP(\d+)").expect("SUSE_SERVICE_PACK must compile")
});

/// OS lineage of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Rhel,
    Debian,
    Suse,
    Unknown,
}

impl Family {
    /// Key used in the OS support table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Rhel => "rhel",
            Family::Debian => "debian",
            Family::Suse => "suse",
            Family::Unknown => "unknown",
        }
    }

    /// Family for an os-release `ID` or `ID_LIKE` entry.
    pub fn from_id(id: &str) -> Family {
        match id {
            "rhel" | "centos" | "fedora" | "ol" | "rocky" | "almalinux" => Family::Rhel,
            "debian" | "ubuntu" => Family::Debian,
            id if id == "sles" || id.contains("suse") => Family::Suse,
            _ => Family::Unknown,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the inspected host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostProfile {
    /// Distribution id, e.g. `centos`.
    pub distribution: String,
    /// Normalized version, e.g. `7.5` or `12 SP3`.
    pub version: String,
    /// Human readable distribution name.
    pub dist_name: String,
    /// Hardware architecture.
    pub machine: String,
    pub family: Family,
}

impl HostProfile {
    /// Build a profile directly, mostly for tests.
    pub fn new(distribution: &str, version: &str, family: Family) -> Self {
        Self {
            distribution: distribution.to_string(),
            version: version.to_string(),
            dist_name: distribution.to_string(),
            machine: std::env::consts::ARCH.to_string(),
            family,
        }
    }
}

/// Detect the running host from os-release and family marker files.
///
/// Missing or unreadable sources yield an `unknown` profile rather than an
/// error, which the compatibility check then reports as unsupported.
pub fn detect_host(files: &dyn FileReader) -> HostProfile {
    let release = match files.read_to_string(Path::new(OS_RELEASE)) {
        Ok(content) => OsRelease::parse(&content),
        Err(e) => {
            tracing::warn!("Unable to read {}: {}", OS_RELEASE, e);
            OsRelease::default()
        }
    };

    let family = detect_family(files, &release);
    let version = detect_version(files, &release, family);
    let distribution = release.id().unwrap_or_else(|| family.as_str().to_string());
    let dist_name = release
        .get("NAME")
        .map(str::to_string)
        .unwrap_or_else(|| distribution.clone());

    let profile = HostProfile {
        distribution,
        version,
        dist_name,
        machine: std::env::consts::ARCH.to_string(),
        family,
    };
    tracing::debug!(
        "Detected host {} {} ({} family)",
        profile.distribution,
        profile.version,
        profile.family
    );
    profile
}

fn detect_family(files: &dyn FileReader, release: &OsRelease) -> Family {
    let markers = [
        (REDHAT_RELEASE, Family::Rhel),
        (DEBIAN_VERSION, Family::Debian),
        (SUSE_RELEASE, Family::Suse),
    ];
    if let Some((_, family)) = markers
        .iter()
        .find(|(marker, _)| files.file_exists(Path::new(marker)))
    {
        return *family;
    }

    release
        .lineage()
        .iter()
        .map(|id| Family::from_id(id))
        .find(|family| *family != Family::Unknown)
        .unwrap_or(Family::Unknown)
}

fn detect_version(files: &dyn FileReader, release: &OsRelease, family: Family) -> String {
    match family {
        Family::Rhel => files
            .read_to_string(Path::new(REDHAT_RELEASE))
            .ok()
            .and_then(|text| {
                RELEASE_NUMBER
                    .captures(&text)
                    .map(|caps| major_minor(&caps[1]))
            })
            .or_else(|| release.get("VERSION_ID").map(major_minor))
            .unwrap_or_default(),
        Family::Suse => suse_version(release).unwrap_or_default(),
        Family::Debian | Family::Unknown => release
            .get("VERSION_ID")
            .map(major_minor)
            .unwrap_or_default(),
    }
}

/// SUSE versions are compared as `12 SP3`.
fn suse_version(release: &OsRelease) -> Option<String> {
    if let Some(caps) = release
        .get("VERSION")
        .and_then(|v| SUSE_SERVICE_PACK.captures(v))
    {
        return Some(format!("{} SP{}", &caps[1], &caps[2]));
    }

    let version_id = release.get("VERSION_ID")?;
    match version_id.split_once('.') {
        Some((major, sp)) if sp != "0" => Some(format!("{} SP{}", major, sp)),
        Some((major, _)) => Some(major.to_string()),
        None => Some(version_id.to_string()),
    }
}

/// First two dotted components of a version string.
fn major_minor(version: &str) -> String {
    version.split('.').take(2).collect::<Vec<_>>().join(".")
}
