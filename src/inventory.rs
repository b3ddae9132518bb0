//! Topology accessor: host queries over a saved topology document.
//!
//! Loads the interchange file once, flattens it, and answers questions like
//! "every Linux address on the range" by classifying each host's OS tag
//! into a coarse family.

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::topology::{load_topology, ResolvedHost, TopologyFile};

/// Coarse OS family derived from a host's free-text OS tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Linux,
    Windows,
    Other,
}

impl OsFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::Windows => "windows",
            OsFamily::Other => "other",
        }
    }
}

const LINUX_ALIASES: [&str; 5] = ["centos", "linux", "ubuntu", "rhel", "kali"];
const WINDOWS_ALIASES: [&str; 9] = [
    "windows",
    "win",
    "server2012",
    "server2016",
    "server2008",
    "win8",
    "win2012",
    "win10",
    "win7",
];

/// Classify an OS tag by case-insensitive membership in the known alias
/// sets. Total: anything unrecognized is [`OsFamily::Other`], never an
/// error.
///
/// # Examples
///
/// ```
/// use topogen::inventory::{classify_os, OsFamily};
///
/// assert_eq!(classify_os("Ubuntu"), OsFamily::Linux);
/// assert_eq!(classify_os("Server2016"), OsFamily::Windows);
/// assert_eq!(classify_os("Solaris"), OsFamily::Other);
/// ```
pub fn classify_os(os: &str) -> OsFamily {
    let tag = os.to_lowercase();
    if LINUX_ALIASES.contains(&tag.as_str()) {
        OsFamily::Linux
    } else if WINDOWS_ALIASES.contains(&tag.as_str()) {
        OsFamily::Windows
    } else {
        OsFamily::Other
    }
}

/// A loaded topology with its flattened host list cached.
pub struct Inventory {
    path: PathBuf,
    document: TopologyFile,
    hosts: Vec<ResolvedHost>,
}

impl Inventory {
    /// Load a topology document and flatten its hosts.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let document = load_topology(&path)?;
        let hosts = document.resolved_hosts();
        Ok(Self {
            path,
            document,
            hosts,
        })
    }

    /// Re-read the backing file, replacing the cached document and hosts.
    pub fn reload(&mut self) -> Result<()> {
        self.document = load_topology(&self.path)?;
        self.hosts = self.document.resolved_hosts();
        Ok(())
    }

    /// The loaded document.
    pub fn document(&self) -> &TopologyFile {
        &self.document
    }

    /// Flattened hosts in document order.
    pub fn hosts(&self) -> &[ResolvedHost] {
        &self.hosts
    }

    /// Team ids as saved.
    pub fn teams(&self) -> &[u32] {
        &self.document.teams
    }

    /// Per-team addresses of every Linux-classified host.
    ///
    /// Entries are grouped by host in document order, with one address per
    /// team id inside each group, so the result always holds
    /// `linux hosts x teams` entries.
    pub fn linux_hosts(&self) -> Vec<String> {
        self.hosts_for(OsFamily::Linux)
    }

    /// Per-team addresses of every Windows-classified host, in the same
    /// order as [`linux_hosts`](Self::linux_hosts).
    pub fn windows_hosts(&self) -> Vec<String> {
        self.hosts_for(OsFamily::Windows)
    }

    fn hosts_for(&self, family: OsFamily) -> Vec<String> {
        let mut expanded = Vec::new();
        for host in &self.hosts {
            let os = host.os.as_deref().unwrap_or_default();
            if classify_os(os) != family {
                continue;
            }
            for &team in self.teams() {
                expanded.push(host.ip_for_team(team));
            }
        }
        expanded
    }
}
