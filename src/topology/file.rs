//! Topology interchange files.
//!
//! The builder saves a flat JSON document that downstream tooling consumes:
//! the range header, the team id list, and the unresolved network templates
//! (network schemes plus host IP suffixes). This module defines that
//! document, loads it, and flattens it into the resolved host list used by
//! the detfile generator and the inventory accessor.

use color_eyre::Result;
use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use super::types::{Service, TopologyDraft, DHCP, PLACEHOLDER};

/// One host entry in the interchange document. The `ip` field holds only
/// the suffix that gets appended to the network's scheme, or the literal
/// `"dhcp"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub services: IndexMap<String, Service>,
}

/// One network entry: its IP scheme (kept under the `ip` key) and its hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub ip: String,
    pub hosts: Vec<HostRecord>,
}

/// The saved topology document.
///
/// `name` and `date` are tolerated as absent so older hand-edited files
/// still load; `teams` and `networks` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    pub teams: Vec<u32>,
    pub networks: Vec<NetworkRecord>,
}

/// A host after its network scheme and IP suffix have been joined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedHost {
    /// Joined IP, possibly still carrying the team placeholder, or `"dhcp"`
    pub ip: String,
    pub name: Option<String>,
    pub os: Option<String>,
}

impl ResolvedHost {
    /// Whether this host leases its address at runtime.
    pub fn is_dhcp(&self) -> bool {
        self.ip.eq_ignore_ascii_case(DHCP)
    }

    /// Substitute the team placeholder in this host's IP. Both cases of the
    /// token are accepted so hand-edited files behave the same as saved ones.
    pub fn ip_for_team(&self, team_id: u32) -> String {
        let id = team_id.to_string();
        self.ip
            .replace(PLACEHOLDER, &id)
            .replace(PLACEHOLDER.to_ascii_lowercase(), &id)
    }
}

impl TopologyFile {
    /// Flatten every network into a single host list, in document order.
    ///
    /// The resolved IP is `"{network.ip}.{host.ip}"` unless the host entry
    /// is `"dhcp"` (any case), which stays the literal `"dhcp"` because no
    /// prefix applies to a leased address.
    pub fn resolved_hosts(&self) -> Vec<ResolvedHost> {
        let mut hosts = Vec::new();
        for network in &self.networks {
            for host in &network.hosts {
                let ip = if host.ip.eq_ignore_ascii_case(DHCP) {
                    DHCP.to_string()
                } else {
                    format!("{}.{}", network.ip, host.ip)
                };
                hosts.push(ResolvedHost {
                    ip,
                    name: host.name.clone(),
                    os: host.os.clone(),
                });
            }
        }
        hosts
    }

    /// Build the interchange document from a drafted session.
    ///
    /// Each saved host keeps only the suffix the operator typed, recovered
    /// by stripping the network scheme the builder prepended; `"dhcp"`
    /// entries are saved verbatim.
    pub fn from_draft(draft: &TopologyDraft) -> Self {
        let networks = draft
            .networks
            .values()
            .map(|network| NetworkRecord {
                ip: network.scheme.clone(),
                hosts: network
                    .hosts
                    .values()
                    .map(|host| HostRecord {
                        name: Some(host.name.clone()),
                        ip: host_suffix(&network.scheme, &host.ip).to_string(),
                        os: Some(host.os.clone()),
                        platform: Some(host.platform.clone()),
                        services: host.services.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            name: draft.name.clone(),
            date: draft.date.clone(),
            teams: draft.team_ids.clone(),
            networks,
        }
    }
}

/// Undo the scheme prefix the builder adds to host IPs. IPs that never got
/// the prefix (the dhcp literal) come back unchanged.
fn host_suffix<'a>(scheme: &str, ip: &'a str) -> &'a str {
    match ip.strip_prefix(scheme) {
        Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
        None => ip,
    }
}

/// Load a topology document from a JSON file.
pub fn load_topology(path: &Path) -> Result<TopologyFile> {
    info!("Loading topology from: {:?}", path);

    let file = File::open(path)?;
    let topology: TopologyFile = serde_json::from_reader(file)?;

    Ok(topology)
}
