//! Core topology type definitions.
//!
//! This module contains the nested data model shared by the builder, the
//! detfile generator, and the inventory accessor: services, hosts, networks,
//! and the per-team resolved topology.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The character inside an IP scheme that is replaced with a team id
/// during resolution.
pub const PLACEHOLDER: char = 'X';

/// Literal IP value for hosts that lease their address at runtime.
/// Compared case-insensitively wherever it appears.
pub const DHCP: &str = "dhcp";

/// A service listening on a host.
///
/// Services are keyed by their lowercase name in [`Host::services`], so the
/// value carries only the port and whether the scoring engine checks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Listening port
    pub port: u16,
    /// Whether the service is scored during the exercise
    pub scored: bool,
}

/// A single machine on a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Short hostname (map key in [`Network::hosts`])
    pub name: String,
    /// Full IP built from the network scheme, still carrying the placeholder
    /// until resolution, or the literal `"dhcp"`
    pub ip: String,
    /// Platform family as entered (e.g. "windows", "linux")
    pub platform: String,
    /// OS tag as entered (e.g. "server2016", "ubuntu")
    pub os: String,
    /// Services keyed by lowercase name; insertion order is preserved
    pub services: IndexMap<String, Service>,
}

/// A network template shared by every team.
///
/// The `scheme` is a partial IP address containing the placeholder token
/// (e.g. `"10.2.X"`); each team's copy has the placeholder replaced with the
/// team id in every host IP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Network name (map key in the containing [`Team`])
    pub name: String,
    /// IP scheme with the placeholder token, upper-cased on entry
    pub scheme: String,
    /// Hosts keyed by name; insertion order is preserved
    pub hosts: IndexMap<String, Host>,
}

impl Network {
    /// Create an empty network, rejecting schemes without the placeholder.
    pub fn new(name: impl Into<String>, scheme: impl Into<String>) -> Result<Self, TopologyError> {
        let scheme = scheme.into();
        if !scheme.contains(PLACEHOLDER) {
            return Err(TopologyError::SchemeMissingPlaceholder(scheme));
        }
        Ok(Self {
            name: name.into(),
            scheme,
            hosts: IndexMap::new(),
        })
    }
}

/// The template networks for one team, keyed by network name.
pub type Team = IndexMap<String, Network>;

/// A fully-resolved topology: one independent copy of the template networks
/// per team id, with every placeholder in host IPs substituted.
///
/// Serializing this structure is a lossless dump of the nested mappings;
/// `indexmap` keeps key order equal to insertion order, so the dump is
/// byte-stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    /// Exercise name (e.g. "ISTS16")
    pub name: String,
    /// Free-text date (e.g. "2/2/2018")
    pub date: String,
    /// Resolved networks per team id, in ascending id order
    pub teams: IndexMap<u32, Team>,
}

/// Everything the interactive session collects before resolution: the range
/// header, the team ids, and the shared network templates.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyDraft {
    pub name: String,
    pub date: String,
    pub team_ids: Vec<u32>,
    pub networks: Team,
}

/// An inclusive range of team ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamRange {
    pub start: u32,
    pub end: u32,
}

impl TeamRange {
    /// Validate and build a range. Team ids are positive and the range must
    /// not be empty.
    pub fn new(start: u32, end: u32) -> Result<Self, TopologyError> {
        if start == 0 {
            return Err(TopologyError::TeamIdZero);
        }
        if start > end {
            return Err(TopologyError::TeamRangeInverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// The team ids in ascending order.
    pub fn ids(&self) -> Vec<u32> {
        (self.start..=self.end).collect()
    }

    /// Number of teams in the range.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }
}

/// Topology validation errors.
///
/// These are recoverable: the interactive session reports them and repeats
/// the entry step that produced them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("IP scheme '{0}' does not contain the placeholder 'X'")]
    SchemeMissingPlaceholder(String),
    #[error("team ids start at 1")]
    TeamIdZero,
    #[error("team range start {start} is greater than end {end}")]
    TeamRangeInverted { start: u32, end: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_requires_placeholder() {
        assert!(Network::new("local", "10.2.X").is_ok());
        assert!(Network::new("local", "10.2.X.X").is_ok());

        let result = Network::new("local", "10.2.1");
        assert_eq!(
            result,
            Err(TopologyError::SchemeMissingPlaceholder("10.2.1".to_string()))
        );
    }

    #[test]
    fn test_lowercase_x_is_not_the_placeholder_at_entry() {
        // The session upper-cases schemes before construction; a raw
        // lowercase scheme is rejected here.
        assert!(Network::new("local", "10.2.x").is_err());
    }

    #[test]
    fn test_team_range_validation() {
        let range = TeamRange::new(1, 4).unwrap();
        assert_eq!(range.ids(), vec![1, 2, 3, 4]);
        assert_eq!(range.len(), 4);

        let single = TeamRange::new(7, 7).unwrap();
        assert_eq!(single.ids(), vec![7]);

        assert_eq!(TeamRange::new(0, 4), Err(TopologyError::TeamIdZero));
        assert_eq!(
            TeamRange::new(5, 2),
            Err(TopologyError::TeamRangeInverted { start: 5, end: 2 })
        );
    }

    #[test]
    fn test_service_map_preserves_insertion_order() {
        let mut services = IndexMap::new();
        services.insert("ssh".to_string(), Service { port: 22, scored: true });
        services.insert("http".to_string(), Service { port: 80, scored: false });
        services.insert("dns".to_string(), Service { port: 53, scored: true });

        let keys: Vec<&str> = services.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ssh", "http", "dns"]);
    }

    #[test]
    fn test_topology_dump_is_stable() {
        let mut network = Network::new("local", "10.2.X").unwrap();
        network.hosts.insert(
            "web".to_string(),
            Host {
                name: "web".to_string(),
                ip: "10.2.X.20".to_string(),
                platform: "linux".to_string(),
                os: "ubuntu".to_string(),
                services: IndexMap::new(),
            },
        );
        let mut teams = IndexMap::new();
        let mut team = Team::new();
        team.insert("local".to_string(), network);
        teams.insert(1, team);

        let topology = Topology {
            name: "TEST".to_string(),
            date: "1/1/20".to_string(),
            teams,
        };

        let first = serde_json::to_string_pretty(&topology).unwrap();
        let second = serde_json::to_string_pretty(&topology).unwrap();
        assert_eq!(first, second);
        // Integer team ids become JSON object keys.
        assert!(first.contains("\"1\""));
    }
}
