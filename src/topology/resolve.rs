//! Team resolution: expanding network templates into per-team copies.

use indexmap::IndexMap;

use super::types::{Team, Topology, TopologyDraft, PLACEHOLDER};

/// Expand the shared network templates into one independent copy per team.
///
/// Every host IP in a team's copy has the placeholder token replaced with
/// that team's id. Only host IPs are rewritten; network schemes keep the
/// token so the resolved dump still shows where substitution happened.
/// The templates themselves are never modified, so the same templates can
/// be resolved repeatedly with identical results.
///
/// # Arguments
///
/// * `team_ids` - Team ids in the order their entries should appear
/// * `templates` - The network templates shared by every team
///
/// # Returns
///
/// A mapping from team id to that team's resolved networks. Empty
/// `team_ids` or empty `templates` produce an empty or trivially-keyed
/// mapping with no substitution work.
pub fn resolve_teams(team_ids: &[u32], templates: &Team) -> IndexMap<u32, Team> {
    let mut teams = IndexMap::with_capacity(team_ids.len());
    for &team_id in team_ids {
        let id = team_id.to_string();
        let mut networks = templates.clone();
        for network in networks.values_mut() {
            for host in network.hosts.values_mut() {
                host.ip = host.ip.replace(PLACEHOLDER, &id);
            }
        }
        teams.insert(team_id, networks);
    }
    teams
}

/// Resolve a full topology from its parts.
pub fn build_topology(name: &str, date: &str, team_ids: &[u32], templates: &Team) -> Topology {
    Topology {
        name: name.to_string(),
        date: date.to_string(),
        teams: resolve_teams(team_ids, templates),
    }
}

impl TopologyDraft {
    /// Resolve the drafted templates into the final per-team topology.
    pub fn resolve(&self) -> Topology {
        build_topology(&self.name, &self.date, &self.team_ids, &self.networks)
    }
}
