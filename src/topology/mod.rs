//! Network topology module.
//!
//! This module contains the topology data model, the team resolution step
//! that expands network templates into per-team copies, and the flat
//! interchange document saved for downstream tooling.

pub mod file;
pub mod resolve;
pub mod types;

// Re-export key types and functions for easier access
pub use file::{load_topology, HostRecord, NetworkRecord, ResolvedHost, TopologyFile};
pub use resolve::{build_topology, resolve_teams};
pub use types::{
    Host, Network, Service, Team, TeamRange, Topology, TopologyDraft, TopologyError, DHCP,
    PLACEHOLDER,
};
