//! # Topogen - Topology builder and detfile generator for exercise ranges
//!
//! This library provides the data model and tooling for describing a red
//! team exercise range (teams, networks, hosts, services) and deriving
//! per-team artifacts from that description.
//!
//! ## Overview
//!
//! A range is entered once as a set of network templates whose IP schemes
//! carry a placeholder token (`"X"`). Resolution stamps out one independent
//! copy of the templates per team, substituting each team's id into every
//! host address. The saved topology document then feeds two consumers: a
//! generator that renders a detcord deployment script, and an accessor that
//! answers host queries such as "every Linux address on the range".
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `topology`: the nested data model, team resolution, and the saved
//!   interchange document
//! - `builder`: console prompt plumbing and the interactive entry session
//! - `detfile`: rendering of the detcord deployment script
//! - `inventory`: host queries and OS classification over a saved topology
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use topogen::detfile;
//! use topogen::inventory::Inventory;
//!
//! // Render the deployment script for a saved topology
//! detfile::generate_detfile(Path::new("topology.json"), Path::new("detfile.py"))?;
//!
//! // Query the same topology for Linux targets
//! let inventory = Inventory::load("topology.json")?;
//! for address in inventory.linux_hosts() {
//!     println!("{}", address);
//! }
//! # Ok::<(), color_eyre::eyre::Report>(())
//! ```
//!
//! ## Topology Format
//!
//! Saved topologies are JSON documents holding the unresolved templates
//! plus the team id list:
//!
//! ```json
//! {
//!   "name": "ISTS16",
//!   "date": "2/2/2018",
//!   "teams": [1, 2],
//!   "networks": [
//!     {
//!       "ip": "10.2.X",
//!       "hosts": [
//!         {
//!           "name": "web",
//!           "ip": "20",
//!           "platform": "linux",
//!           "os": "ubuntu",
//!           "services": {"http": {"port": 80, "scored": true}}
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible file operations return `color_eyre` results; recoverable
//! operator input problems are typed as `builder::InputError` so the entry
//! session can repeat a single step without losing confirmed data.

pub mod builder;
pub mod detfile;
pub mod inventory;
pub mod topology;
