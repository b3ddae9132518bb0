//! Detfile generation.
//!
//! Renders a detcord deployment script from a saved topology document: the
//! flattened host list and the team id list are substituted into a fixed
//! Python skeleton. Hosts without a static address and anything
//! Windows-flavored are left out, since the script drives SSH-based
//! automation against Linux targets.

use color_eyre::Result;
use log::info;
use std::fs;
use std::path::Path;

use crate::inventory::{classify_os, OsFamily};
use crate::topology::{load_topology, ResolvedHost, TopologyFile};

/// Fixed name of the generated script, written to the current directory.
pub const DETFILE_NAME: &str = "detfile.py";

/// The skeleton the host and team sections are substituted into. Everything
/// outside the four markers is fixed detcord boilerplate; the generated
/// `build_hosts` accepts either case of the team placeholder so hand-edited
/// documents expand the same way as saved ones.
const SKEL: &str = r#"'''
This is an auto generated detfile build from a topology file: {filename}

{info}

https://github.com/micahjmartin/detcord
'''

import os
from detcord import action, display

if os.path.exists('actions'):
    from actions import *

env = dict()  # pylint: disable=invalid-name
env['user'] = 'root'
env['pass'] = 'changeme'
env['hosts'] = []  # DYNAMICALLY GENERATED IN build_hosts()
env['threading'] = False

{hosts}

{teams}


@action
def test(host):
    '''Print the hostname of the box'''
    display(host.run("command hostname"))


def build_hosts():
    '''Build the hosts for the ENV dynamically
    '''
    global env
    env['hosts'] = []
    for team in TEAMS:
        for ip in HOSTS:
            new = ip.replace("X", str(team)).replace("x", str(team))
            env['hosts'].append(new)

build_hosts()
"#;

/// Whether the detfile should target this host: it needs a static address
/// and must not be a Windows box, judged both by the OS tag containing
/// "win" and by its classified family.
fn is_target(host: &ResolvedHost) -> bool {
    if host.is_dhcp() {
        return false;
    }
    let os = host.os.as_deref().unwrap_or_default();
    if os.to_lowercase().contains("win") {
        return false;
    }
    classify_os(os) != OsFamily::Windows
}

/// The hosts the rendered script will drive, in document order.
pub fn target_hosts(topology: &TopologyFile) -> Vec<ResolvedHost> {
    topology
        .resolved_hosts()
        .into_iter()
        .filter(is_target)
        .collect()
}

fn hosts_section(topology: &TopologyFile) -> String {
    let mut section = String::from("HOSTS = [\n");
    for host in target_hosts(topology) {
        section.push_str(&format!("\t'{}',", host.ip));
        let comment: Vec<&str> = [host.name.as_deref(), host.os.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        if !comment.is_empty() {
            section.push_str("  # ");
            section.push_str(&comment.join(" - "));
        }
        section.push('\n');
    }
    section.push(']');
    section
}

fn teams_section(teams: &[u32]) -> String {
    let ids: Vec<String> = teams.iter().map(u32::to_string).collect();
    format!("TEAMS = [{}]", ids.join(", "))
}

fn info_line(topology: &TopologyFile) -> String {
    [topology.name.as_str(), topology.date.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(" - ")
}

/// Render the full detfile for a topology document. `source` is the path
/// the document was loaded from, recorded in the generated header.
pub fn render_detfile(source: &str, topology: &TopologyFile) -> String {
    SKEL.replace("{filename}", source)
        .replace("{info}", &info_line(topology))
        .replace("{hosts}", &hosts_section(topology))
        .replace("{teams}", &teams_section(&topology.teams))
}

/// Load a topology document and write the rendered detfile.
///
/// The script is rendered completely in memory and written with a single
/// call, so a failure never leaves a truncated file behind.
pub fn generate_detfile(topology_path: &Path, output_path: &Path) -> Result<()> {
    let topology = load_topology(topology_path)?;
    let rendered = render_detfile(&topology_path.display().to_string(), &topology);

    fs::write(output_path, &rendered)?;
    info!("Wrote {} bytes to {:?}", rendered.len(), output_path);

    println!("Generated {}", output_path.display());
    println!(
        "- {} target hosts across {} teams",
        target_hosts(&topology).len(),
        topology.teams.len()
    );

    Ok(())
}
