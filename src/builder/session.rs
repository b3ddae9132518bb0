//! The interactive entry session.
//!
//! Steps follow the shape of the data: the range header, the team range,
//! then networks containing hosts containing services. Every data step runs
//! inside a confirmation loop that redisplays the parsed entry and repeats
//! the step until the operator accepts it, so a typo never forces a restart
//! of the whole session.

use indexmap::IndexMap;
use serde::Serialize;
use std::io::{BufRead, Write};

use super::console::{Console, InputError};
use crate::topology::{Host, Network, Service, Team, TeamRange, TopologyDraft, DHCP};

/// Run an entry step until the operator confirms its result.
///
/// The parsed value is dumped for review before asking. A rejected answer
/// or a recoverable input error repeats the whole step; fatal errors abort
/// the session.
pub fn confirmed<R, W, T, F>(console: &mut Console<R, W>, mut step: F) -> Result<T, InputError>
where
    R: BufRead,
    W: Write,
    T: Serialize,
    F: FnMut(&mut Console<R, W>) -> Result<T, InputError>,
{
    loop {
        match step(console) {
            Ok(value) => {
                console.show_entry(&value)?;
                if console.confirm("Correct?")? {
                    console.line("")?;
                    return Ok(value);
                }
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => console.line(&format!("Invalid input: {}", err))?,
        }
    }
}

/// Name and date shown at the top of generated artifacts.
#[derive(Debug, Clone, Serialize)]
struct RangeHeader {
    name: String,
    date: String,
}

fn header_step<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<RangeHeader, InputError> {
    let name = console.prompt("Range name (e.g. ISTS16): ")?;
    let date = console.prompt("Date (e.g. 2/2/2018): ")?;
    Ok(RangeHeader { name, date })
}

fn team_ids_step<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Vec<u32>, InputError> {
    let start = console.prompt_number("Starting team number: ")?;
    let end = console.prompt_number("Ending team number: ")?;
    Ok(TeamRange::new(start, end)?.ids())
}

/// One service as captured at the prompt. The name becomes the map key when
/// the entry is attached to its host.
#[derive(Debug, Clone, Serialize)]
struct ServiceEntry {
    name: String,
    port: u16,
    scored: bool,
}

impl ServiceEntry {
    fn into_keyed(self) -> (String, Service) {
        (
            self.name,
            Service {
                port: self.port,
                scored: self.scored,
            },
        )
    }
}

fn service_step<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<ServiceEntry, InputError> {
    console.line("")?;
    console.line("Adding Service:")?;
    let name = console.prompt("Service (e.g. http): ")?.to_lowercase();
    let port = console.prompt_number("Port (e.g. 80): ")?;
    let scored = console.confirm("Scored?")?;
    Ok(ServiceEntry { name, port, scored })
}

fn host_step<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    scheme: &str,
) -> Result<Host, InputError> {
    console.line("")?;
    console.line("Adding Host:")?;
    let name = console.prompt("Name: ")?;
    let suffix = console.prompt_prefixed("IP: ", &format!("{}.", scheme))?;
    let platform = console.prompt("Platform (e.g. windows/linux): ")?;
    let os = console.prompt("OS (e.g. Server 2016/Ubuntu 16): ")?;

    let mut services = IndexMap::new();
    while console.confirm("Add service?")? {
        let (service_name, service) = confirmed(console, service_step)?.into_keyed();
        services.insert(service_name, service);
    }

    // A host that leases its address has no suffix to append.
    let ip = if suffix.eq_ignore_ascii_case(DHCP) {
        DHCP.to_string()
    } else {
        format!("{}.{}", scheme, suffix)
    };

    Ok(Host {
        name,
        ip,
        platform,
        os,
        services,
    })
}

fn network_step<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Network, InputError> {
    console.line("")?;
    console.line("Adding Network:")?;
    let name = console.prompt("Name: ")?;
    console.line("Please enter an appropriate scheme. The 'X' will be replaced with the team id.")?;
    let scheme = console.prompt("IP Scheme (e.g. '10.2.X'): ")?.to_uppercase();

    let mut network = Network::new(name, scheme)?;
    loop {
        let scheme = network.scheme.clone();
        let host = confirmed(console, |c| host_step(c, &scheme))?;
        network.hosts.insert(host.name.clone(), host);
        if !console.confirm("Add another host?")? {
            break;
        }
    }
    Ok(network)
}

fn networks_step<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Team, InputError> {
    let mut networks = Team::new();
    loop {
        let network = confirmed(console, network_step)?;
        networks.insert(network.name.clone(), network);
        if !console.confirm("Continue adding networks?")? {
            break;
        }
    }
    Ok(networks)
}

/// Drive a complete entry session and return the collected draft.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<TopologyDraft, InputError> {
    let header = confirmed(console, header_step)?;
    let team_ids = confirmed(console, team_ids_step)?;
    let networks = networks_step(console)?;
    Ok(TopologyDraft {
        name: header.name,
        date: header.date,
        team_ids,
        networks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        let (_, written) = console.into_parts();
        String::from_utf8(written).unwrap()
    }

    #[test]
    fn test_team_ids_step_expands_the_range() {
        let mut console = scripted("1\n4\ny\n");
        let ids = confirmed(&mut console, team_ids_step).unwrap();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_invalid_range_is_reported_and_retried() {
        let mut console = scripted("5\n2\n1\n2\ny\n");
        let ids = confirmed(&mut console, team_ids_step).unwrap();
        assert_eq!(ids, vec![1, 2]);

        let transcript = output(console);
        assert!(transcript.contains("Invalid input"));
        assert!(transcript.contains("start 5 is greater than end 2"));
    }

    #[test]
    fn test_non_numeric_team_number_is_reported_and_retried() {
        let mut console = scripted("one\n1\n1\ny\n");
        let ids = confirmed(&mut console, team_ids_step).unwrap();
        assert_eq!(ids, vec![1]);
        assert!(output(console).contains("'one' is not a valid number"));
    }

    #[test]
    fn test_rejected_entry_repeats_the_step() {
        // First service is entered, rejected at the confirmation, and
        // replaced by a second entry.
        let mut console = scripted("ssh\n22\ny\nn\nhttp\n80\nn\ny\n");
        let entry = confirmed(&mut console, service_step).unwrap();
        assert_eq!(entry.name, "http");
        assert_eq!(entry.port, 80);
        assert!(!entry.scored);
    }

    #[test]
    fn test_service_names_are_lowercased() {
        let mut console = scripted("LDAP\n389\ny\ny\n");
        let entry = confirmed(&mut console, service_step).unwrap();
        assert_eq!(entry.name, "ldap");
        assert!(entry.scored);
    }

    #[test]
    fn test_host_step_joins_scheme_and_suffix() {
        // name, suffix, platform, os, no services, confirm.
        let mut console = scripted("web\n20\nlinux\nubuntu\nn\ny\n");
        let host = confirmed(&mut console, |c| host_step(c, "10.2.X")).unwrap();
        assert_eq!(host.name, "web");
        assert_eq!(host.ip, "10.2.X.20");
        assert_eq!(host.platform, "linux");
        assert_eq!(host.os, "ubuntu");
        assert!(host.services.is_empty());
    }

    #[test]
    fn test_host_step_keeps_dhcp_literal() {
        let mut console = scripted("laptop\nDHCP\nwindows\nwin10\nn\ny\n");
        let host = confirmed(&mut console, |c| host_step(c, "10.2.X")).unwrap();
        assert_eq!(host.ip, "dhcp");
    }

    #[test]
    fn test_network_step_uppercases_scheme_and_collects_hosts() {
        let mut console = scripted(
            "corp\n10.2.x\n\
             web\n20\nlinux\nubuntu\nn\ny\nn\ny\n",
        );
        let network = confirmed(&mut console, network_step).unwrap();
        assert_eq!(network.name, "corp");
        assert_eq!(network.scheme, "10.2.X");
        assert_eq!(network.hosts["web"].ip, "10.2.X.20");
    }

    #[test]
    fn test_network_step_rejects_scheme_without_placeholder() {
        // First attempt has no placeholder; the whole network step repeats.
        let mut console = scripted(
            "corp\n10.2.1\n\
             corp\n10.2.X\n\
             web\n20\nlinux\nubuntu\nn\ny\nn\ny\n",
        );
        let network = confirmed(&mut console, network_step).unwrap();
        assert_eq!(network.scheme, "10.2.X");
        assert!(output(console).contains("does not contain the placeholder"));
    }

    #[test]
    fn test_full_session_produces_a_draft() {
        let script = concat!(
            // header: name, date, confirm
            "ISTS16\n2/2/2018\ny\n",
            // teams 1 through 2, confirm
            "1\n2\ny\n",
            // network "corp" with scheme 10.2.X
            "corp\n10.2.X\n",
            // host "ad": no services, confirm, add another host
            "ad\n10\nwindows\nserver2016\nn\ny\ny\n",
            // host "web": one scored http service, confirm, no more hosts
            "web\n20\nlinux\nubuntu\ny\nhttp\n80\ny\ny\nn\ny\nn\n",
            // confirm the network, stop adding networks
            "y\nn\n",
        );
        let mut console = scripted(script);

        let draft = run(&mut console).unwrap();
        assert_eq!(draft.name, "ISTS16");
        assert_eq!(draft.date, "2/2/2018");
        assert_eq!(draft.team_ids, vec![1, 2]);

        let corp = &draft.networks["corp"];
        assert_eq!(corp.scheme, "10.2.X");
        assert_eq!(corp.hosts.len(), 2);
        assert_eq!(corp.hosts["ad"].ip, "10.2.X.10");
        assert_eq!(corp.hosts["web"].services["http"].port, 80);
        assert!(corp.hosts["web"].services["http"].scored);
    }

    #[test]
    fn test_truncated_input_aborts_the_session() {
        let mut console = scripted("ISTS16\n");
        let err = run(&mut console).unwrap_err();
        assert!(err.is_fatal());
    }
}
