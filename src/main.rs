use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::PathBuf;

use topogen::builder::{session, Console};
use topogen::topology::TopologyFile;

/// Interactive topology builder for red team exercise ranges
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path the topology document is saved to
    #[arg(short, long, default_value = "topology.json")]
    output: PathBuf,

    /// Format used to dump the resolved topology to stdout
    #[arg(long, value_enum, default_value_t = DumpFormat::Json)]
    format: DumpFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DumpFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Walk the operator through the range: teams, networks, hosts, services
    let mut console = Console::stdio();
    let draft = session::run(&mut console)?;

    let topology = draft.resolve();
    info!(
        "Resolved {} teams across {} network templates",
        topology.teams.len(),
        draft.networks.len()
    );

    // Dump the resolved per-team topology to stdout
    let dump = match args.format {
        DumpFormat::Json => serde_json::to_string_pretty(&topology)?,
        DumpFormat::Yaml => serde_yaml::to_string(&topology)?,
    };
    println!("{}", dump);

    // Save the interchange document consumed by detgen and the inventory
    let document = TopologyFile::from_draft(&draft);
    let contents = serde_json::to_string_pretty(&document)?;
    fs::write(&args.output, contents)
        .wrap_err_with(|| format!("Failed to write topology document '{}'", args.output.display()))?;

    println!("Saved topology to {}", args.output.display());
    Ok(())
}
