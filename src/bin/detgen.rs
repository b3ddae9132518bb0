//! Detfile generator CLI.
//!
//! Renders the detcord deployment script for a saved topology document and
//! writes it to `detfile.py` in the current directory.

use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use std::path::{Path, PathBuf};

use topogen::detfile::{generate_detfile, DETFILE_NAME};

/// Render a detcord deployment script from a saved topology
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology JSON document
    topology: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // An absent argument is a usage error, reported on stdout with exit
    // code 1; unreadable or malformed documents propagate as fatal errors.
    let topology_path = match args.topology {
        Some(path) => path,
        None => {
            let program = std::env::args()
                .next()
                .unwrap_or_else(|| "detgen".to_string());
            println!("USAGE: {} <topology>", program);
            std::process::exit(1);
        }
    };

    generate_detfile(&topology_path, Path::new(DETFILE_NAME))?;

    Ok(())
}
