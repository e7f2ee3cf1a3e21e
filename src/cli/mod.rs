pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "funnies")]
#[command(about = "Collects web comic feeds into a single page", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/funnies/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of feeds fetched at once
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    /// Per-feed timeout in seconds
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all feeds and write the page and JSON
    Build {
        /// Don't open the page in a browser afterwards
        #[arg(long)]
        no_open: bool,
    },
    /// Fetch all feeds, write the output and serve it over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Fetch all feeds and print the JSON to stdout
    Json,
}

impl Cli {
    /// Apply command-line flags on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.fetch.workers = workers;
        }
        if let Some(timeout) = self.timeout {
            config.fetch.timeout_secs = timeout;
        }
        if let Commands::Serve { port: Some(port) } = self.command {
            config.server.port = port;
        }
    }
}
