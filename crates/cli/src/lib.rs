use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(about = "MarketPulse - consolidated market snapshots for one instrument")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve snapshots over HTTP
    Start {
        /// Path to the configuration file
        #[arg(short, long, default_value = "pulse.yaml")]
        config: PathBuf,

        /// Override HTTP port
        #[arg(long)]
        port: Option<u16>,

        /// Expose Prometheus metrics on this port
        #[arg(long)]
        metrics_port: Option<u16>,
    },

    /// Build one snapshot and print it as JSON to stdout
    Snapshot {
        /// Path to the configuration file
        #[arg(short, long, default_value = "pulse.yaml")]
        config: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate configuration without starting the service
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "pulse.yaml")]
        config: PathBuf,
    },

    /// Initialize a new configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "pulse.yaml")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
