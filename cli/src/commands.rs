pub mod check;
pub mod inventory;
pub mod parse;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use nxprof_common::config::{
    Config, DEFAULT_HOSTS_FILE, DEFAULT_INVENTORY_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_SSH_PORT,
    DEFAULT_WORKERS,
};

#[derive(Parser)]
#[command(name = "nxprof")]
#[command(version)]
#[command(about = "Reports port-profile usage across Cisco NX-OS switches.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Write one CSV row per interface instead of one per profile
    #[arg(long, global = true)]
    pub detailed: bool,

    /// SSH username; prompted for when missing
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Number of switches queried in parallel
    #[arg(short, long, global = true, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// SSH port for hosts that do not set one
    #[arg(short, long, global = true, default_value_t = DEFAULT_SSH_PORT)]
    pub port: u16,

    /// One switch hostname or address per line
    #[arg(long, global = true, default_value = DEFAULT_HOSTS_FILE)]
    pub hosts_file: PathBuf,

    #[arg(long, global = true, default_value = DEFAULT_INVENTORY_DIR)]
    pub inventory_dir: PathBuf,

    /// Directory the CSV report is written to
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    #[arg(long, global = true, default_value = "logs/nxprof.log")]
    pub log_file: PathBuf,

    /// Seconds allowed for connecting and logging in
    #[arg(long, global = true, default_value_t = 10)]
    pub connect_timeout: u64,

    /// Seconds allowed for each show command
    #[arg(long, global = true, default_value_t = 30)]
    pub command_timeout: u64,

    /// -q hides headers, -qq also hides per-host results
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Log debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the inventory, query every switch and write the CSV report (default)
    #[command(alias = "c")]
    Check,
    /// Only build the YAML inventory from the hostname list
    #[command(alias = "i")]
    Inventory,
    /// Reconcile saved command output without connecting to a switch
    #[command(alias = "p")]
    Parse {
        /// Saved output of `show port-profile usage`
        #[arg(long)]
        usage: PathBuf,
        /// Saved output of `show port-profile`
        #[arg(long)]
        profiles: Option<PathBuf>,
        /// Name used for the host in the results
        #[arg(long, default_value = "offline")]
        host: String,
        /// Also write the CSV report
        #[arg(long)]
        csv: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            detailed: self.detailed,
            quiet: self.quiet,
            no_banner: self.no_banner,
            workers: self.workers,
            port: self.port,
            connect_timeout: Duration::from_secs(self.connect_timeout),
            command_timeout: Duration::from_secs(self.command_timeout),
            hosts_file: self.hosts_file.clone(),
            inventory_dir: self.inventory_dir.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}
