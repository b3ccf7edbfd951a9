use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WORKERS: usize = 5;
pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_HOSTS_FILE: &str = "inventory/hostnames.txt";
pub const DEFAULT_INVENTORY_DIR: &str = "inventory";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone)]
pub struct Config {
    /// Writes one CSV row per interface instead of one per profile.
    pub detailed: bool,
    /// 0 prints everything, 1 drops headers, 2 also drops per-host trees.
    pub quiet: u8,
    pub no_banner: bool,
    /// Number of switches queried at the same time.
    pub workers: usize,
    /// SSH port used when the inventory does not set one.
    pub port: u16,
    /// Covers TCP connect, key exchange and authentication.
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
    pub hosts_file: PathBuf,
    pub inventory_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detailed: false,
            quiet: 0,
            no_banner: false,
            workers: DEFAULT_WORKERS,
            port: DEFAULT_SSH_PORT,
            connect_timeout: Duration::from_secs(10),
            command_timeout: Duration::from_secs(30),
            hosts_file: PathBuf::from(DEFAULT_HOSTS_FILE),
            inventory_dir: PathBuf::from(DEFAULT_INVENTORY_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Config {
    /// Worker count clamped to at least one.
    pub fn worker_count(&self) -> usize {
        self.workers.max(1)
    }
}
