use nxprof_common::{config::Config, success};
use nxprof_core::inventory::{self, Inventory};

use crate::terminal::print;

pub fn inventory(cfg: &Config) -> anyhow::Result<()> {
    let created = inventory::create_inventory_files(&cfg.hosts_file, &cfg.inventory_dir)?;
    let loaded = Inventory::load(&cfg.inventory_dir, cfg.port)?;

    for (idx, host) in loaded.hosts.iter().enumerate() {
        print::tree_head(idx, &host.name);
    }

    success!(
        "Created inventory for {created} hosts in {}",
        cfg.inventory_dir.display()
    );
    Ok(())
}
