//! `fleetboard serve` — run the local dashboard viewer.

use anyhow::Result;

use crate::config;

pub fn run(base_url: Option<&str>, addr: Option<&str>) -> Result<()> {
    let mut config = config::load()?;

    // CLI flags override config values
    if let Some(base) = base_url {
        config.base_url = base.to_string();
    }
    let addr = addr
        .map(str::to_string)
        .unwrap_or_else(|| config.listen_addr.clone());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(crate::server::run(config, &addr))
}
