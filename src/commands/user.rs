//! `fleetboard whoami` — the logged-in operator.

use anyhow::{bail, Result};
use colored::Colorize;

pub fn run(base_url: Option<&str>, format: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(base_url, format))
}

async fn run_async(base_url: Option<&str>, format: &str) -> Result<()> {
    let (_config, stores) = super::session(base_url)?;

    stores.user.fetch_user().await;
    let user = match stores.user.user().await {
        Some(user) => user,
        // The store swallows fetch failures; with nothing held there is no
        // stale value worth printing, so the command fails instead.
        None => bail!("no user available — check the backend connection and logs"),
    };

    match format {
        "json" => super::print_json(&user),
        _ => {
            println!("{} ({})", user.name.bold(), user.username);
            println!("avatar: {}", user.avatar.dimmed());
            Ok(())
        }
    }
}
