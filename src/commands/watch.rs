//! `fleetboard watch` — periodic refresh loop in the terminal.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;

use crate::domain::Stores;
use crate::format::{format_bandwidth, format_load};

pub fn run(base_url: Option<&str>, interval: Option<u64>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(base_url, interval))
}

async fn run_async(base_url: Option<&str>, interval: Option<u64>) -> Result<()> {
    let (config, stores) = super::session(base_url)?;
    let secs = interval.unwrap_or(config.refresh_interval_secs).max(1);

    println!(
        "refreshing every {}s — {} to stop",
        secs,
        "Ctrl-C".bold()
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                stores.dashboard.fetch_dashboard().await;
                stores.node.fetch_nodes().await;
                stores.node.increment_refresh_count().await;
                print_tick(&stores).await;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let total = stores.node.refresh_count().await;
    stores.node.reset_refresh_count().await;
    println!();
    println!("stopped after {} refreshes", total);
    Ok(())
}

async fn print_tick(stores: &Stores) {
    let dashboard = stores.dashboard.dashboard().await;
    let nodes = stores.node.nodes().await;
    let refreshes = stores.node.refresh_count().await;

    let online = nodes.iter().filter(|n| n.is_enabled).count();
    let mut line = format!(
        "[{}] nodes {}/{}  bandwidth {}  load {}  (refresh #{})",
        chrono::Local::now().format("%H:%M:%S"),
        online,
        nodes.len(),
        format_bandwidth(dashboard.current_bandwidth),
        format_load(dashboard.load),
        refreshes
    );
    if let Some(error) = stores.node.error().await {
        line.push_str(&format!("  {} {}", "!!".red().bold(), error.red()));
    }
    println!("{}", line);
}
