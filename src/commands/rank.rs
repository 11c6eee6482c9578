//! `fleetboard rank` — the server-computed node leaderboard.

use anyhow::{bail, Result};
use colored::Colorize;

use crate::domain::types::NodeMetricRank;
use crate::format::format_bytes;

pub fn run(base_url: Option<&str>, format: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(base_url, format))
}

async fn run_async(base_url: Option<&str>, format: &str) -> Result<()> {
    let (_config, stores) = super::session(base_url)?;

    stores.node.fetch_node_ranks().await;
    if let Some(error) = stores.node.error().await {
        bail!("failed to fetch leaderboard: {}", error);
    }
    let ranks = stores.node.ranks().await;

    match format {
        "json" => super::print_json(&ranks),
        _ => {
            print_table(&ranks);
            Ok(())
        }
    }
}

fn print_table(ranks: &[NodeMetricRank]) {
    if ranks.is_empty() {
        println!("leaderboard is empty");
        return;
    }

    println!(
        "{:>4}  {:<24} {:<16} {:>12} {:>10}  {}",
        "#".bold(),
        "NAME".bold(),
        "OWNER".bold(),
        "TRAFFIC".bold(),
        "HITS".bold(),
        "STATUS".bold()
    );

    // Positions come from the server's ordering; nothing is re-sorted here
    for (position, entry) in ranks.iter().enumerate() {
        let owner = entry
            .user
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("-");
        let status = if entry.is_enabled {
            "online".green().to_string()
        } else {
            "offline".red().to_string()
        };

        println!(
            "{:>4}  {:<24} {:<16} {:>12} {:>10}  {}",
            position + 1,
            entry.name,
            owner,
            format_bytes(entry.metric.bytes as f64),
            entry.metric.hits,
            status
        );
    }
}
