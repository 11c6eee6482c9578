//! `fleetboard dashboard` — the fleet-wide snapshot.

use anyhow::Result;
use colored::Colorize;

use crate::domain::types::DashboardData;
use crate::format::{format_bandwidth, format_bytes, format_load};

pub fn run(base_url: Option<&str>, format: &str) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(base_url, format))
}

async fn run_async(base_url: Option<&str>, format: &str) -> Result<()> {
    let (_config, stores) = super::session(base_url)?;

    stores.dashboard.fetch_dashboard().await;
    let data = stores.dashboard.dashboard().await;

    match format {
        "json" => super::print_json(&data),
        _ => {
            print_table(&data);
            Ok(())
        }
    }
}

fn print_table(data: &DashboardData) {
    println!("{}", "═══ Fleet Dashboard ═══".cyan().bold());
    println!(
        "  Online nodes:      {}",
        data.current_nodes.to_string().bold()
    );
    println!(
        "  Current bandwidth: {}",
        format_bandwidth(data.current_bandwidth).bold()
    );
    println!("  Peak bandwidth:    {}", format_bandwidth(data.bandwidth));
    println!("  Total traffic:     {}", format_bytes(data.bytes as f64));
    println!("  Total hits:        {}", data.hits);
    println!("  Load:              {}", format_load(data.load));

    if !data.hourly.is_empty() {
        println!();
        println!("{}", "── Recent hours ──".yellow());
        println!(
            "  {:>4}  {:>14}  {:>12}  {:>10}  {:>6}",
            "Hour", "Bandwidth", "Traffic", "Hits", "Nodes"
        );
        let skip = data.hourly.len().saturating_sub(6);
        for h in data.hourly.iter().skip(skip) {
            println!(
                "  {:>4}  {:>14}  {:>12}  {:>10}  {:>6}",
                format!("{:02}h", h.id),
                format_bandwidth(h.bandwidth),
                format_bytes(h.bytes as f64),
                h.hits,
                h.nodes
            );
        }
    }
}
